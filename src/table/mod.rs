//! Labeled tables and the HTML-to-table conversion

pub mod extract;

pub use extract::{
    assemble_table, data_stat_headers, extract_body, extract_headers, locate_tables,
    parse_document,
};

use serde::{Deserialize, Serialize};
use std::io::Write;

/// Ordered column names plus ordered rows of cell text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledTable {
    /// `id` attribute of the source `<table>`, if it had one
    pub id: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl LabeledTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        LabeledTable {
            id: None,
            columns,
            rows,
        }
    }

    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of the first column equal to `name`, ignoring case
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name_lower = name.to_lowercase();
        self.columns
            .iter()
            .position(|c| c.to_lowercase() == name_lower)
    }

    /// Case-insensitive exact match against the column names
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Values of the named column. Rows too short to reach it are skipped.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| row.get(idx).map(String::as_str))
                .collect(),
        )
    }

    /// Write the table as CSV, header first
    pub fn write_csv<W: Write>(&self, writer: W) -> crate::Result<()> {
        let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        if !self.columns.is_empty() {
            wtr.write_record(&self.columns)?;
        }
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// What to do when a row's cell count differs from the header count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Pass rows through unchanged
    #[default]
    Keep,
    /// Pad short rows with empty cells, truncate long ones
    Pad,
    /// Fail with `MalformedRow`
    Reject,
}

/// What to do with a table missing its `thead` or `tbody`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TablePolicy {
    /// Fail the whole page
    #[default]
    Abort,
    /// Log and drop the table
    Skip,
}

/// Where column names come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderSource {
    /// Text of the last `thead` row
    #[default]
    Thead,
    /// `data-stat` attributes of the first body row
    DataStat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    pub row_policy: RowPolicy,
    pub table_policy: TablePolicy,
    pub header_source: HeaderSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LabeledTable {
        LabeledTable::new(
            vec!["Team".to_string(), "ORtg".to_string(), "DRtg".to_string()],
            vec![
                vec!["Boston Celtics".to_string(), "122.2".to_string(), "111.0".to_string()],
                vec!["Denver Nuggets".to_string(), "118.9".to_string()],
            ],
        )
    }

    #[test]
    fn test_column_lookup_ignores_case() {
        let table = sample();
        assert_eq!(table.column_index("ortg"), Some(1));
        assert!(table.has_column("TEAM"));
        assert!(!table.has_column("rtg"));
    }

    #[test]
    fn test_column_values_skip_short_rows() {
        let table = sample();
        assert_eq!(table.column("drtg"), Some(vec!["111.0"]));
        assert_eq!(table.column("Team").unwrap().len(), 2);
        assert_eq!(table.column("Pace"), None);
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        sample().write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Team,ORtg,DRtg\nBoston Celtics,122.2,111.0\nDenver Nuggets,118.9\n"
        );
    }

    #[test]
    fn test_policy_serde_names() {
        let opts: ExtractOptions =
            toml::from_str("row_policy = \"reject\"\nheader_source = \"data-stat\"\n").unwrap();
        assert_eq!(opts.row_policy, RowPolicy::Reject);
        assert_eq!(opts.table_policy, TablePolicy::Abort);
        assert_eq!(opts.header_source, HeaderSource::DataStat);
    }
}
