//! HTML table extraction
//!
//! Document -> `<table>` elements -> header list + body rows -> [`LabeledTable`].
//! Built around the basketball-reference markup: a `thead` that may stack an
//! "over header" row above the real column names, and body rows whose first
//! cell is often a `th`.

use super::{ExtractOptions, HeaderSource, LabeledTable, RowPolicy};
use crate::{BrefError, Result, Section};
use scraper::{ElementRef, Html, Selector};

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static CSS selector")
}

/// Whitespace-trimmed text content of an element
fn cell_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_descendant<'a>(element: ElementRef<'a>, css: &'static str) -> Option<ElementRef<'a>> {
    element.select(&selector(css)).next()
}

/// Parse HTML text into a document tree. Never fails: malformed markup is
/// repaired the way a browser would.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// All `<table>` elements in document order
pub fn locate_tables(document: &Html) -> Result<Vec<ElementRef<'_>>> {
    let tables: Vec<_> = document.select(&selector("table")).collect();

    if tables.is_empty() {
        return Err(BrefError::NoTablesFound);
    }

    log::debug!("Located {} tables", tables.len());
    Ok(tables)
}

/// Column names from a `thead`.
///
/// Only the last header row is used; earlier rows on these pages are group
/// labels spanning several columns. An empty section yields an empty list.
pub fn extract_headers(thead: ElementRef) -> Vec<String> {
    let rows: Vec<_> = thead.select(&selector("tr")).collect();

    match rows.last() {
        Some(row) => row.select(&selector("th")).map(cell_text).collect(),
        None => Vec::new(),
    }
}

/// Column names from the `data-stat` attributes of the first body row
pub fn data_stat_headers(tbody: ElementRef) -> Vec<String> {
    let Some(row) = first_descendant(tbody, "tr") else {
        return Vec::new();
    };

    row.select(&selector("th, td"))
        .filter_map(|cell| cell.value().attr("data-stat"))
        .filter(|stat| stat.starts_with(|c: char| c.is_ascii_alphabetic()))
        .map(str::to_string)
        .collect()
}

/// Rows of cell text from a `tbody`. `th` and `td` cells both count.
pub fn extract_body(tbody: ElementRef) -> Vec<Vec<String>> {
    let cell_selector = selector("th, td");

    tbody
        .select(&selector("tr"))
        .map(|row| row.select(&cell_selector).map(cell_text).collect())
        .collect()
}

fn apply_row_policy(
    mut rows: Vec<Vec<String>>,
    expected: usize,
    policy: RowPolicy,
) -> Result<Vec<Vec<String>>> {
    if expected == 0 {
        return Ok(rows);
    }

    match policy {
        RowPolicy::Keep => {}
        RowPolicy::Pad => {
            for row in &mut rows {
                row.resize(expected, String::new());
            }
        }
        RowPolicy::Reject => {
            if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
                return Err(BrefError::MalformedRow {
                    row: idx,
                    expected,
                    found: row.len(),
                });
            }
        }
    }

    Ok(rows)
}

/// Convert one `<table>` into a [`LabeledTable`].
///
/// Uses the first `thead` and first `tbody` inside the element. `index` is the
/// table's position on the page and only feeds error messages.
pub fn assemble_table(
    table: ElementRef,
    index: usize,
    options: &ExtractOptions,
) -> Result<LabeledTable> {
    let thead = first_descendant(table, "thead");
    let tbody = first_descendant(table, "tbody").ok_or(BrefError::MissingSection {
        section: Section::Body,
        index,
    })?;

    let columns = match options.header_source {
        HeaderSource::Thead => {
            let thead = thead.ok_or(BrefError::MissingSection {
                section: Section::Header,
                index,
            })?;
            extract_headers(thead)
        }
        HeaderSource::DataStat => data_stat_headers(tbody),
    };

    let rows = apply_row_policy(extract_body(tbody), columns.len(), options.row_policy)?;
    let id = table.value().attr("id").map(str::to_string);

    log::debug!(
        "Table {} ({}): {} columns, {} rows",
        index,
        id.as_deref().unwrap_or("-"),
        columns.len(),
        rows.len()
    );

    Ok(LabeledTable::new(columns, rows).with_id(id))
}
