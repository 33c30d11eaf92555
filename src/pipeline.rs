//! Page-to-tables pipeline
//!
//! fetch -> parse -> locate -> assemble, once per table on the page.

use crate::fetch::PageFetcher;
use crate::search::{find_tables, SearchResult};
use crate::table::{assemble_table, locate_tables, parse_document};
use crate::{BrefError, Config, ExtractOptions, LabeledTable, Result, TablePolicy};
use std::path::Path;

/// Convert every table in an HTML document, in document order
pub fn tables_from_html(html: &str, options: &ExtractOptions) -> Result<Vec<LabeledTable>> {
    let document = parse_document(html);
    let elements = locate_tables(&document)?;
    let mut tables = Vec::with_capacity(elements.len());

    for (index, element) in elements.into_iter().enumerate() {
        match assemble_table(element, index, options) {
            Ok(table) => tables.push(table),
            Err(e @ BrefError::MissingSection { .. })
                if options.table_policy == TablePolicy::Skip =>
            {
                log::warn!("Skipping table {}: {}", index, e);
            }
            Err(e) => return Err(e),
        }
    }

    if tables.is_empty() {
        return Err(BrefError::NoTablesFound);
    }

    Ok(tables)
}

/// Fetches pages and converts their tables
pub struct TableScraper {
    fetcher: PageFetcher,
    options: ExtractOptions,
}

impl TableScraper {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(TableScraper {
            fetcher: PageFetcher::new(&config.http)?,
            options: config.extract,
        })
    }

    pub fn with_fetcher(fetcher: PageFetcher, options: ExtractOptions) -> Self {
        TableScraper { fetcher, options }
    }

    /// Fetch `url` and return all of its tables
    pub fn get_tables(&self, url: &str) -> Result<Vec<LabeledTable>> {
        let html = self.fetcher.fetch(url)?;
        let tables = self.tables_from_html(&html)?;
        log::info!("Found {} tables at {}", tables.len(), url);
        Ok(tables)
    }

    pub fn tables_from_html(&self, html: &str) -> Result<Vec<LabeledTable>> {
        tables_from_html(html, &self.options)
    }

    /// Run the conversion on a saved HTML file
    pub fn tables_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<LabeledTable>> {
        let html = std::fs::read_to_string(path.as_ref())?;
        let tables = self.tables_from_html(&html)?;
        log::info!("Found {} tables in {}", tables.len(), path.as_ref().display());
        Ok(tables)
    }

    /// Fetch `url` and group its tables by search term.
    ///
    /// With no terms every table is returned unfiltered.
    pub fn find_tables(&self, url: &str, terms: &[String]) -> Result<SearchResult> {
        find_tables(self.get_tables(url)?, terms)
    }
}
