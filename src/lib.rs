//! Basketball-reference table scraping
//!
//! Fetches stats pages, converts their HTML tables into [`LabeledTable`]s and
//! filters tables by column header.

pub mod fetch;
pub mod pipeline;
pub mod search;
pub mod table;
pub mod urls;

#[cfg(test)]
mod testutil;

pub use fetch::PageFetcher;
pub use pipeline::{tables_from_html, TableScraper};
pub use search::{find_header, find_tables, SearchResult};
pub use table::{ExtractOptions, HeaderSource, LabeledTable, RowPolicy, TablePolicy};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Structural section of an HTML table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Body,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Header => write!(f, "thead"),
            Section::Body => write!(f, "tbody"),
        }
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum BrefError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{status} error: page not found ({url})")]
    PageNotFound { status: u16, url: String },

    #[error("Unexpected HTTP status {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("No html tables found on page")]
    NoTablesFound,

    #[error("Table {index} has no <{section}> section")]
    MissingSection { section: Section, index: usize },

    #[error("Row {row} has {found} cells, expected {expected}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("No table has a column named {query:?}")]
    NoMatch { query: String },

    #[error("Invalid team abbreviation: {0}")]
    InvalidTeam(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BrefError {
    /// True for errors caused by the server answering with a non-200 status
    pub fn is_page_error(&self) -> bool {
        matches!(
            self,
            BrefError::PageNotFound { .. } | BrefError::UnexpectedStatus { .. }
        )
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            BrefError::PageNotFound { status, .. } | BrefError::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            BrefError::Request { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BrefError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub extract: ExtractOptions,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            user_agent: "bref/0.1".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            base_url: urls::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            http: HttpConfig::default(),
            extract: ExtractOptions::default(),
            site: SiteConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BrefError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| BrefError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &str) -> Result<Self> {
        if std::path::Path::new(path).exists() {
            Self::load(path)
        } else {
            log::debug!("No config at {}, using defaults", path);
            Ok(Config::default())
        }
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| BrefError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
