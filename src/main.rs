//! bref CLI
//!
//! Pull basketball-reference.com tables into the terminal as text, JSON or CSV.

use bref::{Config, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bref")]
#[command(about = "Scrape basketball-reference.com HTML tables", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every table on a page
    Tables {
        /// Absolute page URL
        url: String,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Find tables on a page by column header
    Search {
        /// Absolute page URL
        url: String,
        /// Column names to look for (case-insensitive, exact)
        #[arg(required = true)]
        terms: Vec<String>,
        /// Print each matching table once instead of grouping by term
        #[arg(long)]
        merge: bool,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Tables from a league season page
    League {
        /// Season, named by its ending year (default: current)
        #[arg(long)]
        season: Option<u16>,
        /// Column names to look for
        #[arg(long)]
        search: Vec<String>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Tables from a team season page
    Team {
        /// Three-letter franchise abbreviation, e.g. GSW
        team: String,
        /// Season, named by its ending year (default: current)
        #[arg(long)]
        season: Option<u16>,
        /// Column names to look for
        #[arg(long)]
        search: Vec<String>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Tables from a saved HTML file
    File {
        /// Path to the HTML file
        path: String,
        /// Column names to look for
        #[arg(long)]
        search: Vec<String>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Write a default config file
    Init,
}

#[derive(Clone, Copy, Debug)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let config = match Config::load_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Tables { url, format } => commands::tables(&config, &url, format),
        Commands::Search {
            url,
            terms,
            merge,
            format,
        } => commands::search(&config, &url, &terms, merge, format),
        Commands::League {
            season,
            search,
            format,
        } => commands::league(&config, season, &search, format),
        Commands::Team {
            team,
            season,
            search,
            format,
        } => commands::team(&config, &team, season, &search, format),
        Commands::File {
            path,
            search,
            format,
        } => commands::file(&config, &path, &search, format),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use bref::{find_tables, urls, LabeledTable, SearchResult, TableScraper};
    use std::io::Write;

    pub fn init(config_path: &str) -> Result<()> {
        Config::default().save(config_path)?;
        println!("Created default config at {}", config_path);
        Ok(())
    }

    pub fn tables(config: &Config, url: &str, format: OutputFormat) -> Result<()> {
        let scraper = TableScraper::new(config)?;
        let tables = scraper.get_tables(url)?;
        write_tables(
            &mut std::io::stdout().lock(),
            &tables.iter().collect::<Vec<_>>(),
            format,
        )
    }

    pub fn search(
        config: &Config,
        url: &str,
        terms: &[String],
        merge: bool,
        format: OutputFormat,
    ) -> Result<()> {
        let scraper = TableScraper::new(config)?;
        let result = scraper.find_tables(url, terms)?;
        write_search(&mut std::io::stdout().lock(), &result, merge, format)
    }

    pub fn league(
        config: &Config,
        season: Option<u16>,
        search: &[String],
        format: OutputFormat,
    ) -> Result<()> {
        let season = season.unwrap_or_else(urls::current_season);
        let url = urls::league_url(&config.site.base_url, season);
        fetch_and_print(config, &url, search, format)
    }

    pub fn team(
        config: &Config,
        team: &str,
        season: Option<u16>,
        search: &[String],
        format: OutputFormat,
    ) -> Result<()> {
        let season = season.unwrap_or_else(urls::current_season);
        let url = urls::team_url(&config.site.base_url, team, season)?;
        fetch_and_print(config, &url, search, format)
    }

    pub fn file(config: &Config, path: &str, search: &[String], format: OutputFormat) -> Result<()> {
        let scraper = TableScraper::new(config)?;
        let tables = scraper.tables_from_file(path)?;
        let result = find_tables(tables, search)?;
        write_search(&mut std::io::stdout().lock(), &result, false, format)
    }

    fn fetch_and_print(
        config: &Config,
        url: &str,
        search: &[String],
        format: OutputFormat,
    ) -> Result<()> {
        // stdout carries only the formatted tables
        log::info!("Fetching {}", url);
        let scraper = TableScraper::new(config)?;
        let result = scraper.find_tables(url, search)?;
        write_search(&mut std::io::stdout().lock(), &result, false, format)
    }

    pub(crate) fn write_search<W: Write>(
        out: &mut W,
        result: &SearchResult,
        merge: bool,
        format: OutputFormat,
    ) -> Result<()> {
        if merge || matches!(result, SearchResult::All(_)) {
            return write_tables(out, &result.merged(), format);
        }

        match format {
            OutputFormat::Json => {
                let grouped: serde_json::Map<String, serde_json::Value> = result
                    .by_term()
                    .into_iter()
                    .map(|(term, tables)| -> Result<(String, serde_json::Value)> {
                        Ok((term.to_string(), serde_json::to_value(tables)?))
                    })
                    .collect::<Result<_>>()?;
                writeln!(out, "{}", serde_json::to_string_pretty(&grouped)?)?;
            }
            _ => {
                for (term, tables) in result.by_term() {
                    writeln!(out, "== {} ({} tables)", term, tables.len())?;
                    write_tables(out, &tables, format)?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn write_tables<W: Write>(
        out: &mut W,
        tables: &[&LabeledTable],
        format: OutputFormat,
    ) -> Result<()> {
        match format {
            OutputFormat::Table => {
                for (i, table) in tables.iter().enumerate() {
                    write!(out, "{}", format_table(i, table))?;
                }
            }
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(tables)?)?;
            }
            OutputFormat::Csv => {
                for table in tables {
                    table.write_csv(&mut *out)?;
                    writeln!(out)?;
                }
            }
        }
        Ok(())
    }

    fn format_table(index: usize, table: &LabeledTable) -> String {
        let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
        for row in &table.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }

        let line = |cells: &[String]| {
            cells
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{:<width$}", c, width = widths[i]))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = format!(
            "\n#{} {} ({} columns, {} rows)\n",
            index,
            table.id.as_deref().unwrap_or("table"),
            table.column_count(),
            table.row_count()
        );
        out.push_str(&line(&table.columns));
        out.push('\n');
        out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
        out.push('\n');
        for row in &table.rows {
            out.push_str(&line(row));
            out.push('\n');
        }
        out
    }

}
