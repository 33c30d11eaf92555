//! basketball-reference.com page URLs

use crate::{BrefError, Result};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

pub const DEFAULT_BASE_URL: &str = "https://www.basketball-reference.com";

/// Season summary page, e.g. `/leagues/NBA_2025.html`
pub fn league_url(base: &str, season: u16) -> String {
    format!("{}/leagues/NBA_{}.html", base.trim_end_matches('/'), season)
}

/// Team season page, e.g. `/teams/GSW/2025.html`
pub fn team_url(base: &str, team: &str, season: u16) -> Result<String> {
    let abbr = normalize_team(team)?;
    Ok(format!(
        "{}/teams/{}/{}.html",
        base.trim_end_matches('/'),
        abbr,
        season
    ))
}

fn team_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]{3}$").unwrap())
}

/// Upper-case a three-letter franchise abbreviation
fn normalize_team(team: &str) -> Result<String> {
    let trimmed = team.trim();

    if !team_pattern().is_match(trimmed) {
        return Err(BrefError::InvalidTeam(team.to_string()));
    }

    Ok(trimmed.to_uppercase())
}

/// Season (named by its ending year) that is in progress on `date`
pub fn season_for(date: NaiveDate) -> u16 {
    // Regular season tips off in October
    let year = if date.month() >= 10 {
        date.year() + 1
    } else {
        date.year()
    };
    u16::try_from(year).unwrap_or(u16::MAX)
}

pub fn current_season() -> u16 {
    season_for(chrono::Local::now().date_naive())
}
