//! Header search over already-converted tables
//!
//! Matching is case-insensitive and exact: `"ortg"` finds a column named
//! `"ORtg"`, but `"rtg"` does not.

use crate::{BrefError, LabeledTable, Result};
use std::collections::BTreeMap;

/// Tables with a column named `query`, in their original order
pub fn find_header<'a>(query: &str, tables: &'a [LabeledTable]) -> Result<Vec<&'a LabeledTable>> {
    let found: Vec<_> = tables.iter().filter(|t| t.has_column(query)).collect();

    if found.is_empty() {
        return Err(BrefError::NoMatch {
            query: query.to_string(),
        });
    }

    Ok(found)
}

/// Outcome of a multi-term search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    /// No terms were given; every table, unfiltered
    All(Vec<LabeledTable>),
    /// Indices into `tables` for each search term, keyed by the lowercased term
    ByTerm {
        tables: Vec<LabeledTable>,
        matches: BTreeMap<String, Vec<usize>>,
    },
}

impl SearchResult {
    /// Tables matching `term`, ignoring case. Empty for unknown terms and for `All`.
    pub fn for_term(&self, term: &str) -> Vec<&LabeledTable> {
        match self {
            SearchResult::All(_) => Vec::new(),
            SearchResult::ByTerm { tables, matches } => matches
                .get(&term.to_lowercase())
                .map(|idxs| idxs.iter().filter_map(|&i| tables.get(i)).collect())
                .unwrap_or_default(),
        }
    }

    /// Every table matched by at least one term, once each, in page order
    pub fn merged(&self) -> Vec<&LabeledTable> {
        match self {
            SearchResult::All(tables) => tables.iter().collect(),
            SearchResult::ByTerm { tables, matches } => {
                let mut idxs: Vec<usize> = matches.values().flatten().copied().collect();
                idxs.sort_unstable();
                idxs.dedup();
                idxs.into_iter().filter_map(|i| tables.get(i)).collect()
            }
        }
    }

    /// Lowercased search terms in sorted order with their matching tables
    pub fn by_term(&self) -> Vec<(&str, Vec<&LabeledTable>)> {
        match self {
            SearchResult::All(_) => Vec::new(),
            SearchResult::ByTerm { matches, .. } => matches
                .keys()
                .map(|term| (term.as_str(), self.for_term(term)))
                .collect(),
        }
    }
}

/// Group `tables` by which of `terms` they contain as a column.
///
/// Terms are grouped case-insensitively, so `"pace"` and `"Pace"` share one
/// entry. A term with no hits maps to an empty list; only when no term hits
/// anything is `NoMatch` returned.
pub fn find_tables(tables: Vec<LabeledTable>, terms: &[String]) -> Result<SearchResult> {
    if terms.is_empty() {
        return Ok(SearchResult::All(tables));
    }

    let mut matches = BTreeMap::new();
    for term in terms {
        let key = term.to_lowercase();
        if matches.contains_key(&key) {
            continue;
        }
        let idxs: Vec<usize> = tables
            .iter()
            .enumerate()
            .filter(|(_, t)| t.has_column(term))
            .map(|(i, _)| i)
            .collect();
        log::debug!("Term {:?} matched {} tables", term, idxs.len());
        matches.insert(key, idxs);
    }

    if matches.values().all(Vec::is_empty) {
        return Err(BrefError::NoMatch {
            query: terms.join(", "),
        });
    }

    Ok(SearchResult::ByTerm { tables, matches })
}
