//! # Finder/Sorter
//!
//! Pure functions over an in-memory entry slice. No I/O.
//!
//! A query resolves in two steps:
//!
//! 1. [`search`]: blank term → everything, sorted; otherwise an exact
//!    case-insensitive name match or a miss.
//! 2. [`resolve_query`]: on a miss, fall back to [`find_partial`]
//!    (case-insensitive substring, source order). An empty match list is the
//!    "no results" state, not an error.

use std::cmp::Ordering;

use crate::api::Entry;

/// Outcome of [`search`].
#[derive(Debug, Clone, PartialEq)]
pub enum Search {
    /// Blank term: the whole collection, sorted by name.
    All(Vec<Entry>),
    /// Exactly one entry carries this name.
    Exact(Entry),
    Miss,
}

/// Outcome of [`resolve_query`], i.e. what the UI should show.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    All(Vec<Entry>),
    Single(Entry),
    /// Substring matches in source order. May be empty.
    Matches(Vec<Entry>),
}

/// Compares names the way a locale-aware collator would for plain Latin
/// text: case-insensitive first, then lowercase before uppercase.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);

    folded_a.cmp(folded_b).then_with(|| {
        for (x, y) in a.chars().zip(b.chars()) {
            if x != y {
                return match (x.is_lowercase(), y.is_lowercase()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => x.cmp(&y),
                };
            }
        }
        a.len().cmp(&b.len())
    })
}

/// Stable ascending sort by [`compare_names`].
pub fn sort_by_name(entries: &mut [Entry]) {
    entries.sort_by(|a, b| compare_names(&a.name, &b.name));
}

pub fn search(term: &str, entries: &[Entry]) -> Search {
    let term = term.trim();
    if term.is_empty() {
        let mut all = entries.to_vec();
        sort_by_name(&mut all);
        return Search::All(all);
    }

    match find_exact(term, entries) {
        Some(entry) => Search::Exact(entry.clone()),
        None => Search::Miss,
    }
}

/// First entry whose name equals `term`, ignoring case.
pub fn find_exact<'a>(term: &str, entries: &'a [Entry]) -> Option<&'a Entry> {
    let term = term.trim();
    entries.iter().find(|e| e.is_named(term))
}

/// Every entry whose name contains `term`, ignoring case, in source order.
pub fn find_partial(term: &str, entries: &[Entry]) -> Vec<Entry> {
    let needle = term.trim().to_lowercase();
    entries
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub fn resolve_query(term: &str, entries: &[Entry]) -> QueryOutcome {
    match search(term, entries) {
        Search::All(all) => QueryOutcome::All(all),
        Search::Exact(entry) => QueryOutcome::Single(entry),
        Search::Miss => QueryOutcome::Matches(find_partial(term, entries)),
    }
}

/// Distinct category names, compared case-insensitively, in first-seen
/// order and casing. Entries with an empty category are skipped.
pub fn categories(entries: &[Entry]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for entry in entries {
        if entry.category.is_empty() {
            continue;
        }
        if !seen.iter().any(|c| c.eq_ignore_ascii_case(&entry.category)) {
            seen.push(entry.category.clone());
        }
    }
    seen
}

/// "white-maned lynel" → "White-maned Lynel".
pub fn display_name(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
