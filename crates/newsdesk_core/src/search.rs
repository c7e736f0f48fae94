//! crates/newsdesk_core/src/search.rs
//!
//! Pure, in-memory keyword search over extracted document text.
//!
//! Two modes exist, matching the two result shapes of the API:
//! whole-document snippets (one hit per document, used for catalog-wide
//! scans) and per-page line hits (unbounded, used when a single document
//! is searched).

/// Characters of context kept on each side of a whole-document match.
const SNIPPET_CONTEXT: usize = 50;

/// One per-page search result: the 1-based page number and the trimmed
/// line that contained the term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHit {
    pub page: usize,
    pub line: String,
}

/// Case-insensitive substring search, returning the char index of the
/// first occurrence. Naive scan; corpora here are single documents, not
/// archives, so there is no need for anything cleverer.
pub fn find_ci(text: &str, term: &str) -> Option<usize> {
    let haystack: Vec<char> = text.chars().collect();
    let needle: Vec<char> = term.chars().collect();
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&i| {
        haystack[i..i + needle.len()]
            .iter()
            .zip(&needle)
            .all(|(&a, &b)| chars_eq_ci(a, b))
    })
}

fn chars_eq_ci(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Whole-document mode: a single snippet around the first occurrence of
/// `term`, spanning up to 50 characters on each side, with internal
/// whitespace runs collapsed to single spaces. `None` when the term does
/// not occur.
pub fn first_match_snippet(text: &str, term: &str) -> Option<String> {
    let idx = find_ci(text, term)?;
    let chars: Vec<char> = text.chars().collect();
    let start = idx.saturating_sub(SNIPPET_CONTEXT);
    let end = (idx + term.chars().count() + SNIPPET_CONTEXT).min(chars.len());
    let raw: String = chars[start..end].iter().collect();
    Some(raw.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Per-page mode: one hit for every line that contains `term`, tagged
/// with its 1-based page number. Returns an empty list when nothing
/// matches.
pub fn page_hits(pages: &[String], term: &str) -> Vec<PageHit> {
    pages
        .iter()
        .enumerate()
        .flat_map(|(page_index, page)| {
            page.lines()
                .filter(|line| find_ci(line, term).is_some())
                .map(move |line| PageHit {
                    page: page_index + 1,
                    line: line.trim().to_string(),
                })
        })
        .collect()
}
