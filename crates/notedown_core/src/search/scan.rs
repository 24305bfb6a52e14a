//! Case-insensitive text search over the in-memory note collection.
//!
//! # Responsibility
//! - Match a query against note titles and contents.
//! - Return typed hits with stable ids and a bounded snippet.
//!
//! # Invariants
//! - Matching never fails: the query text is escaped before compilation,
//!   so no user input is interpreted as pattern syntax.
//! - Hit order follows the input collection order; the service hands the
//!   collection over newest-first.

use crate::model::note::{Note, NoteId};
use regex::RegexBuilder;

const SEARCH_DEFAULT_LIMIT: u32 = 20;
const SEARCH_LIMIT_MAX: u32 = 100;
/// Chars of context kept on each side of the first match.
const SNIPPET_CONTEXT_CHARS: usize = 30;

/// Search options for collection scans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// User query text; matched case-insensitively as a literal.
    pub text: String,
    /// Maximum hits to return. Defaults to 20 and clamps to 100.
    pub limit: Option<u32>,
}

/// One search match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Stable note id.
    pub note_id: NoteId,
    /// Title of the matched note.
    pub title: String,
    /// Content excerpt around the first match, or the content head for
    /// title-only matches. Truncation is marked with `...`.
    pub snippet: String,
}

/// Normalizes the search limit according to the search contract.
#[must_use]
pub fn normalize_search_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) => SEARCH_DEFAULT_LIMIT,
        Some(value) if value > SEARCH_LIMIT_MAX => SEARCH_LIMIT_MAX,
        Some(value) => value,
        None => SEARCH_DEFAULT_LIMIT,
    }
}

/// Scans `notes` for the query text in title or content.
///
/// A blank query yields no hits. Matching is a case-insensitive literal
/// substring comparison over both fields.
#[must_use]
pub fn search_notes(notes: &[Note], query: &SearchQuery) -> Vec<SearchHit> {
    let needle = query.text.trim();
    if needle.is_empty() {
        return Vec::new();
    }

    let Ok(matcher) = RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    else {
        // Escaped literals always compile; guarded anyway so a regex-crate
        // surprise degrades to "no hits" instead of failing the caller.
        return Vec::new();
    };

    let limit = normalize_search_limit(query.limit) as usize;
    let mut hits = Vec::new();
    for note in notes {
        if hits.len() >= limit {
            break;
        }
        let content_match = matcher.find(&note.content);
        let title_match = content_match.is_none() && matcher.is_match(&note.title);
        if content_match.is_none() && !title_match {
            continue;
        }
        let snippet = match content_match {
            Some(found) => snippet_around(&note.content, found.start(), found.end()),
            None => snippet_around(&note.content, 0, 0),
        };
        hits.push(SearchHit {
            note_id: note.id,
            title: note.title.clone(),
            snippet,
        });
    }

    hits
}

/// Builds a bounded excerpt around the byte range `[start, end)`.
fn snippet_around(content: &str, start: usize, end: usize) -> String {
    let window_start = step_chars_back(content, start, SNIPPET_CONTEXT_CHARS);
    let window_end = step_chars_forward(content, end, SNIPPET_CONTEXT_CHARS);

    let mut snippet = String::new();
    if window_start > 0 {
        snippet.push_str("...");
    }
    snippet.push_str(content[window_start..window_end].trim_matches('\n'));
    if window_end < content.len() {
        snippet.push_str("...");
    }
    snippet
}

/// Byte offset `count` chars before `from`, stopping at the buffer start.
fn step_chars_back(content: &str, from: usize, count: usize) -> usize {
    content[..from]
        .char_indices()
        .rev()
        .take(count)
        .last()
        .map_or(from, |(byte, _)| byte)
}

/// Byte offset `count` chars after `from`, stopping at the buffer end.
fn step_chars_forward(content: &str, from: usize, count: usize) -> usize {
    content[from..]
        .char_indices()
        .nth(count)
        .map_or(content.len(), |(byte, _)| from + byte)
}
