//! Types for log search functionality.

use std::fmt;
use std::sync::Arc;

/// A single match in the log buffer, in character coordinates.
///
/// Spans are valid only for the buffer content they were computed against;
/// any later append or clear makes them stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MatchSpan {
    /// Offset of the first matched character.
    pub start: usize,
    /// Length of the match in characters (always > 0).
    pub length: usize,
}

impl MatchSpan {
    /// Create a new match span.
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Offset one past the last matched character.
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// A search request: text plus mode flags.
///
/// Replaced wholesale whenever the text or any flag changes. Empty `text`
/// means no search is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub case_sensitive: bool,
    /// Ignored when `use_regex` is set.
    pub whole_word: bool,
    pub use_regex: bool,
}

impl SearchQuery {
    /// Literal, case-insensitive query for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn case_sensitive(mut self, on: bool) -> Self {
        self.case_sensitive = on;
        self
    }

    pub fn whole_word(mut self, on: bool) -> Self {
        self.whole_word = on;
        self
    }

    pub fn regex(mut self, on: bool) -> Self {
        self.use_regex = on;
        self
    }

    /// Whether this query represents "no active search".
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Short mode description for log output.
    pub(crate) fn mode_label(&self) -> &'static str {
        match (self.use_regex, self.whole_word) {
            (true, _) => "regex",
            (false, true) => "whole-word",
            (false, false) => "literal",
        }
    }
}

/// What the status line should say about the current search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// No query is active; the status line is blank.
    Inactive,
    /// A non-empty query produced zero matches.
    NoMatches,
    /// Regex mode with a pattern that failed to compile.
    InvalidPattern,
    /// `current` (0-based) of `total` matches is emphasized.
    Positioned { current: usize, total: usize },
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStatus::Inactive => Ok(()),
            SearchStatus::NoMatches => f.write_str("No matches found"),
            SearchStatus::InvalidPattern => f.write_str("Invalid regex pattern"),
            SearchStatus::Positioned { current, total } => {
                write!(f, "{} of {}", current + 1, total)
            }
        }
    }
}

/// Declarative search state handed to the presentation layer.
///
/// `matches` always carries the full match list; the receiver must replace
/// its decorations with it rather than merge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchUpdate {
    pub status: SearchStatus,
    pub matches: Arc<[MatchSpan]>,
    /// Index of the emphasized match; `None` is the "no match" sentinel.
    pub current: Option<usize>,
    /// True when the match list was recomputed, false when only `current` moved.
    pub matches_changed: bool,
}

impl SearchUpdate {
    /// Text for the status label.
    pub fn status_text(&self) -> String {
        self.status.to_string()
    }

    /// The emphasized span, if any.
    pub fn current_match(&self) -> Option<MatchSpan> {
        self.current.and_then(|i| self.matches.get(i).copied())
    }
}
