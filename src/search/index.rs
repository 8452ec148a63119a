//! Search state bound to the log buffer.
//!
//! [`SearchIndex`] owns the active [`SearchQuery`], the match list computed
//! for the current buffer snapshot, and the [`NavigationCursor`] into it.
//! Any change to the query, its flags, or the buffer content replaces all
//! three together: the match list is recomputed from scratch and the cursor
//! returns to the first match. Offsets are never shifted in place, because
//! an eviction moves every surviving character.

use super::cursor::NavigationCursor;
use super::engine::Matcher;
use super::types::{MatchSpan, SearchQuery, SearchStatus, SearchUpdate};
use crate::buffer::BufferChange;
use std::sync::Arc;

/// Query, matches and cursor for one buffer.
#[derive(Debug)]
pub struct SearchIndex {
    query: SearchQuery,
    matches: Arc<[MatchSpan]>,
    cursor: NavigationCursor,
    matcher: Matcher,
    status: SearchStatus,
    /// Compile error for the current pattern (if any).
    pattern_error: Option<String>,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::with_matcher(Matcher::new())
    }

    pub fn with_matcher(matcher: Matcher) -> Self {
        Self {
            query: SearchQuery::default(),
            matches: Arc::from([]),
            cursor: NavigationCursor::new(),
            matcher,
            status: SearchStatus::Inactive,
            pattern_error: None,
        }
    }

    /// Replace the query and recompute against `text`.
    pub fn set_query(&mut self, query: SearchQuery, text: &str) -> SearchStatus {
        self.query = query;
        self.recompute(text)
    }

    /// React to a buffer mutation.
    ///
    /// Returns `true` when the match list was replaced.
    pub fn on_buffer_changed(&mut self, change: BufferChange, text: &str) -> bool {
        match change {
            BufferChange::Cleared => {
                self.on_buffer_cleared();
                true
            }
            BufferChange::Appended { .. } if self.query.is_empty() => false,
            BufferChange::Appended { evicted } => {
                log::trace!(
                    "Buffer changed under active search ({} chars evicted), recomputing",
                    evicted
                );
                self.recompute(text);
                true
            }
        }
    }

    /// Drop all matches after the buffer was emptied. The query is kept.
    pub fn on_buffer_cleared(&mut self) {
        self.matches = Arc::from([]);
        self.cursor.reset(0);
        self.pattern_error = None;
        self.status = if self.query.is_empty() {
            SearchStatus::Inactive
        } else {
            SearchStatus::NoMatches
        };
    }

    /// Deactivate the search: empty query text, no matches. Flags survive.
    pub fn clear(&mut self) {
        self.query.text.clear();
        self.on_buffer_cleared();
    }

    /// Flip case sensitivity; recomputes when a query is active.
    pub fn toggle_case_sensitive(&mut self, text: &str) -> bool {
        self.toggle(text, |q| q.case_sensitive = !q.case_sensitive)
    }

    /// Flip whole-word mode; recomputes when a query is active.
    pub fn toggle_whole_word(&mut self, text: &str) -> bool {
        self.toggle(text, |q| q.whole_word = !q.whole_word)
    }

    /// Flip regex mode; recomputes when a query is active.
    pub fn toggle_regex(&mut self, text: &str) -> bool {
        self.toggle(text, |q| q.use_regex = !q.use_regex)
    }

    fn toggle(&mut self, text: &str, flip: impl FnOnce(&mut SearchQuery)) -> bool {
        let mut query = self.query.clone();
        flip(&mut query);
        if query.is_empty() {
            self.query = query;
            return false;
        }
        self.set_query(query, text);
        true
    }

    /// Advance to the next match (wrapping). `None` when there are no matches.
    pub fn next(&mut self) -> Option<usize> {
        let index = self.cursor.next()?;
        self.status = self.positioned(index);
        Some(index)
    }

    /// Step back to the previous match (wrapping). `None` when there are no matches.
    pub fn previous(&mut self) -> Option<usize> {
        let index = self.cursor.previous()?;
        self.status = self.positioned(index);
        Some(index)
    }

    fn positioned(&self, current: usize) -> SearchStatus {
        SearchStatus::Positioned {
            current,
            total: self.matches.len(),
        }
    }

    fn recompute(&mut self, text: &str) -> SearchStatus {
        self.pattern_error = None;

        if self.query.is_empty() {
            self.on_buffer_cleared();
            return self.status;
        }

        self.matches = match self.matcher.find(text, &self.query) {
            Ok(found) => found.into(),
            Err(e) => {
                log::debug!("{}", e);
                self.pattern_error = Some(e.to_string());
                Arc::from([])
            }
        };

        self.status = match self.cursor.reset(self.matches.len()) {
            Some(index) => self.positioned(index),
            None if self.pattern_error.is_some() => SearchStatus::InvalidPattern,
            None => SearchStatus::NoMatches,
        };

        log::debug!(
            "Search '{}' ({}, case_sensitive={}) found {} matches",
            self.query.text,
            self.query.mode_label(),
            self.query.case_sensitive,
            self.matches.len()
        );
        self.status
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Whether a non-empty query is active.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn matches(&self) -> &[MatchSpan] {
        &self.matches
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.cursor.current()
    }

    pub fn current_match(&self) -> Option<MatchSpan> {
        self.cursor
            .current()
            .and_then(|i| self.matches.get(i).copied())
    }

    pub fn cursor(&self) -> &NavigationCursor {
        &self.cursor
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Compile error message for the current pattern, if it failed.
    pub fn pattern_error(&self) -> Option<&str> {
        self.pattern_error.as_deref()
    }

    /// Snapshot the state for the presentation layer.
    pub fn update(&self, matches_changed: bool) -> SearchUpdate {
        SearchUpdate {
            status: self.status,
            matches: Arc::clone(&self.matches),
            current: self.cursor.current(),
            matches_changed,
        }
    }
}
