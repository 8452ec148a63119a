//! The log pane engine: buffer, search state and highlight output.
//!
//! [`LogPane`] is a plain owned object with no UI-framework dependency. It
//! is driven from a single thread (see [`crate::dispatch`] for marshalling
//! concurrent producers onto one) and reports every state change to its
//! [`HighlightSink`].

use crate::buffer::LogBuffer;
use crate::highlight::{HighlightSink, NullSink};
use crate::search::{Matcher, MatchSpan, SearchIndex, SearchQuery, SearchStatus, SearchUpdate};
use logpane_config::Config;

/// Bounded log text with incremental search.
pub struct LogPane {
    buffer: LogBuffer,
    index: SearchIndex,
    sink: Box<dyn HighlightSink>,
}

impl std::fmt::Debug for LogPane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogPane")
            .field("buffer", &self.buffer)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl LogPane {
    /// Create an empty pane retaining at most `capacity` characters.
    pub fn new(capacity: usize, sink: Box<dyn HighlightSink>) -> Self {
        Self {
            buffer: LogBuffer::new(capacity),
            index: SearchIndex::new(),
            sink,
        }
    }

    /// Create a pane that reports to nothing.
    pub fn headless(capacity: usize) -> Self {
        Self::new(capacity, Box::new(NullSink))
    }

    /// Create a pane using the configured capacity, pattern size limit and
    /// default search flags.
    pub fn from_config(config: &Config, sink: Box<dyn HighlightSink>) -> Self {
        let mut index =
            SearchIndex::with_matcher(Matcher::with_size_limit(config.search.regex_size_limit));
        // No text yet, so this only seeds the flags
        index.set_query(
            SearchQuery {
                text: String::new(),
                case_sensitive: config.search.case_sensitive,
                whole_word: config.search.whole_word,
                use_regex: config.search.use_regex,
            },
            "",
        );
        Self {
            buffer: LogBuffer::new(config.buffer_capacity),
            index,
            sink,
        }
    }

    // === Ingestion ===

    /// Append log text. An active search is recomputed from scratch.
    pub fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let change = self.buffer.append(text);
        if self.index.on_buffer_changed(change, self.buffer.snapshot()) {
            self.emit(true);
        }
    }

    /// Empty the log. Any active search is dropped.
    pub fn clear(&mut self) {
        let change = self.buffer.clear();
        self.index.on_buffer_changed(change, self.buffer.snapshot());
        self.index.clear();
        self.emit(true);
    }

    // === Query interface ===

    /// Search for `text` with the current flags.
    ///
    /// Empty text clears the search; text equal to the active query is a no-op.
    pub fn set_search_text(&mut self, text: &str) {
        if text.is_empty() {
            self.clear_search();
            return;
        }
        if text == self.index.query().text {
            return;
        }

        let query = SearchQuery {
            text: text.to_string(),
            ..self.index.query().clone()
        };
        self.index.set_query(query, self.buffer.snapshot());
        self.emit(true);
    }

    pub fn toggle_case_sensitive(&mut self) {
        if self.index.toggle_case_sensitive(self.buffer.snapshot()) {
            self.emit(true);
        }
    }

    pub fn toggle_whole_word(&mut self) {
        if self.index.toggle_whole_word(self.buffer.snapshot()) {
            self.emit(true);
        }
    }

    pub fn toggle_regex(&mut self) {
        if self.index.toggle_regex(self.buffer.snapshot()) {
            self.emit(true);
        }
    }

    /// Move to the next match (wrapping). Returns the new current match.
    pub fn find_next(&mut self) -> Option<MatchSpan> {
        self.index.next()?;
        self.emit(false);
        self.index.current_match()
    }

    /// Move to the previous match (wrapping). Returns the new current match.
    pub fn find_previous(&mut self) -> Option<MatchSpan> {
        self.index.previous()?;
        self.emit(false);
        self.index.current_match()
    }

    /// Drop the active search; flags are kept.
    pub fn clear_search(&mut self) {
        self.index.clear();
        self.emit(true);
    }

    fn emit(&mut self, matches_changed: bool) {
        let update = self.index.update(matches_changed);
        self.sink.publish(&update);
        if let (Some(index), Some(span)) = (update.current, update.current_match()) {
            self.sink.emphasize(index, span);
        }
    }

    // === Accessors ===

    pub fn text(&self) -> &str {
        self.buffer.snapshot()
    }

    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
    }

    pub fn query(&self) -> &SearchQuery {
        self.index.query()
    }

    pub fn status(&self) -> SearchStatus {
        self.index.status()
    }

    pub fn matches(&self) -> &[MatchSpan] {
        self.index.matches()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.index.current_index()
    }

    pub fn current_match(&self) -> Option<MatchSpan> {
        self.index.current_match()
    }

    /// Current state as it would be published.
    pub fn update(&self) -> SearchUpdate {
        self.index.update(false)
    }
}
