//! Presentation-side interface for search highlighting.
//!
//! The engine never renders. It hands declarative [`SearchUpdate`] values
//! and "emphasize this span" requests to a [`HighlightSink`], which turns
//! them into decoration and scroll-into-view in whatever UI hosts the pane.

use crate::search::{MatchSpan, SearchUpdate};
use logpane_config::SearchConfig;
use parking_lot::Mutex;
use std::sync::Arc;

/// Receives search state changes from the log pane.
pub trait HighlightSink: Send {
    /// Apply a state change.
    ///
    /// `update.matches` is the complete match list: decorations from earlier
    /// updates must be replaced, not merged.
    fn publish(&mut self, update: &SearchUpdate);

    /// Emphasize the match at `index` and scroll it into view.
    ///
    /// Called exactly once per transition onto a match.
    fn emphasize(&mut self, index: usize, span: MatchSpan);
}

/// Sink that discards everything (headless use).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl HighlightSink for NullSink {
    fn publish(&mut self, _update: &SearchUpdate) {}
    fn emphasize(&mut self, _index: usize, _span: MatchSpan) {}
}

/// Highlight colours for matches, as RGB triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightStyle {
    /// Background for every match.
    pub match_color: [u8; 3],
    /// Background for the current match.
    pub current_color: [u8; 3],
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for HighlightStyle {
    fn from(config: &SearchConfig) -> Self {
        Self {
            match_color: config.highlight_color,
            current_color: config.current_highlight_color,
        }
    }
}

/// A single call observed by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Published(SearchUpdate),
    Emphasized { index: usize, span: MatchSpan },
}

/// Sink that records every call, for embedding hosts that poll and for tests.
///
/// Clones share the same event log.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events recorded so far.
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().clone()
    }

    /// Remove and return all events recorded so far.
    pub fn take(&self) -> Vec<SinkEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Most recent published update.
    pub fn last_update(&self) -> Option<SearchUpdate> {
        self.events.lock().iter().rev().find_map(|event| match event {
            SinkEvent::Published(update) => Some(update.clone()),
            SinkEvent::Emphasized { .. } => None,
        })
    }
}

impl HighlightSink for RecordingSink {
    fn publish(&mut self, update: &SearchUpdate) {
        self.events.lock().push(SinkEvent::Published(update.clone()));
    }

    fn emphasize(&mut self, index: usize, span: MatchSpan) {
        self.events.lock().push(SinkEvent::Emphasized { index, span });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchStatus;

    #[test]
    fn test_style_from_config() {
        let config = SearchConfig {
            highlight_color: [1, 2, 3],
            ..SearchConfig::default()
        };
        let style = HighlightStyle::from(&config);
        assert_eq!(style.match_color, [1, 2, 3]);
        assert_eq!(style.current_color, [57, 255, 221]);
    }

    #[test]
    fn test_recording_sink_shares_log_between_clones() {
        let sink = RecordingSink::new();
        let mut writer = sink.clone();
        writer.emphasize(0, MatchSpan::new(4, 2));
        writer.publish(&SearchUpdate {
            status: SearchStatus::NoMatches,
            matches: Arc::from([]),
            current: None,
            matches_changed: true,
        });

        assert_eq!(sink.events().len(), 2);
        assert_eq!(
            sink.last_update().map(|u| u.status),
            Some(SearchStatus::NoMatches)
        );
        assert_eq!(sink.take().len(), 2);
        assert!(sink.events().is_empty());
    }
}
