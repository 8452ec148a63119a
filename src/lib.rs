// Library exports for the logpane binary, embedding hosts and tests.
//
// The engine core (`buffer`, `search`, `pane`) is single-threaded and owns
// no locks. `dispatch` moves a pane onto its own thread; state shared
// between threads elsewhere uses `parking_lot` locks.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod buffer;
pub mod cli;
pub mod dispatch;
pub mod forwarder;
pub mod highlight;
pub mod log_bridge;
pub mod pane;
pub mod search;
pub mod shortcuts;

pub use buffer::{BufferChange, DEFAULT_BUFFER_CAPACITY, LogBuffer};
pub use dispatch::{DispatchError, LogProducer, PaneCommand, PaneDispatcher, PaneSnapshot};
pub use forwarder::{ForwarderSet, LogForwarder, PaneForwarder};
pub use highlight::{HighlightSink, HighlightStyle, NullSink, RecordingSink, SinkEvent};
pub use pane::LogPane;
pub use search::{
    MatchSpan, Matcher, MatcherError, NavigationCursor, SearchIndex, SearchQuery, SearchStatus,
    SearchUpdate, find_matches,
};
pub use shortcuts::{SearchAction, ShortcutRegistry};
