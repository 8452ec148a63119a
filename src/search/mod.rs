//! Log search functionality.
//!
//! This module provides incremental search over the bounded log buffer:
//! a matcher with literal, whole-word and regex modes, the search index that
//! keeps matches consistent with the buffer, and cyclic match navigation.

mod cursor;
mod engine;
mod index;
pub mod types;

pub use cursor::NavigationCursor;
pub use engine::{Matcher, MatcherError, find_matches};
pub use index::SearchIndex;
pub use types::{MatchSpan, SearchQuery, SearchStatus, SearchUpdate};
