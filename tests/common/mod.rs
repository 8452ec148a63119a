//! Shared integration test helpers for logpane.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{recording_pane, expected_tail};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use logpane::{LogPane, RecordingSink, SinkEvent};
use logpane_config::Config;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A pane of `capacity` chars whose highlight output is recorded.
pub fn recording_pane(capacity: usize) -> (LogPane, RecordingSink) {
    let sink = RecordingSink::new();
    let pane = LogPane::new(capacity, Box::new(sink.clone()));
    (pane, sink)
}

/// The last `capacity` characters of all `parts` joined together.
pub fn expected_tail(parts: &[&str], capacity: usize) -> String {
    let all: String = parts.concat();
    let len = all.chars().count();
    all.chars().skip(len.saturating_sub(capacity)).collect()
}

/// Number of emphasize calls among `events`.
pub fn emphasize_count(events: &[SinkEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, SinkEvent::Emphasized { .. }))
        .count()
}

/// Writes `contents` to `name` inside a fresh temp dir.
///
/// The `TempDir` must be kept alive until the file has been read.
pub fn temp_file(name: &str, contents: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write temp file");
    (path, temp_dir)
}

/// Saves `config` as YAML inside a fresh temp dir and returns its path.
pub fn config_file(config: &Config) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    config.save_to(&path).expect("Failed to save config");
    (path, temp_dir)
}
