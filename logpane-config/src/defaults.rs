//! Default value functions for configuration.
//!
//! Each function is used as a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `Config` field.

use crate::types::{LogLevel, ShortcutBinding};

/// Maximum number of characters retained by the log pane.
pub const DEFAULT_BUFFER_CAPACITY: usize = 32_767;

pub fn buffer_capacity() -> usize {
    DEFAULT_BUFFER_CAPACITY
}

pub fn log_level() -> LogLevel {
    LogLevel::Info
}

pub fn bool_false() -> bool {
    false
}

// Search highlight colors
pub fn search_highlight_color() -> [u8; 3] {
    [102, 192, 244] // Light blue for every match
}

pub fn search_current_highlight_color() -> [u8; 3] {
    [57, 255, 221] // Bright cyan for the current match
}

/// Compiled-program size limit handed to the regex builder (1 MiB).
pub fn regex_size_limit() -> usize {
    1 << 20
}

pub fn shortcuts() -> Vec<ShortcutBinding> {
    vec![
        ShortcutBinding::new("Enter", "find_next"),
        ShortcutBinding::new("Shift+Enter", "find_previous"),
        ShortcutBinding::new("F3", "find_next"),
        ShortcutBinding::new("Shift+F3", "find_previous"),
        ShortcutBinding::new("Escape", "clear_search"),
        ShortcutBinding::new("Ctrl+F", "focus_search"),
    ]
}
