//! Keyboard shortcuts for the search bar.
//!
//! Parses human-readable key strings like `"Shift+F3"` and maps them to
//! [`SearchAction`]s. Default bindings:
//!
//! - `Enter` / `F3`: next match
//! - `Shift+Enter` / `Shift+F3`: previous match
//! - `Escape`: clear the search
//! - `Ctrl+F`: focus the search box

use logpane_config::ShortcutBinding;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Error type for key parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ShortcutParseError(String);

/// What a shortcut asks the log pane to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchAction {
    FindNext,
    FindPrevious,
    ClearSearch,
    /// Presentation-only: move keyboard focus to the search box.
    FocusSearch,
    ToggleCaseSensitive,
    ToggleWholeWord,
    ToggleRegex,
}

impl SearchAction {
    /// Look up an action by its config name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "find_next" => Some(SearchAction::FindNext),
            "find_previous" => Some(SearchAction::FindPrevious),
            "clear_search" => Some(SearchAction::ClearSearch),
            "focus_search" => Some(SearchAction::FocusSearch),
            "toggle_case_sensitive" => Some(SearchAction::ToggleCaseSensitive),
            "toggle_whole_word" => Some(SearchAction::ToggleWholeWord),
            "toggle_regex" => Some(SearchAction::ToggleRegex),
            _ => None,
        }
    }
}

/// Set of active modifiers for a key combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
}

/// A named (non-character) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Escape,
    Tab,
    Space,
    Backspace,
    /// Function key `F1`..=`F12`.
    F(u8),
}

/// The actual key (either a character or a named key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedKey {
    /// A single character key, stored uppercase.
    Character(char),
    Named(NamedKey),
}

/// A parsed key combination (modifiers + key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub modifiers: Modifiers,
    pub key: ParsedKey,
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.alt {
            parts.push("Alt".to_string());
        }
        if self.modifiers.shift {
            parts.push("Shift".to_string());
        }
        if self.modifiers.super_key {
            parts.push("Super".to_string());
        }

        match self.key {
            ParsedKey::Character(c) => parts.push(c.to_string()),
            ParsedKey::Named(NamedKey::F(n)) => parts.push(format!("F{n}")),
            ParsedKey::Named(n) => parts.push(format!("{n:?}")),
        }

        write!(f, "{}", parts.join("+"))
    }
}

/// Parse a shortcut string such as `"Shift+F3"` or `"Ctrl+F"`.
///
/// The last `+`-separated part is the key (a single character or `Enter`,
/// `Escape`, `Tab`, `Space`, `Backspace`, `F1`-`F12`); everything before it
/// must be a modifier: `Ctrl`, `Alt`, `Shift` or `Super` (`Cmd`).
pub fn parse_key_combo(s: &str) -> Result<KeyCombo, ShortcutParseError> {
    let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
    let key_str = parts
        .pop()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| ShortcutParseError(format!("Shortcut '{s}' has no key")))?;

    let mut modifiers = Modifiers::default();
    for part in parts {
        let flag = match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => &mut modifiers.ctrl,
            "alt" => &mut modifiers.alt,
            "shift" => &mut modifiers.shift,
            "super" | "cmd" => &mut modifiers.super_key,
            _ => {
                return Err(ShortcutParseError(format!(
                    "'{part}' in shortcut '{s}' is not a modifier"
                )));
            }
        };
        *flag = true;
    }

    let key = parse_key(key_str)?;
    Ok(KeyCombo { modifiers, key })
}

/// Parse a key string into a ParsedKey.
fn parse_key(s: &str) -> Result<ParsedKey, ShortcutParseError> {
    if let Some(named) = parse_named_key(s) {
        return Ok(ParsedKey::Named(named));
    }

    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(ParsedKey::Character(c.to_ascii_uppercase()));
    }

    Err(ShortcutParseError(format!("Unknown key: '{}'", s)))
}

fn parse_named_key(s: &str) -> Option<NamedKey> {
    let lower = s.to_lowercase();
    match lower.as_str() {
        "enter" | "return" => Some(NamedKey::Enter),
        "escape" | "esc" => Some(NamedKey::Escape),
        "tab" => Some(NamedKey::Tab),
        "space" => Some(NamedKey::Space),
        "backspace" => Some(NamedKey::Backspace),
        _ => lower
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(NamedKey::F),
    }
}

/// Registry of search shortcuts mapping key combinations to actions.
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    bindings: HashMap<KeyCombo, SearchAction>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from config bindings.
    ///
    /// Invalid key strings and unknown action names are logged and skipped.
    pub fn from_config(bindings: &[ShortcutBinding]) -> Self {
        let mut registry = Self::new();
        for binding in bindings {
            let Some(action) = SearchAction::from_name(&binding.action) else {
                log::warn!(
                    "Unknown search action '{}' for shortcut '{}'",
                    binding.action,
                    binding.key
                );
                continue;
            };
            match parse_key_combo(&binding.key) {
                Ok(combo) => {
                    log::debug!("Registered shortcut: {} -> {:?}", combo, action);
                    registry.bindings.insert(combo, action);
                }
                Err(e) => {
                    log::warn!(
                        "Invalid shortcut '{}' for action '{}': {}",
                        binding.key,
                        binding.action,
                        e
                    );
                }
            }
        }
        registry
    }

    /// Registry with the built-in bindings.
    pub fn with_defaults() -> Self {
        Self::from_config(&logpane_config::defaults::shortcuts())
    }

    /// Action bound to `combo`, if any.
    pub fn action_for(&self, combo: &KeyCombo) -> Option<SearchAction> {
        self.bindings.get(combo).copied()
    }

    /// Parse `key` and look up its action.
    pub fn lookup(&self, key: &str) -> Result<Option<SearchAction>, ShortcutParseError> {
        Ok(self.action_for(&parse_key_combo(key)?))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
