//! Line-oriented search session.
//!
//! Each input line is one command:
//!
//! - `/text` searches for `text` (`/` alone clears the search)
//! - `:case`, `:word`, `:regex` toggle the search flags
//! - `:clear` empties the log, `:quit` ends the session
//! - anything else is looked up as a shortcut, e.g. `Enter`, `Shift+F3`, `Esc`
//!
//! After every command the line holding the current match and the status
//! text are printed.

use super::render::render_current;
use crate::dispatch::{PaneCommand, PaneDispatcher};
use crate::highlight::HighlightStyle;
use crate::shortcuts::{SearchAction, ShortcutRegistry};
use anyhow::Result;
use std::io::{BufRead, Write};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Search(String),
    Action(SearchAction),
    ClearLog,
    Quit,
    /// Valid key combination with no binding.
    Unbound(String),
    /// Neither a command nor a key combination.
    Invalid(String),
    Blank,
}

/// Parse one input line.
pub fn parse_input(line: &str, registry: &ShortcutRegistry) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(text) = line.strip_prefix('/') {
        return Input::Search(text.to_string());
    }

    let trimmed = line.trim();
    match trimmed {
        "" => Input::Blank,
        ":case" => Input::Action(SearchAction::ToggleCaseSensitive),
        ":word" => Input::Action(SearchAction::ToggleWholeWord),
        ":regex" => Input::Action(SearchAction::ToggleRegex),
        ":clear" => Input::ClearLog,
        ":quit" | ":q" => Input::Quit,
        key => match registry.lookup(key) {
            Ok(Some(action)) => Input::Action(action),
            Ok(None) => Input::Unbound(key.to_string()),
            Err(e) => Input::Invalid(format!("{key}: {e}")),
        },
    }
}

/// Run commands from `input` against the pane until `:quit` or end of input.
pub fn run_session(
    dispatcher: &PaneDispatcher,
    registry: &ShortcutRegistry,
    style: &HighlightStyle,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        match parse_input(&line, registry) {
            Input::Search(text) => dispatcher.set_search_text(text)?,
            Input::Action(SearchAction::FocusSearch) => {
                writeln!(out, "search: type /text")?;
                continue;
            }
            Input::Action(action) => {
                dispatcher.perform(action)?;
            }
            Input::ClearLog => dispatcher.send(PaneCommand::Clear)?,
            Input::Quit => break,
            Input::Unbound(key) => {
                writeln!(out, "no action bound to {key}")?;
                continue;
            }
            Input::Invalid(message) => {
                writeln!(out, "unknown command: {message}")?;
                continue;
            }
            Input::Blank => continue,
        }

        let snapshot = dispatcher.snapshot()?;
        if let Some(line) = render_current(&snapshot.text, &snapshot.update, style) {
            writeln!(out, "{line}")?;
        }
        let flags = format_flags(&snapshot.query);
        let status = snapshot.update.status_text();
        if status.is_empty() {
            writeln!(out, "[{flags}]")?;
        } else {
            writeln!(out, "[{flags}] {status}")?;
        }
        out.flush()?;
    }
    Ok(())
}

fn format_flags(query: &crate::search::SearchQuery) -> String {
    let flag = |on: bool, name: &'static str| if on { name } else { "-" };
    format!(
        "{}{}{}",
        flag(query.case_sensitive, "C"),
        flag(query.whole_word, "W"),
        flag(query.use_regex, "R")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let registry = ShortcutRegistry::with_defaults();
        assert_eq!(
            parse_input("/error code", &registry),
            Input::Search("error code".to_string())
        );
        assert_eq!(parse_input("/", &registry), Input::Search(String::new()));
        assert_eq!(
            parse_input(":regex", &registry),
            Input::Action(SearchAction::ToggleRegex)
        );
        assert_eq!(parse_input(":q", &registry), Input::Quit);
        assert_eq!(parse_input("  ", &registry), Input::Blank);
    }

    #[test]
    fn test_parse_shortcuts() {
        let registry = ShortcutRegistry::with_defaults();
        assert_eq!(
            parse_input("Shift+F3", &registry),
            Input::Action(SearchAction::FindPrevious)
        );
        assert_eq!(
            parse_input("Ctrl+Q", &registry),
            Input::Unbound("Ctrl+Q".to_string())
        );
        assert!(matches!(parse_input("Ctrl+", &registry), Input::Invalid(_)));
    }

    #[test]
    fn test_flags_label() {
        let query = crate::search::SearchQuery::new("x").whole_word(true);
        assert_eq!(format_flags(&query), "-W-");
    }
}
