//! Serialized access to a [`LogPane`] from many threads.
//!
//! A [`PaneDispatcher`] moves the pane onto a dedicated thread and feeds it
//! [`PaneCommand`]s over an unbounded channel. Producers append through
//! cloneable [`LogProducer`] handles, and the operator-facing layer sends
//! search commands through the dispatcher itself, so every buffer mutation,
//! recomputation and highlight call happens on that one thread.
//!
//! Producers never block and never see search failures: if the pane has
//! stopped, appended text is dropped.

use crate::pane::LogPane;
use crate::search::{SearchQuery, SearchUpdate};
use crate::shortcuts::SearchAction;
use anyhow::{Context, Result};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// Errors from talking to the dispatch thread.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The dispatch thread is no longer receiving commands.
    #[error("log pane dispatch thread has stopped")]
    Disconnected,
    /// The dispatch thread panicked.
    #[error("log pane dispatch thread panicked")]
    Panicked,
}

/// A request for the dispatch thread.
#[derive(Debug)]
pub enum PaneCommand {
    Append(String),
    Clear,
    SetSearchText(String),
    ToggleCaseSensitive,
    ToggleWholeWord,
    ToggleRegex,
    FindNext,
    FindPrevious,
    ClearSearch,
    /// Reply with the pane state after all earlier commands.
    Snapshot(Sender<PaneSnapshot>),
    /// Stop after all earlier commands.
    Shutdown,
}

impl PaneCommand {
    /// Command for a shortcut action; `None` for presentation-only actions.
    pub fn from_action(action: SearchAction) -> Option<Self> {
        match action {
            SearchAction::FindNext => Some(PaneCommand::FindNext),
            SearchAction::FindPrevious => Some(PaneCommand::FindPrevious),
            SearchAction::ClearSearch => Some(PaneCommand::ClearSearch),
            SearchAction::ToggleCaseSensitive => Some(PaneCommand::ToggleCaseSensitive),
            SearchAction::ToggleWholeWord => Some(PaneCommand::ToggleWholeWord),
            SearchAction::ToggleRegex => Some(PaneCommand::ToggleRegex),
            SearchAction::FocusSearch => None,
        }
    }
}

/// Point-in-time copy of the pane state.
#[derive(Debug, Clone)]
pub struct PaneSnapshot {
    pub text: String,
    pub query: SearchQuery,
    pub update: SearchUpdate,
}

impl PaneSnapshot {
    fn of(pane: &LogPane) -> Self {
        Self {
            text: pane.text().to_string(),
            query: pane.query().clone(),
            update: pane.update(),
        }
    }
}

/// Cloneable handle for threads that feed text into the pane.
#[derive(Debug, Clone)]
pub struct LogProducer {
    tx: Sender<PaneCommand>,
}

impl LogProducer {
    /// Queue `text` for appending. Never blocks.
    pub fn append(&self, text: impl Into<String>) {
        if self.tx.send(PaneCommand::Append(text.into())).is_err() {
            log::debug!("Log pane has stopped, dropping appended text");
        }
    }

    /// Queue a request to empty the log.
    pub fn clear(&self) {
        if self.tx.send(PaneCommand::Clear).is_err() {
            log::debug!("Log pane has stopped, dropping clear request");
        }
    }
}

/// Owner of the dispatch thread.
pub struct PaneDispatcher {
    tx: Sender<PaneCommand>,
    handle: Option<JoinHandle<LogPane>>,
}

impl std::fmt::Debug for PaneDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaneDispatcher")
            .field("running", &self.handle.is_some())
            .finish_non_exhaustive()
    }
}

impl PaneDispatcher {
    /// Move `pane` onto a new dispatch thread.
    pub fn spawn(pane: LogPane) -> Result<Self> {
        let (tx, rx) = channel::<PaneCommand>();
        let handle = thread::Builder::new()
            .name("logpane-dispatch".to_string())
            .spawn(move || run(pane, rx))
            .context("Failed to spawn log pane dispatch thread")?;

        Ok(Self {
            tx,
            handle: Some(handle),
        })
    }

    /// New producer handle for an ingestion thread.
    pub fn producer(&self) -> LogProducer {
        LogProducer {
            tx: self.tx.clone(),
        }
    }

    /// Queue a command.
    pub fn send(&self, command: PaneCommand) -> Result<(), DispatchError> {
        self.tx
            .send(command)
            .map_err(|_| DispatchError::Disconnected)
    }

    pub fn set_search_text(&self, text: impl Into<String>) -> Result<(), DispatchError> {
        self.send(PaneCommand::SetSearchText(text.into()))
    }

    pub fn toggle_case_sensitive(&self) -> Result<(), DispatchError> {
        self.send(PaneCommand::ToggleCaseSensitive)
    }

    pub fn toggle_whole_word(&self) -> Result<(), DispatchError> {
        self.send(PaneCommand::ToggleWholeWord)
    }

    pub fn toggle_regex(&self) -> Result<(), DispatchError> {
        self.send(PaneCommand::ToggleRegex)
    }

    pub fn find_next(&self) -> Result<(), DispatchError> {
        self.send(PaneCommand::FindNext)
    }

    pub fn find_previous(&self) -> Result<(), DispatchError> {
        self.send(PaneCommand::FindPrevious)
    }

    pub fn clear_search(&self) -> Result<(), DispatchError> {
        self.send(PaneCommand::ClearSearch)
    }

    /// Queue the command for a shortcut action.
    ///
    /// Returns `false` for actions the presentation layer handles itself.
    pub fn perform(&self, action: SearchAction) -> Result<bool, DispatchError> {
        match PaneCommand::from_action(action) {
            Some(command) => self.send(command).map(|()| true),
            None => Ok(false),
        }
    }

    /// Pane state after every command queued before this call.
    pub fn snapshot(&self) -> Result<PaneSnapshot, DispatchError> {
        let (reply_tx, reply_rx) = channel();
        self.send(PaneCommand::Snapshot(reply_tx))?;
        reply_rx.recv().map_err(|_| DispatchError::Disconnected)
    }

    /// Stop the thread after draining queued commands and return the pane.
    pub fn shutdown(mut self) -> Result<LogPane, DispatchError> {
        self.stop().ok_or(DispatchError::Disconnected)?
    }

    fn stop(&mut self) -> Option<Result<LogPane, DispatchError>> {
        let handle = self.handle.take()?;
        // A closed channel means the thread is already gone; join reports why.
        let _ = self.tx.send(PaneCommand::Shutdown);
        Some(handle.join().map_err(|_| DispatchError::Panicked))
    }
}

impl Drop for PaneDispatcher {
    fn drop(&mut self) {
        if let Some(Err(e)) = self.stop() {
            log::error!("{}", e);
        }
    }
}

fn run(mut pane: LogPane, rx: Receiver<PaneCommand>) -> LogPane {
    log::info!("Log pane dispatch thread started");

    while let Ok(command) = rx.recv() {
        match command {
            PaneCommand::Append(text) => pane.append(&text),
            PaneCommand::Clear => pane.clear(),
            PaneCommand::SetSearchText(text) => pane.set_search_text(&text),
            PaneCommand::ToggleCaseSensitive => pane.toggle_case_sensitive(),
            PaneCommand::ToggleWholeWord => pane.toggle_whole_word(),
            PaneCommand::ToggleRegex => pane.toggle_regex(),
            PaneCommand::FindNext => {
                pane.find_next();
            }
            PaneCommand::FindPrevious => {
                pane.find_previous();
            }
            PaneCommand::ClearSearch => pane.clear_search(),
            PaneCommand::Snapshot(reply) => {
                // The requester may have given up waiting
                let _ = reply.send(PaneSnapshot::of(&pane));
            }
            PaneCommand::Shutdown => break,
        }
    }

    log::info!("Log pane dispatch thread stopped");
    pane
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_apply_in_order() {
        let dispatcher = PaneDispatcher::spawn(LogPane::headless(64)).unwrap();
        let producer = dispatcher.producer();
        producer.append("alpha beta alpha\n");
        dispatcher.set_search_text("alpha").unwrap();
        dispatcher.find_next().unwrap();

        let snapshot = dispatcher.snapshot().unwrap();
        assert_eq!(snapshot.text, "alpha beta alpha\n");
        assert_eq!(snapshot.update.current, Some(1));
        assert_eq!(snapshot.update.status_text(), "2 of 2");
    }

    #[test]
    fn test_shutdown_returns_pane_and_drops_late_appends() {
        let dispatcher = PaneDispatcher::spawn(LogPane::headless(64)).unwrap();
        let producer = dispatcher.producer();
        producer.append("kept");

        let pane = dispatcher.shutdown().unwrap();
        assert_eq!(pane.text(), "kept");

        // Must not panic or block
        producer.append("lost");
        producer.clear();
    }

    #[test]
    fn test_focus_action_is_not_a_command() {
        let dispatcher = PaneDispatcher::spawn(LogPane::headless(8)).unwrap();
        assert!(!dispatcher.perform(SearchAction::FocusSearch).unwrap());
        assert!(dispatcher.perform(SearchAction::ClearSearch).unwrap());
    }
}
