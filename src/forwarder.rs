//! Forwarding of worker log messages into the log pane.
//!
//! Workers report `(message, identity)` pairs to a [`ForwarderSet`], which
//! fans each message out to every registered [`LogForwarder`]. The
//! [`PaneForwarder`] formats the pair as a timestamped line and appends it
//! through a [`LogProducer`].

use crate::dispatch::LogProducer;
use chrono::{DateTime, Local};
use parking_lot::RwLock;
use std::sync::Arc;

/// Timestamp layout for forwarded lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Destination for worker log messages.
pub trait LogForwarder: Send + Sync {
    /// Forward `message` reported by `identity` (a worker or subsystem name).
    fn forward(&self, message: &str, identity: &str);
}

/// Appends forwarded messages to the log pane.
#[derive(Debug, Clone)]
pub struct PaneForwarder {
    producer: LogProducer,
}

impl PaneForwarder {
    pub fn new(producer: LogProducer) -> Self {
        Self { producer }
    }

    /// Format one pane line: `"{timestamp} - {identity}: {message}\n"`.
    pub fn format_line(now: DateTime<Local>, message: &str, identity: &str) -> String {
        format!(
            "{} - {}: {}\n",
            now.format(TIMESTAMP_FORMAT),
            identity,
            message
        )
    }
}

impl LogForwarder for PaneForwarder {
    fn forward(&self, message: &str, identity: &str) {
        self.producer
            .append(Self::format_line(Local::now(), message, identity));
    }
}

/// Registered forwarders, shared between all reporting threads.
#[derive(Default)]
pub struct ForwarderSet {
    forwarders: RwLock<Vec<Arc<dyn LogForwarder>>>,
}

impl std::fmt::Debug for ForwarderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForwarderSet")
            .field("len", &self.len())
            .finish()
    }
}

impl ForwarderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, forwarder: Arc<dyn LogForwarder>) {
        self.forwarders.write().push(forwarder);
    }

    /// Remove every forwarder.
    pub fn clear(&self) {
        self.forwarders.write().clear();
    }

    pub fn len(&self) -> usize {
        self.forwarders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.forwarders.read().is_empty()
    }

    /// Send `message` to every registered forwarder.
    pub fn forward(&self, message: &str, identity: &str) {
        for forwarder in self.forwarders.read().iter() {
            forwarder.forward(message, identity);
        }
    }
}
