//! Configuration system for the logpane log viewer.
//!
//! This crate provides configuration loading, saving, and default values:
//!
//! - Log buffer capacity
//! - Default search flags and highlight colours
//! - Search keyboard shortcut bindings
//! - Log level for the application logger

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::{Config, SearchConfig};
pub use defaults::DEFAULT_BUFFER_CAPACITY;
pub use error::ConfigError;
pub use types::{LogLevel, ShortcutBinding};
