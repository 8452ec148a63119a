//! Process-wide logger for logpane.
//!
//! [`LogBridge`] implements [`log::Log`]: every enabled record is written to
//! stderr as `[timestamp] [LEVEL] [target] message`, and records from other
//! crates are also handed to the [`ForwarderSet`] so they show up in the log
//! pane. Records whose target belongs to this crate are never forwarded;
//! the pane logs about its own appends, and forwarding those would append
//! again.

use crate::forwarder::ForwarderSet;
use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use logpane_config::LogLevel;
use std::io::Write;
use std::sync::Arc;

/// Targets that are never forwarded into the pane.
const OWN_TARGET_PREFIX: &str = "logpane";

/// `log` implementation that mirrors to stderr and forwards into the pane.
pub struct LogBridge {
    level: LevelFilter,
    forwarders: Arc<ForwarderSet>,
}

impl LogBridge {
    pub fn new(level: LevelFilter, forwarders: Arc<ForwarderSet>) -> Self {
        Self { level, forwarders }
    }

    /// Whether a record from `target` may be forwarded into the pane.
    pub fn forwards_target(target: &str) -> bool {
        !target.starts_with(OWN_TARGET_PREFIX)
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );
        // Nowhere left to report a failed stderr write
        let _ = std::io::stderr().lock().write_all(line.as_bytes());

        if Self::forwards_target(record.target()) {
            self.forwarders
                .forward(&record.args().to_string(), record.target());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Pick the log level: CLI flag first, then `RUST_LOG`, then the config file.
pub fn resolve_level(cli: Option<LogLevel>, config: LogLevel) -> LogLevel {
    cli.or_else(|| {
        std::env::var("RUST_LOG")
            .ok()
            .and_then(|v| LogLevel::from_name(&v))
    })
    .unwrap_or(config)
}

/// Install the bridge as the global logger.
///
/// Fails if a logger was already installed.
pub fn init_log_bridge(
    level: LogLevel,
    forwarders: Arc<ForwarderSet>,
) -> Result<(), log::SetLoggerError> {
    let filter = level.to_level_filter();
    let bridge: &'static LogBridge = Box::leak(Box::new(LogBridge::new(filter, forwarders)));
    log::set_logger(bridge)?;
    log::set_max_level(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_records_are_not_forwarded() {
        assert!(!LogBridge::forwards_target("logpane"));
        assert!(!LogBridge::forwards_target("logpane::pane"));
        assert!(!LogBridge::forwards_target("logpane_config::config"));
        assert!(LogBridge::forwards_target("worker::trade"));
    }

    #[test]
    fn test_cli_level_wins() {
        assert_eq!(
            resolve_level(Some(LogLevel::Trace), LogLevel::Warn),
            LogLevel::Trace
        );
    }

    #[test]
    fn test_enabled_respects_level() {
        let bridge = LogBridge::new(LevelFilter::Warn, Arc::new(ForwarderSet::new()));
        let warn = Metadata::builder().level(log::Level::Warn).build();
        let info = Metadata::builder().level(log::Level::Info).build();
        assert!(bridge.enabled(&warn));
        assert!(!bridge.enabled(&info));
    }
}
