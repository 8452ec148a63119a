//! Command-line interface for logpane.
//!
//! Loads log files (or stdin) into a bounded log pane, one ingestion thread
//! per source, then either prints every line holding a match or starts an
//! interactive search session ([`interactive`]).

pub mod interactive;
pub mod render;

use crate::dispatch::{LogProducer, PaneDispatcher};
use crate::forwarder::{ForwarderSet, PaneForwarder};
use crate::highlight::{HighlightStyle, NullSink};
use crate::log_bridge;
use crate::pane::LogPane;
use crate::shortcuts::ShortcutRegistry;
use anyhow::{Context, Result, bail};
use clap::Parser;
use logpane_config::{Config, LogLevel};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// logpane - search and highlight a bounded tail of log output
#[derive(Parser, Debug)]
#[command(name = "logpane")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log files to load (reads stdin when none are given)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Search for this text after loading
    #[arg(short, long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Match case exactly
    #[arg(short = 'c', long)]
    pub case_sensitive: bool,

    /// Only match whole words (ignored with --regex)
    #[arg(short = 'w', long)]
    pub whole_word: bool,

    /// Treat the query as a regular expression
    #[arg(short = 'e', long)]
    pub regex: bool,

    /// Maximum number of characters kept (overrides config)
    #[arg(long, value_name = "CHARS")]
    pub capacity: Option<usize>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,

    /// Read search commands from stdin after loading the files
    #[arg(short, long)]
    pub interactive: bool,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Off => LogLevel::Off,
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

/// Options extracted from the command line
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    pub files: Vec<PathBuf>,
    pub query: Option<String>,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub regex: bool,
    pub capacity: Option<usize>,
    pub config: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
    pub interactive: bool,
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        Self {
            files: cli.files,
            query: cli.query,
            case_sensitive: cli.case_sensitive,
            whole_word: cli.whole_word,
            regex: cli.regex,
            capacity: cli.capacity,
            config: cli.config,
            log_level: cli.log_level.map(LogLevel::from),
            interactive: cli.interactive,
        }
    }
}

impl RuntimeOptions {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(capacity) = self.capacity {
            config.buffer_capacity = capacity;
        }
        config.search.case_sensitive |= self.case_sensitive;
        config.search.whole_word |= self.whole_word;
        config.search.use_regex |= self.regex;
    }
}

/// Parse the process arguments.
pub fn process_cli() -> RuntimeOptions {
    Cli::parse().into()
}

/// Load the config named on the command line, or the default one.
///
/// A broken default config is logged and replaced by defaults; a broken
/// explicit config is an error.
pub fn load_config(options: &RuntimeOptions) -> Result<Config> {
    let mut config = match &options.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }),
    };
    options.apply_to(&mut config);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Run logpane with the given options.
pub fn run(options: RuntimeOptions) -> Result<()> {
    if options.interactive && options.files.is_empty() {
        bail!("--interactive reads commands from stdin, so log FILEs must be given");
    }

    let config = load_config(&options)?;

    let forwarders = Arc::new(ForwarderSet::new());
    let level = log_bridge::resolve_level(options.log_level, config.log_level);
    if let Err(e) = log_bridge::init_log_bridge(level, Arc::clone(&forwarders)) {
        eprintln!("logpane: warning: logger already installed: {e}");
    }
    log::info!("Starting logpane {}", crate::VERSION);

    let style = HighlightStyle::from(&config.search);
    let registry = ShortcutRegistry::from_config(&config.shortcuts);
    let dispatcher = PaneDispatcher::spawn(LogPane::from_config(&config, Box::new(NullSink)))?;
    forwarders.add(Arc::new(PaneForwarder::new(dispatcher.producer())));

    ingest(&options.files, &dispatcher)?;

    if let Some(query) = &options.query {
        dispatcher.set_search_text(query.as_str())?;
    }

    let stdout = io::stdout();
    if options.interactive {
        let stdin = io::stdin();
        interactive::run_session(&dispatcher, &registry, &style, stdin.lock(), stdout.lock())?;
    } else {
        print_results(&dispatcher, &style, stdout.lock())?;
    }

    // Stop forwarding before the pane goes away
    forwarders.clear();
    dispatcher.shutdown()?;
    log::info!("logpane finished");
    Ok(())
}

/// Load every source concurrently and wait for all of them.
fn ingest(files: &[PathBuf], dispatcher: &PaneDispatcher) -> Result<()> {
    let mut readers = Vec::new();
    if files.is_empty() {
        readers.push(spawn_reader(
            "stdin".to_string(),
            Box::new(BufReader::new(io::stdin())),
            dispatcher.producer(),
        )?);
    } else {
        for path in files {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            readers.push(spawn_reader(
                path.display().to_string(),
                Box::new(BufReader::new(file)),
                dispatcher.producer(),
            )?);
        }
    }

    for (name, handle) in readers {
        let lines = handle
            .join()
            .map_err(|_| anyhow::anyhow!("Reader thread for {name} panicked"))?
            .with_context(|| format!("Failed to read {name}"))?;
        log::info!("Loaded {} lines from {}", lines, name);
    }
    Ok(())
}

type ReaderHandle = (String, JoinHandle<io::Result<usize>>);

fn spawn_reader(
    name: String,
    reader: Box<dyn BufRead + Send>,
    producer: LogProducer,
) -> Result<ReaderHandle> {
    let handle = thread::Builder::new()
        .name(format!("logpane-ingest-{name}"))
        .spawn(move || feed_lines(reader, &producer))
        .with_context(|| format!("Failed to spawn reader thread for {name}"))?;
    Ok((name, handle))
}

/// Append `reader` to the pane line by line. Returns the number of lines.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than ending the source.
pub fn feed_lines(mut reader: impl BufRead, producer: &LogProducer) -> io::Result<usize> {
    let mut count = 0;
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(count);
        }
        producer.append(String::from_utf8_lossy(&line));
        count += 1;
    }
}

/// Print the matching lines (or the whole retained log without a search)
/// followed by the status text.
pub fn print_results(
    dispatcher: &PaneDispatcher,
    style: &HighlightStyle,
    mut out: impl Write,
) -> Result<()> {
    let snapshot = dispatcher.snapshot()?;
    if snapshot.query.is_empty() {
        out.write_all(snapshot.text.as_bytes())?;
    } else {
        for line in render::render_matching_lines(&snapshot.text, &snapshot.update, style) {
            writeln!(out, "{line}")?;
        }
        writeln!(out, "{}", snapshot.update.status_text())?;
    }
    out.flush()?;
    Ok(())
}
