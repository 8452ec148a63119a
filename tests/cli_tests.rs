mod common;

use clap::Parser;
use common::{config_file, temp_file};
use logpane::cli::interactive::run_session;
use logpane::cli::{Cli, LogLevelArg, RuntimeOptions, feed_lines, load_config, print_results};
use logpane::{HighlightStyle, LogPane, PaneDispatcher, ShortcutRegistry};
use logpane_config::{Config, LogLevel};
use std::io::Cursor;

fn plain_style() -> HighlightStyle {
    HighlightStyle::default()
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

// ========== Argument parsing ==========

#[test]
fn test_parse_flags() {
    let cli = Cli::try_parse_from([
        "logpane",
        "-q",
        "timeout",
        "--case-sensitive",
        "--whole-word",
        "--capacity",
        "4096",
        "--log-level",
        "debug",
        "a.log",
        "b.log",
    ])
    .unwrap();
    assert_eq!(cli.files.len(), 2);
    assert_eq!(cli.query.as_deref(), Some("timeout"));
    assert!(cli.case_sensitive);
    assert!(cli.whole_word);
    assert!(!cli.regex);
    assert_eq!(cli.capacity, Some(4096));
    assert_eq!(cli.log_level, Some(LogLevelArg::Debug));

    let options = RuntimeOptions::from(cli);
    assert_eq!(options.log_level, Some(LogLevel::Debug));
}

#[test]
fn test_parse_rejects_unknown_level() {
    assert!(Cli::try_parse_from(["logpane", "--log-level", "loud"]).is_err());
}

#[test]
fn test_options_override_config() {
    let mut config = Config::default();
    let options = RuntimeOptions {
        capacity: Some(64),
        regex: true,
        ..RuntimeOptions::default()
    };
    options.apply_to(&mut config);
    assert_eq!(config.buffer_capacity, 64);
    assert!(config.search.use_regex);
    assert!(!config.search.case_sensitive);
}

#[test]
fn test_load_explicit_config() {
    let mut config = Config::default();
    config.buffer_capacity = 128;
    config.search.whole_word = true;
    let (path, _dir) = config_file(&config);

    let options = RuntimeOptions {
        config: Some(path),
        ..RuntimeOptions::default()
    };
    let loaded = load_config(&options).unwrap();
    assert_eq!(loaded.buffer_capacity, 128);
    assert!(loaded.search.whole_word);
}

#[test]
fn test_zero_capacity_override_is_rejected() {
    let (path, _dir) = config_file(&Config::default());
    let options = RuntimeOptions {
        config: Some(path),
        capacity: Some(0),
        ..RuntimeOptions::default()
    };
    assert!(load_config(&options).is_err());
}

// ========== Ingestion and output ==========

#[test]
fn test_feed_lines_and_print_matches() {
    let (path, _dir) = temp_file("app.log", "boot ok\ndisk error\nnet ok\nerror again\n");
    let dispatcher = PaneDispatcher::spawn(LogPane::headless(1_000)).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let lines = feed_lines(std::io::BufReader::new(file), &dispatcher.producer()).unwrap();
    assert_eq!(lines, 4);

    dispatcher.set_search_text("error").unwrap();
    let mut out = Vec::new();
    print_results(&dispatcher, &plain_style(), &mut out).unwrap();
    let printed = strip_ansi(&String::from_utf8(out).unwrap());
    assert_eq!(printed, "    2: disk error\n    4: error again\n1 of 2\n");
}

#[test]
fn test_feed_lines_survives_invalid_utf8() {
    let dispatcher = PaneDispatcher::spawn(LogPane::headless(1_000)).unwrap();
    let input: &[u8] = b"ok\nbad \xff byte\nERROR after\n";

    let lines = feed_lines(std::io::BufReader::new(input), &dispatcher.producer()).unwrap();
    assert_eq!(lines, 3);

    dispatcher.set_search_text("ERROR").unwrap();
    let snapshot = dispatcher.snapshot().unwrap();
    assert_eq!(snapshot.text, "ok\nbad \u{FFFD} byte\nERROR after\n");
    assert_eq!(snapshot.update.matches.len(), 1);
    assert_eq!(snapshot.update.status_text(), "1 of 1");
}

#[test]
fn test_print_without_query_prints_log() {
    let dispatcher = PaneDispatcher::spawn(LogPane::headless(8)).unwrap();
    dispatcher.producer().append("0123456789\n");
    let mut out = Vec::new();
    print_results(&dispatcher, &plain_style(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "3456789\n");
}

// ========== Interactive session ==========

#[test]
fn test_session_routes_commands_and_shortcuts() {
    let dispatcher = PaneDispatcher::spawn(LogPane::headless(1_000)).unwrap();
    dispatcher
        .producer()
        .append("first warn\nsecond WARN\nthird\n");
    let registry = ShortcutRegistry::with_defaults();

    let input = Cursor::new("/warn\nF3\nShift+F3\n:case\nCtrl+F\nCtrl+Q\n:quit\n/never\n");
    let mut out = Vec::new();
    run_session(&dispatcher, &registry, &plain_style(), input, &mut out).unwrap();
    let printed = strip_ansi(&String::from_utf8(out).unwrap());
    let lines: Vec<&str> = printed.lines().collect();

    assert_eq!(
        lines,
        vec![
            "    1: first warn",
            "[---] 1 of 2",
            "    2: second WARN",
            "[---] 2 of 2",
            "    1: first warn",
            "[---] 1 of 2",
            "    1: first warn",
            "[C--] 1 of 1",
            "search: type /text",
            "no action bound to Ctrl+Q",
        ]
    );

    // Nothing after :quit was applied
    let snapshot = dispatcher.snapshot().unwrap();
    assert_eq!(snapshot.query.text, "warn");
}

#[test]
fn test_session_reports_invalid_regex_and_clear() {
    let dispatcher = PaneDispatcher::spawn(LogPane::headless(1_000)).unwrap();
    dispatcher.producer().append("a(b\n");
    let registry = ShortcutRegistry::with_defaults();

    let input = Cursor::new(":regex\n/a(\nEsc\n:clear\n");
    let mut out = Vec::new();
    run_session(&dispatcher, &registry, &plain_style(), input, &mut out).unwrap();
    let printed = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = printed.lines().collect();

    assert_eq!(
        lines,
        vec!["[--R]", "[--R] Invalid regex pattern", "[--R]", "[--R]"]
    );
    assert!(dispatcher.snapshot().unwrap().text.is_empty());
}
