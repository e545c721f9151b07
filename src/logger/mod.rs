//! Logger module
//!
//! Provides logging utilities for the listing server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use std::path::Path;

/// Verbosity threshold, ordered from quietest to loudest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
}

impl Level {
    /// Parse a configured level name; unknown names fall back to `Info`
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            _ => Self::Info,
        }
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        Level::parse(&config.logging.level),
    )
}

/// Write to info log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to error log, subject to the level threshold
fn write_warning(message: &str) {
    match writer::get() {
        Some(w) => w.write_warning(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    for line in server_start_lines(addr, config) {
        write_info(&line);
    }
}

/// Startup banner; worker threads are reported by `main` when the runtime is built
fn server_start_lines(addr: &SocketAddr, config: &Config) -> Vec<String> {
    let mut lines = vec![
        "======================================".to_string(),
        "Directory listing server started".to_string(),
        format!("Listening on: http://{addr}"),
        format!(
            "Listing endpoint: http://{addr}{}?path=<dir>",
            config.routes.listing_path
        ),
        format!("Public root: {}", config.listing.public_root),
    ];
    if !config.listing.confine_to_root {
        lines.push("Path confinement: disabled (`..` may leave the public root)".to_string());
    }
    lines.push(format!("Log level: {}", config.logging.level));
    if let Some(ref path) = config.logging.access_log_file {
        lines.push(format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        lines.push(format!("Error log: {path}"));
    }
    lines.push("======================================\n".to_string());
    lines
}

pub fn log_config(message: &str) {
    write_info(&format!("[CONFIG] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_warning(&format!("[WARN] {message}"));
}

/// Diagnostic line for a failed directory listing
pub fn format_listing_error(requested: &str, err: &impl std::fmt::Display) -> String {
    format!("[ERROR] Error reading directory (path={requested:?}): {err}")
}

/// Write an already formatted line to the error log
pub fn log_error_line(line: &str) {
    write_error(line);
}

pub fn log_public_root_missing(root: &Path) {
    log_warning(&format!(
        "Public root '{}' does not exist yet; listings will fail until it does",
        root.display()
    ));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_signal(name: &str) {
    write_info(&format!("\n[SIGNAL] {name} received, initiating graceful shutdown"));
}

pub fn log_shutdown(reason: &str) {
    write_info(&format!("[SHUTDOWN] {reason}, no longer accepting connections"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("error"), Level::Error);
        assert_eq!(Level::parse("WARN"), Level::Warn);
        assert_eq!(Level::parse("warning"), Level::Warn);
        assert_eq!(Level::parse("info"), Level::Info);
        assert_eq!(Level::parse("debug"), Level::Info);
    }

    #[test]
    fn test_format_listing_error() {
        let line = format_listing_error("missing", &"no such file or directory");
        assert_eq!(
            line,
            r#"[ERROR] Error reading directory (path="missing"): no such file or directory"#
        );
    }

    #[test]
    fn test_start_banner_leaves_workers_to_runtime_setup() {
        let mut cfg = Config::for_tests();
        cfg.server.workers = Some(4);
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();

        let lines = server_start_lines(&addr, &cfg);
        assert!(lines.iter().all(|l| !l.contains("Worker threads")), "{lines:?}");
        assert!(lines.contains(&"Listening on: http://127.0.0.1:8080".to_string()));
        assert!(lines.contains(&"Listing endpoint: http://127.0.0.1:8080/api/files?path=<dir>".to_string()));
    }

    #[test]
    fn test_level_order() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Warn < Level::Info);
    }
}
