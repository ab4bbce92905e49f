//! Structured logging setup
//!
//! Initializes a `tracing` subscriber for the `codepeek` binary and for
//! embedders that want the library's diagnostics. Output goes to stderr so
//! generated documents and JSON written to stdout stay clean.
//!
//! ```no_run
//! use codepeek::util::logging;
//!
//! // CODEPEEK_LOG_LEVEL=debug CODEPEEK_LOG_JSON=true
//! logging::init_from_env();
//! tracing::info!("ready");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Guards the global subscriber against a second installation
static INIT: Once = Once::new();

/// Options for the `tracing` subscriber
///
/// Only events from `codepeek` targets are filtered by `level`; every other
/// crate is held at WARN unless `RUST_LOG` says otherwise.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for `codepeek` targets
    pub level: Level,

    /// Emit one JSON object per event instead of pretty text
    pub use_json: bool,

    /// Prefix each event with its module path (e.g. `codepeek::session`)
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,

    /// Include the emitting thread's id and name
    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    /// INFO level, pretty text, targets on, locations and thread ids off
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    /// Default options with a different minimum level
    ///
    /// # Arguments
    ///
    /// * `level` - Minimum level for `codepeek` targets
    ///
    /// # Example
    ///
    /// ```
    /// use codepeek::util::LoggingConfig;
    /// use tracing::Level;
    ///
    /// let config = LoggingConfig::with_level(Level::DEBUG);
    /// assert!(!config.use_json);
    /// ```
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON output with source locations and thread ids
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
            include_thread_ids: true,
        }
    }

    /// DEBUG level with pretty text, for local runs
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            ..Default::default()
        }
    }
}

/// Parses a level name case-insensitively
///
/// Unknown names print a notice on stderr and yield `Level::INFO`.
///
/// # Example
///
/// ```
/// use codepeek::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("Warn"), Level::WARN);
/// assert_eq!(parse_level("verbose"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// `RUST_LOG` when set, otherwise WARN for everything and `level` for codepeek
fn build_filter(level: Level) -> EnvFilter {
    // RUST_LOG takes precedence over the configured level.
    if env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }
    let mut filter = EnvFilter::new("warn");
    if let Ok(directive) = format!("codepeek={}", level).parse::<Directive>() {
        filter = filter.add_directive(directive);
    }
    filter
}

/// Installs the global subscriber writing to stderr
///
/// Only the first call in a process has an effect; later calls are ignored,
/// so tests and embedders may call it freely.
///
/// # Arguments
///
/// * `config` - Subscriber options
///
/// # Example
///
/// ```no_run
/// use codepeek::util::{init_logging, LoggingConfig};
///
/// init_logging(LoggingConfig::development());
/// ```
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        }
    });
}

/// Installs the subscriber with [`LoggingConfig::default`]
pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Installs the subscriber from `CODEPEEK_LOG_LEVEL` and `CODEPEEK_LOG_JSON`
///
/// A missing level means INFO; a missing or unparsable JSON flag means
/// pretty text.
pub fn init_from_env() {
    let level_str = env::var("CODEPEEK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let use_json = env::var("CODEPEEK_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level: parse_level(&level_str),
        use_json,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_case_insensitive() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("Debug"), Level::DEBUG);
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("verbose"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);
        assert!(!config.include_location);
    }

    #[test]
    fn test_presets() {
        assert!(LoggingConfig::production().use_json);
        assert!(LoggingConfig::production().include_thread_ids);
        assert_eq!(LoggingConfig::development().level, Level::DEBUG);
        assert_eq!(LoggingConfig::with_level(Level::WARN).level, Level::WARN);
    }
}
