//! Structured logging for playerscope.
//!
//! Progress and diagnostics go through `tracing` to stderr so the report on
//! stdout stays clean.
//!
//! ## Environment Variables
//!
//! - `PLAYERSCOPE_LOG` or `RUST_LOG`: filter directive (e.g. `playerscope=debug,chromiumoxide=warn`)
//! - `PLAYERSCOPE_LOG_FORMAT`: output format (`pretty`, `compact`, `json`)

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "playerscope=info,warn";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable with colors
    Pretty,
    /// Compact single-line output
    #[default]
    Compact,
    /// JSON lines
    Json,
}

impl LogFormat {
    /// Parse from string (case-insensitive); unknown values fall back to compact.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub filter: String,
    pub format: LogFormat,
    /// Include file/line in logs
    pub with_file: bool,
    /// Include target (module path)
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Compact,
            with_file: false,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let filter = std::env::var("PLAYERSCOPE_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_FILTER.to_string());

        let format = std::env::var("PLAYERSCOPE_LOG_FORMAT")
            .map(|s| LogFormat::parse(&s))
            .unwrap_or_default();

        Self {
            filter,
            format,
            ..Default::default()
        }
    }

    /// Debug preset used by `--verbose`; keeps the env-selected format.
    pub fn debug() -> Self {
        Self {
            filter: "playerscope=debug,chromiumoxide=warn,info".to_string(),
            with_file: true,
            with_target: true,
            ..Self::from_env()
        }
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(config: LogConfig) {
    let env_filter =
        EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.with_file)
        .with_line_number(config.with_file)
        .with_target(config.with_target);

    let registry = tracing_subscriber::registry().with(env_filter);
    let _ = match config.format {
        LogFormat::Json => tracing::subscriber::set_global_default(registry.with(layer.json())),
        LogFormat::Compact => {
            tracing::subscriber::set_global_default(registry.with(layer.compact()))
        }
        LogFormat::Pretty => tracing::subscriber::set_global_default(registry.with(layer.pretty())),
    };
}
