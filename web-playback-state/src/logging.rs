//! Logging setup for applications embedding the player state layer
//!
//! The crate itself only emits `tracing` events. Hosts that do not install a
//! subscriber of their own can call [`init_logging`] once before mounting a
//! provider tree.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Where and how log output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No subscriber is installed
    Silent,
    /// Compact stderr output, `info` by default
    Development,
    /// Pretty stderr output with source locations, `debug` by default
    Debug,
    /// One JSON object per line, for log collectors of embedding hosts
    Json,
}

impl LoggingMode {
    /// Parse a mode name as used in `WEB_PLAYBACK_LOG_MODE`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "silent" | "off" => Some(LoggingMode::Silent),
            "development" | "dev" => Some(LoggingMode::Development),
            "debug" => Some(LoggingMode::Debug),
            "json" => Some(LoggingMode::Json),
            _ => None,
        }
    }

    fn default_level(&self) -> &'static str {
        match self {
            LoggingMode::Debug => "debug",
            _ => "info",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Unknown logging mode: {0}")]
    UnknownMode(String),
}

/// Install a global subscriber for `mode`
///
/// The filter comes from `WEB_PLAYBACK_LOG_LEVEL`, then `RUST_LOG`, then the
/// mode's default level.
///
/// ```rust,ignore
/// web_playback_state::logging::init_logging(LoggingMode::Development)?;
/// ```
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    if mode == LoggingMode::Silent {
        return Ok(());
    }

    let filter = env_filter(mode.default_level())?;
    let result = match mode {
        LoggingMode::Development => Registry::default()
            .with(fmt::layer().with_target(false).compact())
            .with(filter)
            .try_init(),
        LoggingMode::Debug => Registry::default()
            .with(fmt::layer().pretty().with_file(true).with_line_number(true))
            .with(filter)
            .try_init(),
        LoggingMode::Json => Registry::default()
            .with(fmt::layer().json().with_current_span(false))
            .with(filter)
            .try_init(),
        LoggingMode::Silent => Ok(()),
    };

    result.map_err(|e| LoggingError::TracingInit(e.to_string()))
}

/// Install a subscriber according to `WEB_PLAYBACK_LOG_MODE`
///
/// Unset means silent; an unrecognised value is an error rather than a
/// silent fallback.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    match std::env::var("WEB_PLAYBACK_LOG_MODE") {
        Ok(name) => {
            let mode = LoggingMode::from_name(&name).ok_or(LoggingError::UnknownMode(name))?;
            init_logging(mode)
        }
        Err(_) => init_logging(LoggingMode::Silent),
    }
}

fn env_filter(default_level: &str) -> Result<EnvFilter, LoggingError> {
    let directives = std::env::var("WEB_PLAYBACK_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_level.to_string());

    EnvFilter::try_new(&directives).map_err(|e| LoggingError::InvalidFilter {
        filter: directives,
        reason: e.to_string(),
    })
}
