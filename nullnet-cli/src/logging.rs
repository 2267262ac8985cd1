//! Structured logging for the `nullnet` binary.
//!
//! A single global `tracing` subscriber writes to stderr, so reports printed
//! on stdout stay machine-readable. `RUST_LOG` selects the level (default
//! `info`) and `NULLNET_LOG_FORMAT` picks `human` or `json` output. Crates
//! logging through the `log` facade are bridged into the same pipeline.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FORMAT_ENV: &str = "NULLNET_LOG_FORMAT";
const DEFAULT_FILTER: &str = "info";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Output encoding for log lines.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Human,
    /// One JSON object per line, including the span stack.
    Json,
}

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `NULLNET_LOG_FORMAT` was not valid UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// `NULLNET_LOG_FORMAT` named an unknown format.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Value supplied by the user.
        provided: String,
    },
    /// The global subscriber could not be installed.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Installs the global subscriber once; later calls are no-ops.
///
/// # Errors
/// Returns [`LoggingError`] when `NULLNET_LOG_FORMAT` is unreadable or
/// unsupported. A subscriber installed elsewhere is reported on stderr and
/// otherwise tolerated.
pub fn init_logging() -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    let format = format_from_env()?;
    if let Err(LoggingError::InstallFailed { source }) = install_subscriber(format) {
        report_existing_subscriber(&source);
    }
    let _ = INITIALISED.set(());
    Ok(())
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is owned by another subscriber at this point"
)]
fn report_existing_subscriber(source: &tracing_subscriber::util::TryInitError) {
    eprintln!("structured logging already configured elsewhere: {source}");
}

fn format_from_env() -> Result<LogFormat, LoggingError> {
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => parse_log_format(&raw),
        Err(env::VarError::NotPresent) => Ok(LogFormat::default()),
        Err(source @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
            source,
        }),
    }
}

fn install_subscriber(format: LogFormat) -> Result<(), LoggingError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let fmt_layer = match format {
        LogFormat::Human => fmt_layer.boxed(),
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    // Another logger may already own the `log` slot; keep it if so.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}

fn parse_log_format(raw: &str) -> Result<LogFormat, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" | "text" => Ok(LogFormat::Human),
        "json" => Ok(LogFormat::Json),
        other => Err(LoggingError::UnsupportedFormat {
            provided: other.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("human", LogFormat::Human)]
    #[case("Text", LogFormat::Human)]
    #[case(" JSON ", LogFormat::Json)]
    fn recognises_supported_formats(#[case] raw: &str, #[case] expected: LogFormat) {
        assert_eq!(parse_log_format(raw).expect("format must parse"), expected);
    }

    #[rstest]
    #[case("xml")]
    #[case("")]
    fn rejects_unknown_formats(#[case] raw: &str) {
        let err = parse_log_format(raw).expect_err("format is unsupported");
        assert!(
            matches!(&err, LoggingError::UnsupportedFormat { provided } if provided == raw.trim()),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn repeated_initialisation_is_harmless() {
        init_logging().expect("logging must initialise");
        init_logging().expect("second call is a no-op");
    }
}
