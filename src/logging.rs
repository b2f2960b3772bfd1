//! Tracing setup for the `arbor` binary.
//!
//! The subscriber is only installed when `ARBOR_LOG` (or `RUST_LOG`) is set.
//! `ARBOR_LOG_FORMAT=json` switches to one JSON object per event. All output
//! goes to stderr so it never mixes with printed trees.
//!
//! ```bash
//! ARBOR_LOG=debug arbor check trees/
//! ARBOR_LOG="arbor::ast=trace" ARBOR_LOG_FORMAT=json arbor ast unit.json
//! ```

use tracing_subscriber::{fmt, EnvFilter};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("ARBOR_LOG_FORMAT").unwrap_or_default())
    }
}

/// `ARBOR_LOG` takes precedence over `RUST_LOG`; both use the same syntax.
fn build_filter() -> Option<EnvFilter> {
    if let Ok(val) = std::env::var("ARBOR_LOG") {
        return Some(EnvFilter::builder().parse_lossy(val));
    }
    std::env::var("RUST_LOG")
        .ok()
        .map(|_| EnvFilter::from_default_env())
}

/// Installs the global subscriber, or does nothing when logging is off.
pub fn init_tracing() {
    let Some(filter) = build_filter() else {
        return;
    };

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    // A second initialisation (e.g. from tests) is not an error worth failing on.
    let _ = match LogFormat::from_env() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
}
