//! Tracing subscriber setup
//!
//! Logs always go to stderr; stdout is reserved for the report.

use crate::config::LoggingConfig;
use crate::{AirCheckError, Result};
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, fmt::MakeWriter, layer::SubscriberExt, registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Resolve the filter directive: `--verbose` beats the config file, `RUST_LOG` beats both.
#[must_use]
pub fn filter_directive(config: &LoggingConfig, verbose: bool) -> String {
    if verbose {
        "aircheck=debug,info".to_string()
    } else {
        config.level.clone()
    }
}

/// Formatting layer for `format` ("json" or "pretty")
fn fmt_layer<S, W>(format: &str, writer: W) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        "json" => fmt::layer().json().with_writer(writer).boxed(),
        _ => fmt::layer().pretty().with_writer(writer).boxed(),
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config, verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(&config.format, std::io::stderr))
        .try_init()
        .map_err(|e| AirCheckError::config(format!("Failed to initialise logging: {e}")))
}
