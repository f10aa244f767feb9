//! Tracing subscriber setup for the analyzer.
//!
//! `dbt-log-status` prints its report on stdout, so a run can be piped into a
//! file or another tool. Every tracing event goes to stderr instead, so
//! `-v` or `RUST_LOG=debug` never changes what lands in the report. With
//! `--log-json` the stderr stream becomes newline-delimited JSON, one object
//! per `event = "..."` record emitted by the pipeline stages.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter from a `RUST_LOG` style directive string, or from `level` when the
/// directives are missing or do not parse.
pub fn build_filter(directives: Option<&str>, level: Level) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(level.as_str()))
}

/// Initialise the global tracing subscriber writing to stderr.
///
/// * `json`: when `true`, emit newline-delimited JSON log lines.
/// * `level`: default verbosity when `RUST_LOG` is not set.
///
/// Only the first call takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = build_filter(rust_log.as_deref(), level);

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .ok();
    }
}
