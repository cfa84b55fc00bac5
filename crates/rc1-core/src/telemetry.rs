//! Tracing initialisation for RC1 binaries.
//!
//! Call [`init_tracing`] once at program start. Later calls are ignored since
//! the global subscriber can only be set once per process.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Boxed stderr formatter, so that plain and JSON output share one
/// subscriber stack.
type LogLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Formatter for RC1 log lines: no targets, always on stderr so that stdout
/// stays reserved for results.
fn log_layer(json: bool) -> LogLayer {
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

/// Install the global subscriber.
///
/// * `json`: emit newline-delimited JSON log lines.
/// * `level`: default verbosity when `RUST_LOG` is unset.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(log_layer(json))
        .with(env_filter)
        .try_init()
        .ok();
}
