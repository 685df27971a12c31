//! Log setup for `testrail-coverage`.
//!
//! Everything is written to stderr. Stdout is reserved for report output
//! such as counts, listings and SQL statement lines.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins over `level` when set. With `json` each event becomes one
/// JSON object per line. Only the first call takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let json_layer = json.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
    });
    let text_layer =
        (!json).then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init();
}
