//! Log output for the `gatepost` binary.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Route decoration events to stderr, as text or as one JSON object per line.
///
/// `RUST_LOG` overrides `level` when set. Stdout stays free for whatever the
/// CI step pipes onward. A subscriber installed earlier (for example by a
/// test harness) is left in place.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let (text_layer, json_layer) = if json {
        let layer = fmt::layer()
            .json()
            .with_target(false)
            .with_writer(std::io::stderr);
        (None, Some(layer))
    } else {
        let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
        (Some(layer), None)
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .try_init();
}
