use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Installs the global subscriber for binaries. `RUST_LOG` overrides the
/// default `info` filter; `json` switches to one JSON object per event.
pub fn init_logging(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::NONE);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::NONE)
        .with_test_writer()
        .try_init();
}
