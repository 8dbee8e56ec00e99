//! Logging setup
//!
//! stdout carries JSON-RPC frames, so every log line goes to stderr. Format
//! and verbosity are decided once at startup; `RUST_LOG` overrides the
//! defaults when set.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `verbose` lowers the default filter to debug while keeping the HTTP stack
/// at info; `json_format` switches stderr output from the compact human
/// format to JSON lines for machine parsing.
///
/// # Example
/// ```
/// fig_common::telemetry::init_tracing(false, false);
/// tracing::info!("Server started");
/// ```
pub fn init_tracing(verbose: bool, json_format: bool) {
    let default_filter = if verbose {
        "debug,hyper=info,reqwest=info"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let base = tracing_subscriber::registry().with(filter);

    // Logs must never reach stdout, the protocol channel
    if json_format {
        base.with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();
    } else {
        base.with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
    }
}
