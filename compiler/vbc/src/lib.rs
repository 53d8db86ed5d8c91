//! VisiBoole command-line driver.
//!
//! The `vb` binary is a thin shell over [`commands`]: it opens a design,
//! drives one of the [`vb_eval::Design`] entry points and prints the
//! rendered token stream or the collected diagnostics.

pub mod commands;
pub mod debug;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=vb_eval=debug` or
/// `RUST_LOG=vb_eval=trace` for per-expression re-evaluation.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}
