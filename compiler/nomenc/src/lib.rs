//! Driver for the nomen name-resolution engine.
//!
//! Loads a TOML module manifest into a [`nomen_resolve::Session`] and runs
//! lookups against it from the command line.

use std::sync::Once;

pub mod commands;
pub mod manifest;

pub use commands::CommandError;
pub use manifest::{load_file, load_str, ManifestError, Program};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=nomen_resolve=trace nomenc value app.toml Main speed`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .init();
        }
    });
}
