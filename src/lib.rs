//! Random connected graph generation and percentile-filtered plotting of 2D
//! spectral embeddings.

pub mod embedding;
pub mod error;
pub mod generator;
pub mod graph;
pub mod plot;
pub mod records;

pub use error::{Error, Result};

/// Installs the stderr `tracing` subscriber shared by both binaries.
/// `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
