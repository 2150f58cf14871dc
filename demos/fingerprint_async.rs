//! Async file fingerprint example.
//!
//! Reads the file through tokio and hashes the chunks on the worker pool.
//!
//! Run with:
//!     cargo run --example fingerprint_async --features async-io -- /path/to/file

use std::env;

use chunkprint::{Fingerprinter, Sha256Hasher};
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let paths: Vec<String> = env::args().skip(1).collect();
    let paths = if paths.is_empty() {
        vec!["Cargo.toml".to_string()]
    } else {
        paths
    };

    let fingerprinter = Fingerprinter::<Sha256Hasher>::default();

    for path in paths {
        let file = tokio::fs::File::open(&path).await?;
        let size = file.metadata().await?.len();

        let fingerprint = fingerprinter
            .fingerprint_async_reader(file.compat(), size)
            .await?;
        println!("{}  {}", fingerprint, path);
    }

    Ok(())
}
