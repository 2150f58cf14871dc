//! File fingerprint example.
//!
//! Run with:
//!     RUST_LOG=chunkprint=debug cargo run --example fingerprint_file -- /path/to/file.iso

use std::env;
use std::time::Instant;

use chunkprint::{Fingerprinter, Sha256Hasher};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    let fingerprinter = Fingerprinter::<Sha256Hasher>::default();
    let size = std::fs::metadata(&path)?.len();
    let plan = fingerprinter.plan(size)?;

    println!("File:   {}", path);
    println!(
        "Size:   {} bytes in {} chunks of {} bytes",
        size,
        plan.count(),
        plan.chunk_size()
    );

    let started = Instant::now();
    let fingerprint = fingerprinter.fingerprint_file(&path)?;
    println!("SHA256: {}", fingerprint);
    println!("Took:   {:?}", started.elapsed());

    // Plain digest for comparison; the two never match for non-empty input
    let plain = chunkprint::digest_file::<Sha256Hasher>(&path)?;
    println!("Plain:  {}", plain);

    Ok(())
}
