// Integration tests for the async fingerprint path
// Tests cover: agreement with the sync path, tokio files, failure paths

#![cfg(feature = "async-io")]

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio_util::compat::TokioAsyncReadCompatExt;

use chunkprint::{
    CancelToken, ChunkPlan, ChunkStream, FingerprintConfig, FingerprintError, Fingerprinter,
    Sha256Hasher, fingerprint_async,
};

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + 13) as u8).collect()
}

fn config(chunk_size: usize, workers: usize) -> FingerprintConfig {
    FingerprintConfig::new(chunk_size)
        .unwrap()
        .with_workers(workers)
}

#[tokio::test]
async fn test_async_matches_sync() {
    let data = pattern(10_000);
    let config = config(1024, 3);

    let sync = Fingerprinter::<Sha256Hasher>::new(config)
        .fingerprint_bytes(&data)
        .unwrap();
    let async_fp = fingerprint_async::<Sha256Hasher, _>(&data[..], data.len() as u64, &config, None)
        .await
        .unwrap();

    assert_eq!(sync, async_fp);
}

#[tokio::test]
async fn test_async_empty_input() {
    let config = config(1024, 0);
    let fp = fingerprint_async::<Sha256Hasher, _>(&b""[..], 0, &config, None)
        .await
        .unwrap();
    assert_eq!(fp, chunkprint::fingerprint_bytes(b"").unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_tokio_file() {
    let data = pattern(2 * 1024 * 1024 + 17);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("image.iso");

    let mut file = tokio::fs::File::create(&path).await.unwrap();
    file.write_all(&data).await.unwrap();
    file.flush().await.unwrap();
    drop(file);

    let file = tokio::fs::File::open(&path).await.unwrap();
    let size = file.metadata().await.unwrap().len();

    let fingerprinter = Fingerprinter::<Sha256Hasher>::default();
    let from_async = fingerprinter
        .fingerprint_async_reader(file.compat(), size)
        .await
        .unwrap();

    assert_eq!(from_async, chunkprint::fingerprint_file(&path).unwrap());
}

#[tokio::test]
async fn test_chunk_stream_follows_plan() {
    let data = pattern(100);
    let plan = ChunkPlan::new(100, 32).unwrap();

    let chunks: Vec<_> = ChunkStream::new(&data[..], plan)
        .map(|chunk| chunk.unwrap())
        .collect()
        .await;

    assert_eq!(chunks.len(), plan.count());
    for (chunk, spec) in chunks.iter().zip(plan.specs()) {
        assert_eq!(chunk.spec(), spec);
    }
    assert_eq!(chunks[3].len(), 4);
}

#[tokio::test]
async fn test_async_zero_workers() {
    let data = pattern(100);
    let err = fingerprint_async::<Sha256Hasher, _>(&data[..], 100, &config(32, 0), None)
        .await
        .unwrap_err();
    assert!(matches!(err, FingerprintError::ResourceExhaustion { .. }));
}

#[tokio::test]
async fn test_async_length_mismatch() {
    let data = pattern(100);
    let err = fingerprint_async::<Sha256Hasher, _>(&data[..], 90, &config(32, 2), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FingerprintError::LengthMismatch { expected: 90, .. }
    ));
}

#[tokio::test]
async fn test_async_cancelled() {
    let data = pattern(100);
    let token = CancelToken::new();
    token.cancel();

    let err = fingerprint_async::<Sha256Hasher, _>(&data[..], 100, &config(32, 2), Some(&token))
        .await
        .unwrap_err();
    assert!(matches!(err, FingerprintError::Cancelled));
}
