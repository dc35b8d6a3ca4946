//! Common test utilities for enhance-iqa integration tests.

pub mod generators;

use std::path::PathBuf;

/// Creates a fresh temporary directory for one test.
pub fn temp_dir(prefix: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "enhance-iqa-{prefix}-{}-{id}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
    dir
}
