use crate::{
    error::{Result, TaskboardError},
    storage::BlobStore,
};
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

#[derive(Debug, Default)]
struct Inner {
    blobs: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

/// In-process blob store.
///
/// Clones share the same contents, so a caller can keep a handle to inspect
/// what a [`BoardStore`](crate::store::BoardStore) has written.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    inner: Arc<Inner>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one blob
    pub fn with_blob(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.inner.blobs.lock().insert(key.into(), value.into());
        store
    }

    /// Makes every subsequent `get` fail, as a disabled storage would
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `set` fail, as a full or disabled storage would
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Peeks at a stored blob, ignoring any simulated failure
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.blobs.lock().get(key).cloned()
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.inner.blobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.blobs.lock().is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(TaskboardError::Storage(format!(
                "storage disabled while reading '{}'",
                key
            )));
        }
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(TaskboardError::Storage(format!(
                "quota exceeded while writing '{}'",
                key
            )));
        }
        self.inner
            .blobs
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
