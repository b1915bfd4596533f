use crate::error::Result;

pub mod file_store;
pub mod memory_store;
pub mod persistence;

pub use file_store::FileBlobStore;
pub use memory_store::MemoryBlobStore;
pub use persistence::{LoadSource, PersistenceAdapter};

/// Key-value store of opaque text blobs, the shape of browser local storage
pub trait BlobStore: Send {
    /// Reads the blob stored under `key`, `None` when there is none
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous blob
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
