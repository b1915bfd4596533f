//! # Taskboard Core
//!
//! State container and local persistence for a four-column task board
//! (todo, doing, review, done).
//!
//! The view layer owns a [`BoardStore`], renders the snapshots it hands out
//! and dispatches create, edit, remove and move requests to it. Every change
//! is written through to a [`BlobStore`](storage::BlobStore) as one JSON
//! document.

pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod pulse;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::StoreConfig;
pub use domain::{
    board::{Board, BoardTemplate, ColumnMeta},
    task::{Priority, Task, TaskId},
};
pub use error::{Result, TaskboardError, ValidationError};
pub use form::{FormMode, TaskFields, TaskForm};
pub use pulse::{PulseFlag, PulseIndicator};
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore, PersistenceAdapter};
pub use store::{BoardEvent, BoardObserver, BoardStore};
