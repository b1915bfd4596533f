use crate::{
    domain::Board,
    error::{Result, TaskboardError},
    storage::BlobStore,
    store::{BoardEvent, BoardObserver},
};

/// Where a loaded board came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from the stored blob
    Stored,
    /// Nothing was stored under the key
    Missing,
    /// The blob could not be read or decoded; the stored data is untouched
    Fallback,
}

/// Loads and saves the whole board as one JSON blob under a fixed key.
///
/// Storage faults never reach the caller: a bad or missing blob loads as the
/// default board, and a failed write is logged and dropped.
pub struct PersistenceAdapter {
    blob_store: Box<dyn BlobStore>,
    key: String,
}

impl PersistenceAdapter {
    /// Creates an adapter persisting under `key`
    pub fn new(blob_store: impl BlobStore + 'static, key: impl Into<String>) -> Self {
        Self {
            blob_store: Box::new(blob_store),
            key: key.into(),
        }
    }

    /// Reads the persisted board, backfilling any column of `default_board`
    /// that the blob lacks with an empty list. Columns only present in the
    /// blob are kept.
    pub fn load(&self, default_board: &Board) -> Board {
        self.load_with_source(default_board).0
    }

    /// Like [`load`](Self::load), also reporting whether the stored blob was
    /// used
    pub fn load_with_source(&self, default_board: &Board) -> (Board, LoadSource) {
        let raw = match self.blob_store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!(key = %self.key, "no saved board, starting from defaults");
                return (default_board.clone(), LoadSource::Missing);
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read board, using defaults");
                return (default_board.clone(), LoadSource::Fallback);
            }
        };

        match decode_board(&raw) {
            Ok(mut board) => {
                let added = board.backfill_columns(default_board);
                if !added.is_empty() {
                    tracing::debug!(key = %self.key, columns = ?added, "backfilled missing columns");
                }
                (board, LoadSource::Stored)
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to parse saved board, using defaults");
                (default_board.clone(), LoadSource::Fallback)
            }
        }
    }

    /// Writes the entire board. Returns whether the write succeeded.
    pub fn save(&mut self, board: &Board) -> bool {
        let result = encode_board(board).and_then(|json| self.blob_store.set(&self.key, &json));

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to save board");
                false
            }
        }
    }
}

impl BoardObserver for PersistenceAdapter {
    fn on_change(&mut self, _event: &BoardEvent, board: &Board) {
        self.save(board);
    }
}

/// Serializes a board to its persisted JSON form
pub fn encode_board(board: &Board) -> Result<String> {
    Ok(serde_json::to_string(board)?)
}

/// Parses a persisted blob, rejecting anything that is not an object of
/// task arrays
pub fn decode_board(raw: &str) -> Result<Board> {
    let value: serde_json::Value = serde_json::from_str(raw)?;

    if !value.is_object() {
        return Err(TaskboardError::InvalidBoardShape(format!(
            "expected an object of columns, found {}",
            json_kind(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| TaskboardError::InvalidBoardShape(e.to_string()))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
