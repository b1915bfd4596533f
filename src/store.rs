use crate::{
    config::StoreConfig,
    domain::{filter_board, Board, BoardTemplate, Task, TaskId},
    form::TaskFields,
    pulse::{PulseFlag, PulseIndicator},
    storage::{persistence::LoadSource, BlobStore, PersistenceAdapter},
};
use std::sync::Arc;

/// A change applied to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    TaskCreated { column: String, id: TaskId },
    TaskUpdated { column: String, id: TaskId },
    TaskRemoved { column: String, id: TaskId },
    TaskMoved { from: String, to: String, id: TaskId },
}

impl BoardEvent {
    /// The task the change applied to
    pub fn task_id(&self) -> &TaskId {
        match self {
            Self::TaskCreated { id, .. }
            | Self::TaskUpdated { id, .. }
            | Self::TaskRemoved { id, .. }
            | Self::TaskMoved { id, .. } => id,
        }
    }
}

/// Side effect run after each board change, with the new board
pub trait BoardObserver: Send {
    fn on_change(&mut self, event: &BoardEvent, board: &Board);
}

/// The board state container and only writer of board state.
///
/// Each mutation builds a new snapshot (copy-on-write through
/// [`Arc::make_mut`]), so snapshots handed to the view are never altered
/// afterwards. Side effects such as persistence hang off the store as
/// [`BoardObserver`]s and run after every change that actually happened.
pub struct BoardStore {
    board: Arc<Board>,
    observers: Vec<Box<dyn BoardObserver>>,
    config: StoreConfig,
}

impl BoardStore {
    /// Store over an in-memory board with nothing attached
    pub fn new(board: Board) -> Self {
        Self {
            board: Arc::new(board),
            observers: Vec::new(),
            config: StoreConfig::default(),
        }
    }

    /// Loads the board from `blob_store` and attaches write-through
    /// persistence.
    ///
    /// When nothing usable is stored, the template's board is used. With
    /// `persist_on_open` the loaded board is written back immediately, unless
    /// the stored blob could not be read or decoded: that blob is left as it
    /// is until the first mutation.
    pub fn open(
        blob_store: impl BlobStore + 'static,
        template: &BoardTemplate,
        config: StoreConfig,
    ) -> Self {
        let mut persistence = PersistenceAdapter::new(blob_store, config.storage_key.clone());
        let (board, source) = persistence.load_with_source(&template.to_board());

        if config.persist_on_open && source != LoadSource::Fallback {
            persistence.save(&board);
        }

        Self {
            board: Arc::new(board),
            observers: vec![Box::new(persistence)],
            config,
        }
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<Board> {
        Arc::clone(&self.board)
    }

    /// Borrows the current board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Attaches an observer, run after the ones already attached
    pub fn subscribe(&mut self, observer: impl BoardObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Attaches a "new item" pulse on the configured column, with its reset
    /// timer running on `runtime`
    pub fn attach_pulse(&mut self, runtime: tokio::runtime::Handle) -> PulseFlag {
        let pulse = PulseIndicator::new(
            runtime,
            self.config.pulse_column.clone(),
            self.config.pulse_duration(),
            &self.board,
        );
        let flag = pulse.flag();
        self.subscribe(pulse);
        flag
    }

    /// Appends a new task to `column`, creating the column if needed.
    ///
    /// Returns `None` without touching the board when the title or the
    /// assignee is blank.
    pub fn create_task(&mut self, column: &str, fields: &TaskFields) -> Option<TaskId> {
        if let Err(e) = fields.validate() {
            tracing::debug!(column, reason = %e, "create rejected");
            return None;
        }

        let mut id = TaskId::generate();
        while self.board.find(&id).is_some() {
            id = TaskId::generate();
        }

        let task = Task::from_fields(id.clone(), fields);
        Arc::make_mut(&mut self.board)
            .column_entry(column)
            .push(task);

        tracing::debug!(column, id = %id, "task created");
        self.emit(BoardEvent::TaskCreated {
            column: column.to_string(),
            id: id.clone(),
        });
        Some(id)
    }

    /// Replaces the editable fields of task `id` in `column`.
    ///
    /// Only `column` is searched: a task that has since moved elsewhere is
    /// left alone.
    pub fn update_task(&mut self, column: &str, id: &TaskId, fields: &TaskFields) -> bool {
        if let Err(e) = fields.validate() {
            tracing::debug!(column, id = %id, reason = %e, "update rejected");
            return false;
        }

        let Some(pos) = self.position(column, id) else {
            tracing::debug!(column, id = %id, "update skipped, task not in column");
            return false;
        };

        let Some(task) = Arc::make_mut(&mut self.board)
            .column_mut(column)
            .and_then(|tasks| tasks.get_mut(pos))
        else {
            return false;
        };
        task.apply(fields);

        tracing::debug!(column, id = %id, "task updated");
        self.emit(BoardEvent::TaskUpdated {
            column: column.to_string(),
            id: id.clone(),
        });
        true
    }

    /// Removes task `id` from `column`; does nothing when it is not there
    pub fn remove_task(&mut self, column: &str, id: &TaskId) -> bool {
        let Some(pos) = self.position(column, id) else {
            tracing::debug!(column, id = %id, "remove skipped, task not in column");
            return false;
        };

        if let Some(tasks) = Arc::make_mut(&mut self.board).column_mut(column) {
            tasks.remove(pos);
        }

        tracing::debug!(column, id = %id, "task removed");
        self.emit(BoardEvent::TaskRemoved {
            column: column.to_string(),
            id: id.clone(),
        });
        true
    }

    /// Moves a task to the end of `to`.
    ///
    /// Does nothing when `from == to`, when `id` is empty or when the task is
    /// not in `from`.
    pub fn move_task(&mut self, from: &str, to: &str, id: &TaskId) -> bool {
        if from == to || id.is_empty() {
            return false;
        }

        let Some(pos) = self.position(from, id) else {
            tracing::debug!(from, to, id = %id, "move skipped, task not in source column");
            return false;
        };

        let board = Arc::make_mut(&mut self.board);
        let Some(task) = board.column_mut(from).map(|tasks| tasks.remove(pos)) else {
            return false;
        };
        board.column_entry(to).push(task);

        tracing::debug!(from, to, id = %id, "task moved");
        self.emit(BoardEvent::TaskMoved {
            from: from.to_string(),
            to: to.to_string(),
            id: id.clone(),
        });
        true
    }

    /// Search projection of the current snapshot; see [`filter_board`]
    pub fn filtered(&self, term: &str) -> Arc<Board> {
        filter_board(&self.board, term)
    }

    fn position(&self, column: &str, id: &TaskId) -> Option<usize> {
        self.board.column(column).iter().position(|t| &t.id == id)
    }

    fn emit(&mut self, event: BoardEvent) {
        for observer in &mut self.observers {
            observer.on_change(&event, &self.board);
        }
    }
}
