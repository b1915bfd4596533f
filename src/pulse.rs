use crate::{
    domain::Board,
    store::{BoardEvent, BoardObserver},
};
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::{runtime::Handle, task::JoinHandle};

#[derive(Debug, Default)]
struct PulseState {
    /// Generation of the pulse currently shown, 0 when idle
    active: AtomicU64,
    next_generation: AtomicU64,
}

/// Read handle on the "new item arrived" indicator
#[derive(Debug, Clone, Default)]
pub struct PulseFlag {
    state: Arc<PulseState>,
}

impl PulseFlag {
    pub fn is_active(&self) -> bool {
        self.state.active.load(Ordering::SeqCst) != 0
    }

    fn raise(&self) -> u64 {
        let generation = self.state.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.active.store(generation, Ordering::SeqCst);
        generation
    }

    /// Clears the flag only if no newer pulse has been raised since
    fn clear(&self, generation: u64) {
        let _ = self.state.active.compare_exchange(
            generation,
            0,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }

    fn reset(&self) {
        self.state.active.store(0, Ordering::SeqCst);
    }
}

/// Raises a transient flag whenever a watched column grows.
///
/// Each raise schedules a reset after `duration`; a newer raise aborts the
/// pending reset first. Dropping the indicator aborts it as well.
pub struct PulseIndicator {
    runtime: Handle,
    column: String,
    duration: Duration,
    last_count: usize,
    flag: PulseFlag,
    pending: Option<JoinHandle<()>>,
}

impl PulseIndicator {
    pub fn new(
        runtime: Handle,
        column: impl Into<String>,
        duration: Duration,
        board: &Board,
    ) -> Self {
        let column = column.into();
        let last_count = board.column(&column).len();
        Self {
            runtime,
            column,
            duration,
            last_count,
            flag: PulseFlag::default(),
            pending: None,
        }
    }

    pub fn flag(&self) -> PulseFlag {
        self.flag.clone()
    }

    pub fn observe(&mut self, board: &Board) {
        let count = board.column(&self.column).len();
        if count > self.last_count {
            self.trigger();
        }
        self.last_count = count;
    }

    fn trigger(&mut self) {
        self.cancel();

        let generation = self.flag.raise();
        let flag = self.flag.clone();
        let duration = self.duration;

        tracing::trace!(column = %self.column, generation, "pulse raised");
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            flag.clear(generation);
        }));
    }

    /// Aborts the scheduled reset, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl BoardObserver for PulseIndicator {
    fn on_change(&mut self, _event: &BoardEvent, board: &Board) {
        self.observe(board);
    }
}

impl Drop for PulseIndicator {
    fn drop(&mut self) {
        self.cancel();
        self.flag.reset();
    }
}
