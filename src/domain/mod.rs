pub mod board;
pub mod filter;
pub mod task;

pub use board::{Board, BoardTemplate, ColumnMeta};
pub use filter::filter_board;
pub use task::{Priority, Task, TaskId};
