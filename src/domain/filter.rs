use crate::domain::board::Board;
use std::sync::Arc;

/// Search projection over a board
///
/// Keeps, per column, the tasks whose title or description contains `term`
/// (case-insensitive). Every column key survives, possibly with an empty
/// list. A blank term hands back the same snapshot without copying.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use taskboard_core::domain::{filter_board, BoardTemplate};
///
/// let board = Arc::new(BoardTemplate::default().to_board());
/// let filtered = filter_board(&board, "skeleton");
/// assert_eq!(filtered.len(), 1);
/// assert!(Arc::ptr_eq(&board, &filter_board(&board, "   ")));
/// ```
pub fn filter_board(board: &Arc<Board>, term: &str) -> Arc<Board> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Arc::clone(board);
    }

    Arc::new(board.map_columns(|tasks| {
        tasks
            .iter()
            .filter(|t| t.matches(&needle))
            .cloned()
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoardTemplate, Task, TaskId};
    use indexmap::IndexMap;

    fn sample() -> Arc<Board> {
        let mut columns = IndexMap::new();
        columns.insert(
            "todo".to_string(),
            vec![
                Task::new(TaskId::new("a"), "Fix login bug"),
                Task::new(TaskId::new("b"), "Write changelog").with_description("mention LOGIN fix"),
            ],
        );
        columns.insert(
            "done".to_string(),
            vec![Task::new(TaskId::new("c"), "Release notes")],
        );
        Arc::new(Board::from_columns(columns))
    }

    #[test]
    fn test_filter_matches_title_and_description() {
        let filtered = filter_board(&sample(), "Login");

        assert_eq!(filtered.column("todo").len(), 2);
        assert!(filtered.column("done").is_empty());
        assert!(filtered.contains_column("done"));
    }

    #[test]
    fn test_filter_keeps_every_key() {
        let board = Arc::new(BoardTemplate::default().to_board());
        let filtered = filter_board(&board, "nothing matches this");

        let keys: Vec<&str> = filtered.column_keys().collect();
        assert_eq!(keys, vec!["todo", "doing", "review", "done"]);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_blank_term_returns_same_snapshot() {
        let board = sample();
        assert!(Arc::ptr_eq(&board, &filter_board(&board, "")));
        assert!(Arc::ptr_eq(&board, &filter_board(&board, " \t ")));
    }

    #[test]
    fn test_filter_trims_term() {
        let filtered = filter_board(&sample(), "  release ");
        assert_eq!(filtered.column("done").len(), 1);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = filter_board(&sample(), "fix");
        let twice = filter_board(&once, "fix");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_preserves_order() {
        let filtered = filter_board(&sample(), "l");
        let ids: Vec<&str> = filtered.column("todo").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
