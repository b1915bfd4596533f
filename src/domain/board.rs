use crate::domain::task::{Priority, Task, TaskId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Display metadata for a standard column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub key: String,
    pub label: String,
}

impl ColumnMeta {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// The four workflow stages, in display order
    pub fn standard() -> Vec<ColumnMeta> {
        vec![
            Self::new("todo", "To Do"),
            Self::new("doing", "In Progress"),
            Self::new("review", "In Review"),
            Self::new("done", "Done"),
        ]
    }
}

/// The board a fresh installation starts from.
///
/// Its column keys are also the set every loaded board is backfilled with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTemplate {
    pub columns: Vec<ColumnMeta>,
    #[serde(default)]
    pub seed_tasks: IndexMap<String, Vec<Task>>,
}

impl BoardTemplate {
    /// The standard columns with no tasks
    pub fn empty() -> Self {
        Self {
            columns: ColumnMeta::standard(),
            seed_tasks: IndexMap::new(),
        }
    }

    /// Builds the initial board: every template column, seeded where the
    /// template says so
    pub fn to_board(&self) -> Board {
        let mut board = Board::with_columns(self.columns.iter().map(|c| c.key.as_str()));
        for (key, tasks) in &self.seed_tasks {
            board.column_entry(key).extend(tasks.iter().cloned());
        }
        board
    }

    /// Display label of a template column
    pub fn label_for(&self, key: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.label.as_str())
    }
}

impl Default for BoardTemplate {
    fn default() -> Self {
        let mut seed_tasks = IndexMap::new();
        seed_tasks.insert(
            "todo".to_string(),
            vec![
                Task::new(TaskId::new("t1"), "Example: Create skeleton")
                    .with_priority(Priority::High)
                    .with_tags(["frontend", "setup"]),
                Task::new(TaskId::new("t2"), "Example: Integrate local storage")
                    .with_priority(Priority::Medium)
                    .with_tags(["backend"]),
            ],
        );
        seed_tasks.insert(
            "doing".to_string(),
            vec![Task::new(TaskId::new("t3"), "Example: Working on it...")
                .with_priority(Priority::Low)
                .with_tags(["test"])],
        );
        seed_tasks.insert(
            "review".to_string(),
            vec![Task::new(TaskId::new("t4"), "Example: Under review")
                .with_priority(Priority::Medium)
                .with_tags(["review"])],
        );
        seed_tasks.insert(
            "done".to_string(),
            vec![Task::new(TaskId::new("t5"), "Example: Finished")
                .with_priority(Priority::High)
                .with_tags(["completed"])],
        );

        Self {
            columns: ColumnMeta::standard(),
            seed_tasks,
        }
    }
}

/// Column key to ordered task list.
///
/// Keys keep their insertion order, which is also the order they serialize
/// in. Lookups of unknown keys behave as empty columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    columns: IndexMap<String, Vec<Task>>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board with the given empty columns
    pub fn with_columns<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            columns: keys
                .into_iter()
                .map(|k| (k.to_string(), Vec::new()))
                .collect(),
        }
    }

    /// Wraps an already built column map, keeping its key order
    pub fn from_columns(columns: IndexMap<String, Vec<Task>>) -> Self {
        Self { columns }
    }

    /// Tasks of a column; an unknown key reads as an empty column
    pub fn column(&self, key: &str) -> &[Task] {
        self.columns.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether `key` exists, even as an empty column
    pub fn contains_column(&self, key: &str) -> bool {
        self.columns.contains_key(key)
    }

    /// Column keys in board order
    pub fn column_keys(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of tasks per column, in column order
    pub fn column_counts(&self) -> Vec<(&str, usize)> {
        self.columns
            .iter()
            .map(|(k, v)| (k.as_str(), v.len()))
            .collect()
    }

    /// Locates a task anywhere on the board
    pub fn find(&self, id: &TaskId) -> Option<(&str, &Task)> {
        self.columns.iter().find_map(|(key, tasks)| {
            tasks
                .iter()
                .find(|t| &t.id == id)
                .map(|t| (key.as_str(), t))
        })
    }

    /// Total number of tasks across all columns
    pub fn len(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.values().all(Vec::is_empty)
    }

    /// Adds every column of `defaults` that this board lacks, with an empty
    /// list. Existing columns are never touched.
    ///
    /// Returns the keys that were added.
    pub fn backfill_columns(&mut self, defaults: &Board) -> Vec<String> {
        let mut added = Vec::new();
        for key in defaults.columns.keys() {
            if !self.columns.contains_key(key) {
                self.columns.insert(key.clone(), Vec::new());
                added.push(key.clone());
            }
        }
        added
    }

    /// Mutable access to a column, creating it at the end if absent
    pub(crate) fn column_entry(&mut self, key: &str) -> &mut Vec<Task> {
        self.columns.entry(key.to_string()).or_default()
    }

    pub(crate) fn column_mut(&mut self, key: &str) -> Option<&mut Vec<Task>> {
        self.columns.get_mut(key)
    }

    pub(crate) fn map_columns(&self, mut f: impl FnMut(&[Task]) -> Vec<Task>) -> Board {
        Board {
            columns: self
                .columns
                .iter()
                .map(|(k, v)| (k.clone(), f(v.as_slice())))
                .collect(),
        }
    }
}
