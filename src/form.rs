use crate::{
    domain::{Priority, Task, TaskId},
    error::{Result, ValidationError},
    store::BoardStore,
};

/// Raw field values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Comma-delimited tag list, split by [`TaskFields::parse_tags`]
    pub tags: String,
    pub assignee: String,
}

impl TaskFields {
    /// Fields with only the required values set
    pub fn new(title: impl Into<String>, assignee: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            assignee: assignee.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Splits on commas, trims each piece and drops empty ones. Order and
    /// duplicates are kept.
    pub fn parse_tags(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Checks the required fields, title first
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.assignee.trim().is_empty() {
            return Err(ValidationError::EmptyAssignee);
        }
        Ok(())
    }

    /// Shorthand for a successful [`validate`](Self::validate)
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl From<&Task> for TaskFields {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority.unwrap_or_default(),
            tags: task.tags.join(", "),
            assignee: task.assignee.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// The column is fixed when editing starts
    Edit(TaskId),
}

/// State of the create/edit dialog.
///
/// Validation happens here, at the boundary: [`TaskForm::submit`] rejects a
/// blank title or assignee before the store is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub mode: FormMode,
    pub column: String,
    pub fields: TaskFields,
}

impl TaskForm {
    /// Blank form for a new task in `column`
    pub fn create(column: impl Into<String>) -> Self {
        Self {
            mode: FormMode::Create,
            column: column.into(),
            fields: TaskFields::default(),
        }
    }

    /// Form prefilled from an existing task
    pub fn edit(column: impl Into<String>, task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id.clone()),
            column: column.into(),
            fields: TaskFields::from(task),
        }
    }

    /// Whether the save button should be enabled
    pub fn can_save(&self) -> bool {
        self.fields.is_valid()
    }

    /// Inline messages for every missing required field
    pub fn errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.fields.title.trim().is_empty() {
            errors.push(ValidationError::EmptyTitle);
        }
        if self.fields.assignee.trim().is_empty() {
            errors.push(ValidationError::EmptyAssignee);
        }
        errors
    }

    /// Validates and dispatches to the store.
    ///
    /// Returns the id of the created or edited task. An edit whose task has
    /// left the form's column since the dialog opened still returns `Ok`;
    /// the store treats it as a no-op.
    pub fn submit(&self, store: &mut BoardStore) -> Result<TaskId> {
        self.fields.validate()?;

        match &self.mode {
            FormMode::Create => store
                .create_task(&self.column, &self.fields)
                .ok_or_else(|| ValidationError::EmptyTitle.into()),
            FormMode::Edit(id) => {
                store.update_task(&self.column, id, &self.fields);
                Ok(id.clone())
            }
        }
    }
}
