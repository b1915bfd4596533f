use crate::form::TaskFields;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Unique identifier for a task (e.g., t1, t0192f3c1a2b07c4e9d8b6a5f4e3d2c1b)
///
/// Ids loaded from storage are kept verbatim; new ids come from
/// [`TaskId::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    const PREFIX: &'static str = "t";

    /// Wraps an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh time-ordered identifier.
    ///
    /// UUIDv7 embeds the millisecond timestamp followed by random bits, so two
    /// tasks created within the same millisecond still get distinct ids.
    pub fn generate() -> Self {
        Self(format!("{}{}", Self::PREFIX, Uuid::now_v7().simple()))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority
///
/// Boards written by earlier versions stored the Portuguese labels, which are
/// still accepted on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[serde(alias = "baixa")]
    Low,
    #[default]
    #[serde(alias = "media")]
    Medium,
    #[serde(alias = "alta")]
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "baixa" => Ok(Self::Low),
            "medium" | "media" => Ok(Self::Medium),
            "high" | "alta" => Ok(Self::High),
            _ => Err(format!(
                "Invalid priority '{}'. Valid priorities: low, medium, high",
                s
            )),
        }
    }
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_priority"
    )]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "nullable_tags")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Fields written by other versions of the board, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An empty or unrecognised priority reads as no priority
fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok()))
}

/// `null` tags read as no tags
fn nullable_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Task {
    /// Creates a bare task with only an id and a title
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            priority: None,
            tags: Vec::new(),
            assignee: None,
            extra: Map::new(),
        }
    }

    /// Builds a task from submitted form fields.
    ///
    /// Callers are expected to have validated `fields` already.
    pub fn from_fields(id: TaskId, fields: &TaskFields) -> Self {
        let mut task = Self::new(id, String::new());
        task.apply(fields);
        task
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Replaces every editable field, keeping the id and any extra fields
    pub fn apply(&mut self, fields: &TaskFields) {
        self.title = fields.title.trim().to_string();
        self.description = if fields.description.is_empty() {
            None
        } else {
            Some(fields.description.clone())
        };
        self.priority = Some(fields.priority);
        self.tags = TaskFields::parse_tags(&fields.tags);
        self.assignee = Some(fields.assignee.trim().to_string());
    }

    /// Case-insensitive match of an already lowercased needle against the
    /// title or the description
    pub fn matches(&self, needle_lower: &str) -> bool {
        let title_matches = self.title.to_lowercase().contains(needle_lower);

        let description_matches = self
            .description
            .as_ref()
            .map(|d| d.to_lowercase().contains(needle_lower))
            .unwrap_or(false);

        title_matches || description_matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: std::collections::HashSet<TaskId> =
            (0..1000).map(|_| TaskId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generated_id_prefix() {
        let id = TaskId::generate();
        assert!(id.as_str().starts_with('t'));
        assert_eq!(id.as_str().len(), 33);
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("MEDIA".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!(" baixa ".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_legacy_labels_deserialize() {
        let p: Priority = serde_json::from_str("\"alta\"").unwrap();
        assert_eq!(p, Priority::High);

        let p: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(p, Priority::Low);

        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"medium\"");
    }

    #[test]
    fn test_task_serialization_omits_absent_fields() {
        let task = Task::new(TaskId::new("t1"), "Write docs");
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["id"], "t1");
        assert_eq!(json["title"], "Write docs");
        assert!(json.get("description").is_none());
        assert!(json.get("priority").is_none());
        assert!(json.get("assignee").is_none());
        assert_eq!(json["tags"], serde_json::json!([]));
    }

    #[test]
    fn test_task_deserialization_with_missing_optionals() {
        let task: Task = serde_json::from_str(r#"{"id":"t9","title":"Minimal"}"#).unwrap();
        assert_eq!(task.id.as_str(), "t9");
        assert!(task.tags.is_empty());
        assert!(task.priority.is_none());
        assert!(task.assignee.is_none());
    }

    #[test]
    fn test_task_tolerates_null_tags_and_blank_priority() {
        let task: Task =
            serde_json::from_str(r#"{"id":"u1","title":"Mine","tags":null,"priority":""}"#)
                .unwrap();
        assert!(task.tags.is_empty());
        assert!(task.priority.is_none());

        let task: Task =
            serde_json::from_str(r#"{"id":"u2","title":"Mine","priority":"urgent"}"#).unwrap();
        assert!(task.priority.is_none());

        let task: Task =
            serde_json::from_str(r#"{"id":"u3","title":"Mine","priority":"alta"}"#).unwrap();
        assert_eq!(task.priority, Some(Priority::High));
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let raw = r#"{"id":"u1","title":"Mine","dueDate":"2026-11-01","meta":{"pinned":true}}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.extra["dueDate"], "2026-11-01");

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["dueDate"], "2026-11-01");
        assert_eq!(json["meta"]["pinned"], true);
        assert_eq!(json["title"], "Mine");
    }

    #[test]
    fn test_apply_keeps_unknown_fields() {
        let mut task: Task =
            serde_json::from_str(r#"{"id":"u1","title":"Mine","dueDate":"2026-11-01"}"#).unwrap();

        task.apply(&TaskFields::new("Renamed", "Ana"));

        assert_eq!(task.title, "Renamed");
        assert_eq!(task.extra["dueDate"], "2026-11-01");
    }

    #[test]
    fn test_apply_replaces_fields_and_keeps_id() {
        let mut task = Task::new(TaskId::new("t1"), "Old")
            .with_description("old description")
            .with_tags(["x"]);

        let fields = TaskFields {
            title: "  New title ".to_string(),
            description: String::new(),
            priority: Priority::High,
            tags: "a, b ,,c".to_string(),
            assignee: " Ana ".to_string(),
        };
        task.apply(&fields);

        assert_eq!(task.id.as_str(), "t1");
        assert_eq!(task.title, "New title");
        assert_eq!(task.description, None);
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.tags, vec!["a", "b", "c"]);
        assert_eq!(task.assignee.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_matches_title_or_description() {
        let task = Task::new(TaskId::new("t1"), "Fix Login").with_description("Session TIMEOUT");

        assert!(task.matches("login"));
        assert!(task.matches("timeout"));
        assert!(!task.matches("logout"));
    }
}
