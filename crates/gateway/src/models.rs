//! Task entity types.

use serde::{Deserialize, Serialize};

/// A persisted task row.
///
/// The id is assigned by the persistence service on insert and never
/// changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Row id assigned by the persistence service.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Completion flag.
    pub completed: bool,
}

/// Request body for create and full-replace update.
///
/// Deserialization rejects missing and unknown fields, so malformed
/// bodies never reach the persistence service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TaskDraft {
    /// Task title.
    pub title: String,
    /// Completion flag.
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserialize() {
        let json = r#"{"id": 1, "title": "Buy milk", "completed": false}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 1);
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn test_draft_rejects_missing_field() {
        let json = r#"{"title": "Buy milk"}"#;
        let result: Result<TaskDraft, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_rejects_unknown_field() {
        let json = r#"{"title": "Buy milk", "completed": false, "priority": 3}"#;
        let result: Result<TaskDraft, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_serialize_shape() {
        let draft = TaskDraft {
            title: "Buy milk".to_string(),
            completed: true,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "title": "Buy milk", "completed": true })
        );
    }
}
