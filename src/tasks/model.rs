//! Task document model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task document as stored and served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Build a new task from a create payload, assigning a fresh id.
    pub fn new(payload: CreateTask) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: payload.name,
            completed: payload.completed,
        }
    }
}

/// Payload for `POST /api/v1/tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

/// Payload for `PATCH /api/v1/tasks/{id}`. Absent fields keep their stored
/// values.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTask {
    pub name: Option<String>,
    pub completed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_defaults_to_not_completed() {
        let task = Task::new(CreateTask {
            name: "wash dishes".to_string(),
            completed: false,
        });
        assert!(!task.completed);
        assert_eq!(task.name, "wash dishes");
    }

    #[test]
    fn create_payload_completed_is_optional() {
        let payload: CreateTask = serde_json::from_str(r#"{"name":"mow lawn"}"#).unwrap();
        assert!(!payload.completed);
    }

    #[test]
    fn update_payload_fields_are_optional() {
        let payload: UpdateTask = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert!(payload.name.is_none());
        assert_eq!(payload.completed, Some(true));
    }
}
