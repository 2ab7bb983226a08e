use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a task on the board. Allocated by the board, never reused
/// within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T-{}", self.0)
    }
}

/// A single task on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub is_completed: bool,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Task {
            id,
            title: title.into(),
            is_completed: false,
        }
    }

    /// The checkbox shown next to the title
    pub fn checkbox(&self) -> &'static str {
        if self.is_completed { "[x]" } else { "[ ]" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_incomplete() {
        let task = Task::new(TaskId(3), "Write notes");
        assert!(!task.is_completed);
        assert_eq!(task.checkbox(), "[ ]");
    }

    #[test]
    fn task_id_display() {
        assert_eq!(TaskId(12).to_string(), "T-12");
    }

    #[test]
    fn task_id_serializes_as_number() {
        let json = serde_json::to_string(&Task::new(TaskId(7), "x")).unwrap();
        assert_eq!(json, r#"{"id":7,"title":"x","is_completed":false}"#);
    }
}
