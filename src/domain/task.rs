use super::enums::{Category, Priority, TaskState};
use super::time::time_to_minutes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Rejections raised by task operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// Malformed or missing field values
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The task is outside its edit/completion window or already locked
    #[error("Not allowed: {0}")]
    NotEligible(String),
    #[error("No task matches '{0}'")]
    NotFound(String),
}

/// Raw field values for a new task, as supplied by a form or the CLI
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub category: Category,
    pub priority: Priority,
    pub start_time: String,
    pub end_time: String,
    pub estimated_minutes: f64,
    pub is_critical: bool,
}

/// A time-boxed task scheduled on a single calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub category: Category,
    pub priority: Priority,
    /// Scheduled day; never changes after creation
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub estimated_minutes: f64,
    #[serde(default)]
    pub is_critical: bool,
    pub state: TaskState,
    /// Set once the task leaves `Pending`; blocks further edits
    #[serde(default)]
    pub locked: bool,
}

impl Task {
    /// Build a pending, unlocked task from already-validated input
    pub fn new(input: NewTask, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title.trim().to_string(),
            category: input.category,
            priority: input.priority,
            date,
            start_time: input.start_time.trim().to_string(),
            end_time: input.end_time.trim().to_string(),
            estimated_minutes: input.estimated_minutes,
            is_critical: input.is_critical,
            state: TaskState::Pending,
            locked: false,
        }
    }

    pub fn start_minutes(&self) -> Option<u32> {
        time_to_minutes(&self.start_time)
    }

    pub fn end_minutes(&self) -> Option<u32> {
        time_to_minutes(&self.end_time)
    }

    pub fn is_resolved(&self) -> bool {
        self.state.is_resolved()
    }

    /// Move into a terminal state and lock the task
    pub(crate) fn resolve(&mut self, state: TaskState) {
        self.state = state;
        self.locked = true;
    }

    /// First 8 characters of the id, used for display and CLI lookups
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    /// "HH:MM–HH:MM"
    pub fn time_range(&self) -> String {
        format!("{}–{}", self.start_time, self.end_time)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::input;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_task_new_is_pending_and_unlocked() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let task = Task::new(input("  Read chapter 4 ", "09:00", "10:00"), date);
        assert_eq!(task.title, "Read chapter 4");
        assert_eq!(task.state, TaskState::Pending);
        assert!(!task.locked);
        assert_eq!(task.date, date);
        assert_eq!(task.start_minutes(), Some(540));
        assert_eq!(task.end_minutes(), Some(600));
        assert_eq!(task.time_range(), "09:00–10:00");
        assert_eq!(task.short_id().len(), 8);
    }

    #[test]
    fn test_task_ids_are_unique() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let a = Task::new(input("A", "09:00", "10:00"), date);
        let b = Task::new(input("B", "09:00", "10:00"), date);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_task_json_uses_camel_case() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let task = Task::new(input("Run", "07:00", "07:30"), date);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["startTime"], "07:00");
        assert_eq!(json["estimatedMinutes"], 60.0);
        assert_eq!(json["isCritical"], false);
        assert_eq!(json["date"], "2024-03-10");
        assert_eq!(json["state"], "pending");

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_task_error_messages() {
        assert_eq!(
            TaskError::NotFound("abc".to_string()).to_string(),
            "No task matches 'abc'"
        );
        assert_eq!(
            TaskError::InvalidInput("Title is required.".to_string()).to_string(),
            "Invalid input: Title is required."
        );
    }
}
