use serde::{Deserialize, Serialize};

/// Fixed set of task categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Study,
    Health,
    Coding,
    Personal,
}

impl Category {
    /// Parse a category name (case-insensitive)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "study" => Some(Self::Study),
            "health" => Some(Self::Health),
            "coding" => Some(Self::Coding),
            "personal" => Some(Self::Personal),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Study => "Study",
            Self::Health => "Health",
            Self::Coding => "Coding",
            Self::Personal => "Personal",
        }
    }

    /// All categories in their fixed reporting order
    pub fn all() -> &'static [Category] {
        &[
            Category::Study,
            Category::Health,
            Category::Coding,
            Category::Personal,
        ]
    }

    /// Position in [`Category::all`]
    pub fn index(&self) -> usize {
        match self {
            Self::Study => 0,
            Self::Health => 1,
            Self::Coding => 2,
            Self::Personal => 3,
        }
    }
}

/// Informational severity tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Lifecycle state of a task. `Completed` and `Missed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Pending,
    Completed,
    Missed,
}

impl TaskState {
    /// Completed or missed
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Completed | Self::Missed)
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
    Message,
}

/// Which tasks the task table shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    /// Only tasks on the currently viewed date
    ViewedDate,
    All,
}

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Schedule,
    Yearly,
}
