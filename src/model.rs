use serde::{Deserialize, Serialize};

/// Root of the persisted data file.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub goals: Vec<Goal>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(rename = "goal")]
    pub title: String,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl Goal {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            steps: Vec::new(),
        }
    }
}

/// A goal as shown in a numbered list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GoalEntry {
    pub position: usize,
    pub title: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DeleteOutcome {
    Deleted(Goal),
    /// The user answered no at the confirmation prompt.
    Declined,
    /// No goal number was given.
    Cancelled,
}
