//! Task data structure and related functionality.
//!
//! This module defines the `Task` record held by the store and the
//! `TaskDraft` the add/edit form produces before validation.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::fields::Priority;

/// Identifier assigned by the store when a task is created.
pub type TaskId = u64;

/// A single to-do item.
///
/// `id` and `created_at` are fixed at creation; everything else can be
/// replaced through an edit, and `completed` is flipped by toggling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: NaiveDate,
}

impl Task {
    /// Draft pre-filled from this task, as the edit form starts out.
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: Some(self.due_date),
            priority: self.priority,
        }
    }
}

/// In-progress field set of the add/edit form.
///
/// A missing, null or blank `due_date` is the empty date; nothing here has
/// been validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TaskDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
}

/// Accept `YYYY-MM-DD`, null or a blank string (the empty date input).
fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(de::Error::custom),
    }
}

impl TaskDraft {
    pub fn new(title: &str, due_date: Option<NaiveDate>) -> Self {
        TaskDraft {
            title: title.to_string(),
            due_date,
            ..TaskDraft::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}
