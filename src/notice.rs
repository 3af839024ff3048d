//! Transient user-facing notifications.

use serde::Serialize;

/// A short (title, description) pair shown after an action succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    fn new(title: &str, description: &str) -> Self {
        Notice {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    pub fn created(task_title: &str) -> Self {
        Self::new("Task created!", task_title)
    }

    pub fn updated(task_title: &str) -> Self {
        Self::new("Task updated!", task_title)
    }

    /// Notice for a toggle, keyed on the completion state after the flip.
    pub fn toggled(task_title: &str, completed: bool) -> Self {
        if completed {
            Self::new("Task completed!", task_title)
        } else {
            Self::new("Task reopened", task_title)
        }
    }

    pub fn deleted(task_title: &str) -> Self {
        Self::new("Task deleted", task_title)
    }

    pub fn welcome() -> Self {
        Self::new("Welcome!", "Successfully logged in with Google")
    }

    /// One-line form for the status bar.
    pub fn status_line(&self) -> String {
        if self.description.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.description)
        }
    }
}
