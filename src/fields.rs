//! Enumerations and field types for task management.
//!
//! This module defines the small structured types shared by the store, the
//! form validation and the terminal UI: priority levels, the list tabs and
//! the names of the editable form fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Priority classification for a task.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    #[serde(alias = "Low")]
    Low,
    #[default]
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

impl Priority {
    /// All priorities in selector order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Lowercase label used in the task list badge.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Label used by the priority selector in the form.
    pub fn selector_label(self) -> &'static str {
        match self {
            Priority::Low => "Low Priority",
            Priority::Medium => "Medium Priority",
            Priority::High => "High Priority",
        }
    }

    /// Step through `ALL`, wrapping at either end.
    pub fn cycle(self, forward: bool) -> Priority {
        let idx = Priority::ALL.iter().position(|&p| p == self).unwrap_or(1);
        let len = Priority::ALL.len();
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        Priority::ALL[next]
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which half of the task collection is being shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListTab {
    #[default]
    Open,
    Completed,
}

impl ListTab {
    pub fn toggled(self) -> ListTab {
        match self {
            ListTab::Open => ListTab::Completed,
            ListTab::Completed => ListTab::Open,
        }
    }
}

/// Editable fields of the add/edit form, used as keys for validation errors.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    #[default]
    Title,
    Description,
    DueDate,
    Priority,
}

impl FormField {
    /// Fields in form order.
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Description,
        FormField::DueDate,
        FormField::Priority,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::DueDate => "due_date",
            FormField::Priority => "priority",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Task Title *",
            FormField::Description => "Description",
            FormField::DueDate => "Due Date *",
            FormField::Priority => "Priority Level",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_cycle_wraps() {
        assert_eq!(Priority::Medium.cycle(true), Priority::High);
        assert_eq!(Priority::High.cycle(true), Priority::Low);
        assert_eq!(Priority::Low.cycle(false), Priority::High);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_priority_serde_accepts_legacy_case() {
        let p: Priority = serde_json::from_str("\"High\"").unwrap();
        assert_eq!(p, Priority::High);
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"low\"");
    }
}
