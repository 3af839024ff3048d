//! Task form handling for the terminal user interface.
//!
//! `TaskForm` holds the raw text of the add/edit form and converts it into a
//! `TaskDraft`. Due-date text that cannot be parsed becomes an empty date,
//! so it is reported by validation like a blank field.

use chrono::{Local, NaiveDate};

use crate::dates::parse_due_input;
use crate::fields::{FormField, Priority};
use crate::task::{Task, TaskDraft};
use crate::tui::input::InputField;
use crate::validation::{is_submittable, validate, FieldErrors};

/// Add/edit form state.
#[derive(Clone, Debug, Default)]
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub due: InputField,
    pub priority: Priority,
    pub focus: FormField,
    /// Errors from the last rejected save; shown until the next attempt.
    pub errors: FieldErrors,
}

impl TaskForm {
    /// Empty form for a new task.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form populated from an existing task.
    pub fn from_task(task: &Task) -> Self {
        TaskForm {
            title: InputField::with_value(&task.title),
            description: InputField::with_value(&task.description),
            due: InputField::with_value(&task.due_date.format("%Y-%m-%d").to_string()),
            priority: task.priority,
            ..Self::default()
        }
    }

    /// Draft as of `today`, used to resolve relative due dates.
    pub fn draft_on(&self, today: NaiveDate) -> TaskDraft {
        TaskDraft {
            title: self.title.value.clone(),
            description: self.description.value.clone(),
            due_date: parse_due_input(&self.due.value, today),
            priority: self.priority,
        }
    }

    pub fn draft(&self) -> TaskDraft {
        self.draft_on(Local::now().date_naive())
    }

    /// Whether the save action is enabled.
    pub fn can_save(&self, today: NaiveDate) -> bool {
        is_submittable(&self.draft_on(today))
    }

    /// Validate for a save attempt, remembering the errors for display.
    pub fn check(&mut self) -> bool {
        self.errors = validate(&self.draft());
        self.errors.is_empty()
    }

    /// Due text is present but not a date we understand.
    pub fn due_unrecognised(&self, today: NaiveDate) -> bool {
        !self.due.value.trim().is_empty() && parse_due_input(&self.due.value, today).is_none()
    }

    fn field_index(&self) -> usize {
        FormField::ALL.iter().position(|&f| f == self.focus).unwrap_or(0)
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        let len = FormField::ALL.len();
        self.focus = FormField::ALL[(self.field_index() + 1) % len];
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        let len = FormField::ALL.len();
        self.focus = FormField::ALL[(self.field_index() + len - 1) % len];
    }

    fn active_input(&mut self) -> Option<&mut InputField> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due),
            FormField::Priority => None,
        }
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.active_input() {
            field.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.active_input() {
            field.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(field) = self.active_input() {
            field.handle_delete();
        }
    }

    /// Left/right move the cursor in text fields and cycle the priority selector.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.active_input() {
            Some(field) if right => field.move_cursor_right(),
            Some(field) => field.move_cursor_left(),
            None => self.priority = self.priority.cycle(right),
        }
    }

    pub fn handle_home_end(&mut self, end: bool) {
        if let Some(field) = self.active_input() {
            if end {
                field.move_end();
            } else {
                field.move_home();
            }
        }
    }
}
