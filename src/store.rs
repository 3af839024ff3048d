//! In-memory task store.
//!
//! `TaskStore` owns every task for the lifetime of the process. Tasks are
//! keyed by id in a `BTreeMap`; ids come from a counter that only moves
//! forward, so key order is insertion order and the list views need no
//! separate ordering field.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::error::TaskError;
use crate::fields::{ListTab, Priority};
use crate::task::{Task, TaskDraft, TaskId};
use crate::validation::validate;

/// Insertion-ordered collection of tasks.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: BTreeMap<TaskId, Task>,
    next_id: TaskId,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore {
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the three example tasks shown on first launch.
    pub fn with_samples() -> Self {
        let mut store = Self::new();
        let samples = [
            (
                "Complete project presentation",
                "Prepare slides for the quarterly review meeting",
                (2024, 12, 15),
                Priority::High,
                false,
                (2024, 12, 10),
            ),
            (
                "Buy groceries",
                "Milk, bread, eggs, and vegetables",
                (2024, 12, 12),
                Priority::Medium,
                false,
                (2024, 12, 11),
            ),
            (
                "Book dentist appointment",
                "Regular checkup and cleaning",
                (2024, 12, 20),
                Priority::Low,
                true,
                (2024, 12, 8),
            ),
        ];
        for (title, description, due, priority, completed, created) in samples {
            let (Some(due_date), Some(created_at)) = (
                NaiveDate::from_ymd_opt(due.0, due.1, due.2),
                NaiveDate::from_ymd_opt(created.0, created.1, created.2),
            ) else {
                continue;
            };
            let id = store.allocate_id();
            store.tasks.insert(
                id,
                Task {
                    id,
                    title: title.to_string(),
                    description: description.to_string(),
                    due_date,
                    priority,
                    completed,
                    created_at,
                },
            );
        }
        store
    }

    fn allocate_id(&mut self) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create a task from a validated draft, dated today.
    pub fn create(&mut self, draft: &TaskDraft) -> Result<&Task, TaskError> {
        self.create_on(draft, Local::now().date_naive())
    }

    /// Create a task with an explicit creation date.
    pub fn create_on(&mut self, draft: &TaskDraft, today: NaiveDate) -> Result<&Task, TaskError> {
        let errors = validate(draft);
        let due_date = match draft.due_date {
            Some(due) if errors.is_empty() => due,
            _ => return Err(TaskError::Invalid(errors)),
        };

        let id = self.allocate_id();
        let task = Task {
            id,
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            due_date,
            priority: draft.priority,
            completed: false,
            created_at: today,
        };
        debug!(id, title = %task.title, "task created");
        Ok(&*self.tasks.entry(id).or_insert(task))
    }

    /// Replace the editable fields of an existing task.
    ///
    /// `id`, `created_at` and `completed` are left alone. The draft is
    /// checked before the id, so an invalid draft is reported even for a
    /// stale id.
    pub fn update(&mut self, id: TaskId, draft: &TaskDraft) -> Result<&Task, TaskError> {
        let errors = validate(draft);
        let due_date = match draft.due_date {
            Some(due) if errors.is_empty() => due,
            _ => return Err(TaskError::Invalid(errors)),
        };

        let task = self.tasks.get_mut(&id).ok_or(TaskError::NotFound(id))?;
        task.title = draft.title.trim().to_string();
        task.description = draft.description.trim().to_string();
        task.due_date = due_date;
        task.priority = draft.priority;
        debug!(id, title = %task.title, "task updated");
        Ok(&*task)
    }

    /// Flip `completed` and return the new value.
    pub fn toggle_complete(&mut self, id: TaskId) -> Result<bool, TaskError> {
        let task = self.tasks.get_mut(&id).ok_or(TaskError::NotFound(id))?;
        task.completed = !task.completed;
        debug!(id, completed = task.completed, "task toggled");
        Ok(task.completed)
    }

    /// Remove a task and hand it back.
    pub fn delete(&mut self, id: TaskId) -> Result<Task, TaskError> {
        let task = self.tasks.remove(&id).ok_or(TaskError::NotFound(id))?;
        debug!(id, title = %task.title, "task deleted");
        Ok(task)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> + Clone + '_ {
        self.tasks.values()
    }

    pub fn list_open(&self) -> impl Iterator<Item = &Task> + Clone + '_ {
        self.iter().filter(|t| !t.completed)
    }

    pub fn list_completed(&self) -> impl Iterator<Item = &Task> + Clone + '_ {
        self.iter().filter(|t| t.completed)
    }

    /// Tasks shown under `tab`, in insertion order.
    pub fn list(&self, tab: ListTab) -> impl Iterator<Item = &Task> + Clone + '_ {
        let want_completed = tab == ListTab::Completed;
        self.iter().filter(move |t| t.completed == want_completed)
    }

    /// Number of tasks under `tab`.
    pub fn count(&self, tab: ListTab) -> usize {
        self.list(tab).count()
    }
}
