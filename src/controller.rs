//! Top-level controller tying navigation and the task store together.
//!
//! The presentation layer sends `Intent`s; `Controller::dispatch` applies
//! each one to completion before returning, updating the store, moving the
//! navigation state machine and queueing notices for display.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::TaskError;
use crate::nav::{NavEvent, NavState, Screen};
use crate::notice::Notice;
use crate::store::TaskStore;
use crate::task::{Task, TaskDraft, TaskId};
use crate::validation::{validate, FieldErrors};

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    SplashComplete,
    LoginSucceeded,
    LogoutRequested,
    AddTaskRequested,
    EditTaskRequested { id: TaskId },
    TaskSaved { draft: TaskDraft },
    TaskEditCancelled,
    ToggleComplete { id: TaskId },
    DeleteTask { id: TaskId },
}

/// What happened to an accepted intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    /// The intent named a task that is not in the store; nothing changed.
    MissingTask(TaskId),
}

/// Borrowed view of the controller state, as handed to the replay driver.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub screen: Screen,
    pub logged_in: bool,
    pub editing: Option<TaskId>,
    pub open: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

/// Owns the navigation state, the task store and pending notices.
#[derive(Debug, Clone)]
pub struct Controller {
    nav: NavState,
    store: TaskStore,
    notices: VecDeque<Notice>,
}

impl Controller {
    pub fn new(store: TaskStore) -> Self {
        Controller {
            nav: NavState::new(),
            store,
            notices: VecDeque::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.nav.screen
    }

    pub fn is_logged_in(&self) -> bool {
        self.nav.logged_in
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// The task the edit form was opened for, if it still exists.
    pub fn editing_task(&self) -> Option<&Task> {
        self.nav.editing.and_then(|id| self.store.get(id))
    }

    /// Drain queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            screen: self.nav.screen,
            logged_in: self.nav.logged_in,
            editing: self.nav.editing,
            open: self.store.list_open().collect(),
            completed: self.store.list_completed().collect(),
        }
    }

    /// Apply one intent.
    ///
    /// Only `TaskSaved` can be refused: an invalid draft returns its field
    /// errors and leaves both the store and the screen untouched. Intents
    /// naming an unknown task change nothing and report `MissingTask`.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome, FieldErrors> {
        let outcome = match intent {
            Intent::SplashComplete => self.navigate(NavEvent::SplashComplete),
            Intent::LoginSucceeded => {
                self.notices.push_back(Notice::welcome());
                info!("login succeeded");
                self.navigate(NavEvent::LoginSucceeded)
            }
            Intent::LogoutRequested => {
                info!("logout requested");
                self.navigate(NavEvent::LogoutRequested)
            }
            Intent::AddTaskRequested => self.navigate(NavEvent::AddTaskRequested),
            Intent::EditTaskRequested { id } => {
                if self.store.get(id).is_none() {
                    return Ok(self.missing(id, "edit"));
                }
                self.navigate(NavEvent::EditTaskRequested(id))
            }
            Intent::TaskSaved { draft } => return self.save(&draft),
            Intent::TaskEditCancelled => self.navigate(NavEvent::TaskEditCancelled),
            Intent::ToggleComplete { id } => match self.store.toggle_complete(id) {
                Ok(completed) => {
                    if let Some(task) = self.store.get(id) {
                        self.notices.push_back(Notice::toggled(&task.title, completed));
                    }
                    Outcome::Applied
                }
                Err(err) => self.absorb(err, "toggle")?,
            },
            Intent::DeleteTask { id } => match self.store.delete(id) {
                Ok(task) => {
                    self.notices.push_back(Notice::deleted(&task.title));
                    Outcome::Applied
                }
                Err(err) => self.absorb(err, "delete")?,
            },
        };
        Ok(outcome)
    }

    fn save(&mut self, draft: &TaskDraft) -> Result<Outcome, FieldErrors> {
        let errors = validate(draft);
        if !errors.is_empty() {
            warn!(%errors, "draft rejected");
            return Err(errors);
        }

        let result = match self.nav.editing {
            None => self.store.create(draft).map(|t| Notice::created(&t.title)),
            Some(id) => self.store.update(id, draft).map(|t| Notice::updated(&t.title)),
        };
        let outcome = match result {
            Ok(notice) => {
                self.notices.push_back(notice);
                Outcome::Applied
            }
            Err(err) => self.absorb(err, "update")?,
        };
        self.navigate(NavEvent::TaskSaved);
        Ok(outcome)
    }

    /// Turn a store error into an outcome, passing validation failures back.
    fn absorb(&self, err: TaskError, op: &str) -> Result<Outcome, FieldErrors> {
        match err {
            TaskError::NotFound(id) => Ok(self.missing(id, op)),
            TaskError::Invalid(errors) => Err(errors),
        }
    }

    fn missing(&self, id: TaskId, op: &str) -> Outcome {
        warn!(id, op, "task not found, ignoring");
        Outcome::MissingTask(id)
    }

    fn navigate(&mut self, event: NavEvent) -> Outcome {
        let next = self.nav.next(event);
        if next.screen != self.nav.screen {
            info!(from = ?self.nav.screen, to = ?next.screen, "screen changed");
        }
        self.nav = next;
        Outcome::Applied
    }
}
