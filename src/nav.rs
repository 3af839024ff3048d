//! Screen navigation state machine.
//!
//! The transition table is plain data: one `Rule` per event kind, saying
//! what the event does to the session flag, the editing context and the
//! current screen. `NavState::next` looks the rule up and applies it. Every
//! event is accepted from every screen, and logging out loops back to the
//! login screen, so there is no terminal state.

use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// Which view is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "screen", content = "task_id")]
pub enum Screen {
    Splash,
    Login,
    TaskList,
    AddTask,
    EditTask(TaskId),
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Splash => "Splash",
            Screen::Login => "Sign In",
            Screen::TaskList => "My Tasks",
            Screen::AddTask => "Add New Task",
            Screen::EditTask(_) => "Edit Task",
        }
    }

    /// Whether this is one of the two form screens.
    pub fn is_form(&self) -> bool {
        matches!(self, Screen::AddTask | Screen::EditTask(_))
    }
}

/// Events the navigation state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    SplashComplete,
    LoginSucceeded,
    LogoutRequested,
    AddTaskRequested,
    EditTaskRequested(TaskId),
    TaskSaved,
    TaskEditCancelled,
}

/// Payload-free discriminant of `NavEvent`, used to key the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    SplashComplete,
    LoginSucceeded,
    LogoutRequested,
    AddTaskRequested,
    EditTaskRequested,
    TaskSaved,
    TaskEditCancelled,
}

impl NavEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            NavEvent::SplashComplete => EventKind::SplashComplete,
            NavEvent::LoginSucceeded => EventKind::LoginSucceeded,
            NavEvent::LogoutRequested => EventKind::LogoutRequested,
            NavEvent::AddTaskRequested => EventKind::AddTaskRequested,
            NavEvent::EditTaskRequested(_) => EventKind::EditTaskRequested,
            NavEvent::TaskSaved => EventKind::TaskSaved,
            NavEvent::TaskEditCancelled => EventKind::TaskEditCancelled,
        }
    }
}

/// Effect of a rule on the logged-in flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    Keep,
    LogIn,
    LogOut,
}

/// Effect of a rule on the task being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditingChange {
    Keep,
    Clear,
    /// Take the id carried by the event.
    FromEvent,
}

/// Where a rule sends the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Login,
    TaskList,
    AddTask,
    /// `EditTask` for the id carried by the event.
    EditTask,
    /// `TaskList` when logged in, `Login` otherwise.
    ListIfLoggedIn,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub event: EventKind,
    pub session: SessionChange,
    pub editing: EditingChange,
    pub target: Target,
}

pub const RULES: [Rule; 7] = [
    Rule {
        event: EventKind::SplashComplete,
        session: SessionChange::Keep,
        editing: EditingChange::Keep,
        target: Target::ListIfLoggedIn,
    },
    Rule {
        event: EventKind::LoginSucceeded,
        session: SessionChange::LogIn,
        editing: EditingChange::Keep,
        target: Target::TaskList,
    },
    Rule {
        event: EventKind::LogoutRequested,
        session: SessionChange::LogOut,
        editing: EditingChange::Keep,
        target: Target::Login,
    },
    Rule {
        event: EventKind::AddTaskRequested,
        session: SessionChange::Keep,
        editing: EditingChange::Clear,
        target: Target::AddTask,
    },
    Rule {
        event: EventKind::EditTaskRequested,
        session: SessionChange::Keep,
        editing: EditingChange::FromEvent,
        target: Target::EditTask,
    },
    Rule {
        event: EventKind::TaskSaved,
        session: SessionChange::Keep,
        editing: EditingChange::Keep,
        target: Target::TaskList,
    },
    Rule {
        event: EventKind::TaskEditCancelled,
        session: SessionChange::Keep,
        editing: EditingChange::Keep,
        target: Target::TaskList,
    },
];

/// Rule governing `kind`. `RULES` is laid out in `EventKind` order.
pub fn rule_for(kind: EventKind) -> &'static Rule {
    &RULES[kind as usize]
}

/// Navigation state: current screen, editing context and session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavState {
    pub screen: Screen,
    pub editing: Option<TaskId>,
    pub logged_in: bool,
}

impl Default for NavState {
    fn default() -> Self {
        NavState {
            screen: Screen::Splash,
            editing: None,
            logged_in: false,
        }
    }
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State after `event`. Total over every (state, event) pair.
    pub fn next(&self, event: NavEvent) -> NavState {
        let rule = rule_for(event.kind());
        let carried = match event {
            NavEvent::EditTaskRequested(id) => Some(id),
            _ => None,
        };

        let logged_in = match rule.session {
            SessionChange::Keep => self.logged_in,
            SessionChange::LogIn => true,
            SessionChange::LogOut => false,
        };
        let editing = match rule.editing {
            EditingChange::Keep => self.editing,
            EditingChange::Clear => None,
            EditingChange::FromEvent => carried,
        };
        let screen = match (rule.target, carried) {
            (Target::Login, _) => Screen::Login,
            (Target::TaskList, _) => Screen::TaskList,
            (Target::AddTask, _) => Screen::AddTask,
            (Target::EditTask, Some(id)) => Screen::EditTask(id),
            (Target::EditTask, None) => Screen::TaskList,
            (Target::ListIfLoggedIn, _) if logged_in => Screen::TaskList,
            (Target::ListIfLoggedIn, _) => Screen::Login,
        };

        NavState {
            screen,
            editing,
            logged_in,
        }
    }
}
