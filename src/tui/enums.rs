//! Enumerations for TUI state management.

/// Progress of the mock sign-in on the login screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LoginPhase {
    #[default]
    Idle,
    SigningIn,
}
