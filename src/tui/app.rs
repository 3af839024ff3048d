//! Main application logic for the terminal user interface.
//!
//! `App` owns the `Controller` plus the purely visual state (form buffers,
//! the active tab, the selected row, pending timers) and turns key presses
//! and timer expiries into intents.

use std::io;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Frame, Terminal};
use tracing::debug;

use crate::config::AppConfig;
use crate::controller::{Controller, Intent, Outcome};
use crate::fields::ListTab;
use crate::nav::Screen;
use crate::store::TaskStore;
use crate::task::TaskId;
use crate::timer::OneShot;
use crate::tui::{
    enums::LoginPhase,
    task_form::TaskForm,
    view::{self, View},
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Terminal application state.
pub struct App {
    controller: Controller,
    config: AppConfig,
    form: TaskForm,
    tab: ListTab,
    selected: Option<usize>,
    login: LoginPhase,
    splash_timer: Option<OneShot>,
    login_timer: Option<OneShot>,
    status_message: String,
    shown: Screen,
}

impl App {
    /// Create the app on the splash screen with its timer armed at `now`.
    pub fn new(config: AppConfig, now: Instant) -> Self {
        let store = if config.seed_samples {
            TaskStore::with_samples()
        } else {
            TaskStore::new()
        };
        let controller = Controller::new(store);
        let shown = controller.screen();
        let splash_timer = Some(OneShot::start(now, config.splash_delay));
        let mut app = App {
            controller,
            config,
            form: TaskForm::new(),
            tab: ListTab::Open,
            selected: None,
            login: LoginPhase::Idle,
            splash_timer,
            login_timer: None,
            status_message: String::new(),
            shown,
        };
        app.clamp_selection();
        app
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn screen(&self) -> Screen {
        self.controller.screen()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Fire any timers whose deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.splash_timer.as_mut().is_some_and(|t| t.poll(now)) {
            self.dispatch(Intent::SplashComplete, now);
        }
        if self.login_timer.as_mut().is_some_and(|t| t.poll(now)) {
            self.dispatch(Intent::LoginSucceeded, now);
        }
    }

    /// How long the event loop may block before a timer needs servicing.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        [&self.splash_timer, &self.login_timer]
            .into_iter()
            .flatten()
            .filter_map(|t| t.remaining(now))
            .fold(POLL_INTERVAL, Duration::min)
    }

    /// Handle one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.status_message.clear();

        match self.controller.screen() {
            Screen::Splash => matches!(key.code, KeyCode::Char('q') | KeyCode::Esc),
            Screen::Login => self.handle_login_input(key.code, now),
            Screen::TaskList => self.handle_task_list_input(key.code, now),
            screen if screen.is_form() => {
                self.handle_form_input(key.code, now);
                false
            }
            _ => false,
        }
    }

    fn handle_login_input(&mut self, code: KeyCode, now: Instant) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Enter if self.login == LoginPhase::Idle => {
                debug!("mock sign-in started");
                self.login = LoginPhase::SigningIn;
                self.login_timer = Some(OneShot::start(now, self.config.login_delay));
            }
            _ => {}
        }
        false
    }

    fn handle_task_list_input(&mut self, code: KeyCode, now: Instant) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.tab = self.tab.toggled();
                self.selected = None;
                self.clamp_selection();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.map(|i| i.saturating_sub(1));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = self.selected.map(|i| i + 1);
                self.clamp_selection();
            }
            KeyCode::Char(' ') | KeyCode::Char('c') => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(Intent::ToggleComplete { id }, now);
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(Intent::EditTaskRequested { id }, now);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(Intent::DeleteTask { id }, now);
                }
            }
            KeyCode::Char('a') => {
                self.dispatch(Intent::AddTaskRequested, now);
            }
            KeyCode::Char('L') => {
                self.dispatch(Intent::LogoutRequested, now);
            }
            _ => {}
        }
        false
    }

    fn handle_form_input(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Esc => {
                self.dispatch(Intent::TaskEditCancelled, now);
            }
            KeyCode::Enter => self.submit_form(now),
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Home => self.form.handle_home_end(false),
            KeyCode::End => self.form.handle_home_end(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Delete => self.form.handle_delete(),
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
    }

    fn submit_form(&mut self, now: Instant) {
        if !self.form.check() {
            self.status_message = "Please fix the highlighted fields".to_string();
            return;
        }
        let draft = self.form.draft();
        self.dispatch(Intent::TaskSaved { draft }, now);
        if !self.form.errors.is_empty() {
            self.status_message = "Please fix the highlighted fields".to_string();
        }
    }

    fn selected_id(&self) -> Option<TaskId> {
        let index = self.selected?;
        self.controller.store().list(self.tab).nth(index).map(|t| t.id)
    }

    fn clamp_selection(&mut self) {
        let count = self.controller.store().count(self.tab);
        self.selected = match count {
            0 => None,
            n => Some(self.selected.unwrap_or(0).min(n - 1)),
        };
    }

    /// Send an intent to the controller and reconcile the visual state.
    /// A refused save leaves its field errors on the form.
    fn dispatch(&mut self, intent: Intent, now: Instant) {
        match self.controller.dispatch(intent) {
            Ok(Outcome::Applied) => {}
            Ok(Outcome::MissingTask(id)) => {
                self.status_message = format!("Task {id} no longer exists");
            }
            Err(errors) => self.form.errors = errors,
        }
        if let Some(notice) = self.controller.take_notices().pop() {
            self.status_message = notice.status_line();
        }
        self.enter_screen(now);
        self.clamp_selection();
    }

    /// Tear down the old screen's timers and prepare the new one.
    fn enter_screen(&mut self, now: Instant) {
        let screen = self.controller.screen();
        if screen == self.shown {
            return;
        }
        let left = std::mem::replace(&mut self.shown, screen);
        let pending = [self.splash_timer.take(), self.login_timer.take()]
            .into_iter()
            .flatten()
            .filter(OneShot::is_armed)
            .count();
        if pending > 0 {
            debug!(?left, pending, "dropped timers of previous screen");
        }
        self.login = LoginPhase::Idle;

        match screen {
            Screen::Splash => {
                self.splash_timer = Some(OneShot::start(now, self.config.splash_delay));
            }
            Screen::AddTask => self.form = TaskForm::new(),
            Screen::EditTask(_) => {
                self.form = self
                    .controller
                    .editing_task()
                    .map(TaskForm::from_task)
                    .unwrap_or_default();
            }
            Screen::Login | Screen::TaskList => {}
        }
    }

    fn render(&self, f: &mut Frame) {
        view::render(
            f,
            &View {
                screen: self.controller.screen(),
                store: self.controller.store(),
                tab: self.tab,
                selected: self.selected,
                form: &self.form,
                login: self.login,
                status: &self.status_message,
                today: Local::now().date_naive(),
            },
        );
    }

    /// Poll for a key press, waking early when a timer is due.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(self.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key, Instant::now()));
            }
        }
        Ok(false)
    }

    /// Main event loop for the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
            self.tick(Instant::now());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FormField, Priority};

    fn press(app: &mut App, code: KeyCode, now: Instant) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now)
    }

    fn type_str(app: &mut App, s: &str, now: Instant) {
        for c in s.chars() {
            press(app, KeyCode::Char(c), now);
        }
    }

    fn config() -> AppConfig {
        AppConfig {
            splash_delay: Duration::from_millis(2000),
            login_delay: Duration::from_millis(1500),
            seed_samples: true,
        }
    }

    /// App already past splash and login, on the task list.
    fn signed_in(now: Instant) -> App {
        let mut app = App::new(config(), now);
        app.tick(now + Duration::from_secs(2));
        press(&mut app, KeyCode::Enter, now);
        app.tick(now + Duration::from_secs(4));
        assert_eq!(app.screen(), Screen::TaskList);
        app
    }

    #[test]
    fn test_splash_timer_advances_to_login() {
        let t0 = Instant::now();
        let mut app = App::new(config(), t0);
        assert_eq!(app.screen(), Screen::Splash);
        app.tick(t0 + Duration::from_millis(1999));
        assert_eq!(app.screen(), Screen::Splash);
        app.tick(t0 + Duration::from_millis(2000));
        assert_eq!(app.screen(), Screen::Login);
        assert!(app.splash_timer.is_none());
    }

    #[test]
    fn test_login_waits_for_delay_and_ignores_repeat_presses() {
        let t0 = Instant::now();
        let mut app = App::new(config(), t0);
        app.tick(t0 + Duration::from_secs(2));

        let t1 = t0 + Duration::from_secs(3);
        press(&mut app, KeyCode::Enter, t1);
        assert_eq!(app.login, LoginPhase::SigningIn);
        press(&mut app, KeyCode::Enter, t1 + Duration::from_millis(1000));
        app.tick(t1 + Duration::from_millis(1499));
        assert_eq!(app.screen(), Screen::Login);

        app.tick(t1 + Duration::from_millis(1500));
        assert_eq!(app.screen(), Screen::TaskList);
        assert!(app.controller().is_logged_in());
        assert_eq!(app.status_message(), "Welcome! Successfully logged in with Google");
        assert_eq!(app.login, LoginPhase::Idle);
    }

    #[test]
    fn test_leaving_login_drops_pending_sign_in() {
        let t0 = Instant::now();
        let mut app = App::new(config(), t0);
        app.tick(t0 + Duration::from_secs(2));
        press(&mut app, KeyCode::Enter, t0 + Duration::from_secs(2));
        assert!(app.login_timer.is_some());

        app.dispatch(Intent::AddTaskRequested, t0 + Duration::from_secs(3));
        assert_eq!(app.screen(), Screen::AddTask);
        assert!(app.login_timer.is_none());
        app.tick(t0 + Duration::from_secs(10));
        assert_eq!(app.screen(), Screen::AddTask);
        assert!(!app.controller().is_logged_in());
    }

    #[test]
    fn test_poll_timeout_tracks_nearest_deadline() {
        let t0 = Instant::now();
        let app = App::new(config(), t0);
        assert_eq!(app.poll_timeout(t0), POLL_INTERVAL);
        assert_eq!(app.poll_timeout(t0 + Duration::from_millis(1990)), Duration::from_millis(10));
    }

    #[test]
    fn test_add_task_through_form() {
        let t0 = Instant::now();
        let mut app = signed_in(t0);
        press(&mut app, KeyCode::Char('a'), t0);
        assert_eq!(app.screen(), Screen::AddTask);

        type_str(&mut app, "Buy milk", t0);
        press(&mut app, KeyCode::Tab, t0);
        press(&mut app, KeyCode::Tab, t0);
        type_str(&mut app, "2024-12-20", t0);
        press(&mut app, KeyCode::Tab, t0);
        press(&mut app, KeyCode::Right, t0);
        press(&mut app, KeyCode::Enter, t0);

        assert_eq!(app.screen(), Screen::TaskList);
        let created = app.controller().store().iter().last().unwrap();
        assert_eq!(created.title, "Buy milk");
        assert_eq!(created.priority, Priority::High);
        assert_eq!(app.status_message(), "Task created! Buy milk");
        assert_eq!(app.controller().store().count(ListTab::Open), 3);
    }

    #[test]
    fn test_invalid_save_shows_errors_and_stays() {
        let t0 = Instant::now();
        let mut app = signed_in(t0);
        press(&mut app, KeyCode::Char('a'), t0);
        press(&mut app, KeyCode::Enter, t0);
        assert_eq!(app.screen(), Screen::AddTask);
        assert_eq!(app.form.errors.len(), 2);
        assert!(app.form.errors.contains(FormField::Title));
        assert_eq!(app.controller().store().len(), 3);
    }

    #[test]
    fn test_edit_prefills_and_cancel_discards() {
        let t0 = Instant::now();
        let mut app = signed_in(t0);
        press(&mut app, KeyCode::Down, t0);
        press(&mut app, KeyCode::Char('e'), t0);
        assert_eq!(app.screen(), Screen::EditTask(2));
        assert_eq!(app.form.title.value, "Buy groceries");

        type_str(&mut app, " and more", t0);
        press(&mut app, KeyCode::Esc, t0);
        assert_eq!(app.screen(), Screen::TaskList);
        assert_eq!(app.controller().store().get(2).unwrap().title, "Buy groceries");
    }

    #[test]
    fn test_toggle_moves_task_between_tabs() {
        let t0 = Instant::now();
        let mut app = signed_in(t0);
        press(&mut app, KeyCode::Char(' '), t0);
        assert!(app.controller().store().get(1).unwrap().completed);
        assert_eq!(app.controller().store().count(ListTab::Open), 1);
        assert_eq!(app.selected, Some(0));

        press(&mut app, KeyCode::Tab, t0);
        assert_eq!(app.tab, ListTab::Completed);
        press(&mut app, KeyCode::Char('c'), t0);
        assert!(!app.controller().store().get(1).unwrap().completed);
    }

    #[test]
    fn test_delete_last_row_clamps_selection() {
        let t0 = Instant::now();
        let mut app = signed_in(t0);
        press(&mut app, KeyCode::Tab, t0);
        press(&mut app, KeyCode::Char('d'), t0);
        assert_eq!(app.controller().store().count(ListTab::Completed), 0);
        assert_eq!(app.selected, None);
        assert_eq!(app.status_message(), "Task deleted Book dentist appointment");
        press(&mut app, KeyCode::Char('d'), t0);
        assert_eq!(app.controller().store().len(), 2);
    }

    #[test]
    fn test_logout_and_quit_keys() {
        let t0 = Instant::now();
        let mut app = signed_in(t0);
        assert!(!press(&mut app, KeyCode::Char('L'), t0));
        assert_eq!(app.screen(), Screen::Login);
        assert!(press(&mut app, KeyCode::Char('q'), t0));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let t0 = Instant::now();
        let mut app = signed_in(t0);
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(!app.handle_key(key, t0));
    }
}
