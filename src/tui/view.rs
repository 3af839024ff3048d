//! Screen rendering.
//!
//! Everything here is a pure function of the borrowed `View`: the app hands
//! over the current screen, the store and the bits of UI state, and the
//! frame is drawn from that alone.

use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame,
};

use crate::config::{APP_NAME, APP_TAGLINE};
use crate::dates::{format_date, format_due_relative, truncate};
use crate::fields::{FormField, ListTab};
use crate::nav::Screen;
use crate::store::TaskStore;
use crate::task::Task;
use crate::tui::{
    colors::{priority_color, DESTRUCTIVE, MUTED, PRIMARY},
    enums::LoginPhase,
    task_form::TaskForm,
    utils::centered_rect,
};

/// Everything a frame is drawn from.
pub struct View<'a> {
    pub screen: Screen,
    pub store: &'a TaskStore,
    pub tab: ListTab,
    pub selected: Option<usize>,
    pub form: &'a TaskForm,
    pub login: LoginPhase,
    pub status: &'a str,
    pub today: NaiveDate,
}

/// Draw the current screen plus the status bar.
pub fn render(f: &mut Frame, view: &View) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    match view.screen {
        Screen::Splash => render_splash(f, chunks[0]),
        Screen::Login => render_login(f, chunks[0], view.login),
        Screen::TaskList => render_task_list(f, chunks[0], view),
        Screen::AddTask => render_form(f, chunks[0], view, false),
        Screen::EditTask(_) => render_form(f, chunks[0], view, true),
    }

    render_status_bar(f, chunks[1], view);
}

fn render_splash(f: &mut Frame, area: Rect) {
    let area = centered_rect(60, 40, area);
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("✔", Style::default().fg(PRIMARY))),
        Line::from(""),
        Line::from(Span::styled(APP_NAME, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
            APP_TAGLINE,
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled("Loading...", Style::default().fg(MUTED))),
    ];
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(PRIMARY)))
        .alignment(Alignment::Center);
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn render_login(f: &mut Frame, area: Rect, phase: LoginPhase) {
    let area = centered_rect(60, 50, area);
    let button = match phase {
        LoginPhase::Idle => Line::from(vec![
            Span::styled("[ Enter ]", Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)),
            Span::raw(" Sign in with Google"),
        ]),
        LoginPhase::SigningIn => Line::from(Span::styled(
            "Signing in...",
            Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
        )),
    };
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(APP_NAME, Style::default().fg(PRIMARY))),
        Line::from(""),
        Line::from(Span::styled("Welcome Back", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("Sign in to manage your tasks"),
        Line::from(""),
        button,
        Line::from(""),
        Line::from(Span::styled(
            "Don't have an account? Sign up with Google",
            Style::default().fg(MUTED),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(Screen::Login.title()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn task_row<'a>(task: &'a Task, today: NaiveDate) -> Row<'a> {
    let marker = if task.completed { "[x]" } else { "[ ]" };
    let due = if task.completed {
        format_date(task.due_date)
    } else {
        format!("{} ({})", format_date(task.due_date), format_due_relative(task.due_date, today))
    };
    let title_style = if task.completed {
        Style::default().fg(MUTED).add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };

    Row::new(vec![
        Cell::from(marker),
        Cell::from(Span::styled(task.title.as_str(), title_style)),
        Cell::from(Span::styled(
            task.priority.as_str(),
            Style::default().fg(priority_color(task.priority)).add_modifier(Modifier::BOLD),
        )),
        Cell::from(due),
        Cell::from(truncate(&task.description, 40)).style(Style::default().fg(MUTED)),
    ])
}

fn render_task_list(f: &mut Frame, area: Rect, view: &View) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(Screen::TaskList.title(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(APP_NAME, Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC)),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    let open = view.store.count(ListTab::Open);
    let done = view.store.count(ListTab::Completed);
    let tabs = Tabs::new(vec![
        format!("Open Tasks ({open})"),
        format!("Completed ({done})"),
    ])
    .select(match view.tab {
        ListTab::Open => 0,
        ListTab::Completed => 1,
    })
    .block(Block::default().borders(Borders::ALL))
    .highlight_style(Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
    .divider(" | ");
    f.render_widget(tabs, chunks[1]);

    let tasks: Vec<&Task> = view.store.list(view.tab).collect();
    if tasks.is_empty() {
        let message = match view.tab {
            ListTab::Open => "No open tasks. Great job!",
            ListTab::Completed => "No completed tasks yet",
        };
        let empty = Paragraph::new(vec![Line::from(""), Line::from(message)])
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(MUTED))
            .alignment(Alignment::Center);
        f.render_widget(empty, chunks[2]);
        return;
    }

    let header = Row::new(["", "Title", "Priority", "Due", "Description"].map(|h| {
        Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().bg(PRIMARY).fg(Color::White))
    .height(1);

    let rows: Vec<Row> = tasks.iter().map(|t| task_row(t, view.today)).collect();
    let widths = [
        Constraint::Length(3),
        Constraint::Min(24),
        Constraint::Length(8),
        Constraint::Length(24),
        Constraint::Min(20),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
        .highlight_symbol(">> ");

    let mut state = TableState::default().with_selected(view.selected);
    f.render_stateful_widget(table, chunks[2], &mut state);
}

fn render_form(f: &mut Frame, area: Rect, view: &View, is_edit: bool) {
    let form = view.form;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view.screen.title())
        .border_style(Style::default().fg(PRIMARY));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(1), Constraint::Length(1)];
    for _ in FormField::ALL {
        constraints.extend([Constraint::Length(1), Constraint::Length(3), Constraint::Length(1)]);
    }
    constraints.extend([Constraint::Length(1), Constraint::Min(0)]);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let subtitle = if is_edit { "Edit your task" } else { "Create a new task" };
    f.render_widget(
        Paragraph::new(Span::styled(subtitle, Style::default().add_modifier(Modifier::BOLD))),
        chunks[0],
    );

    let draft = form.draft_on(view.today);
    let due_unrecognised = form.due_unrecognised(view.today);
    for (i, field) in FormField::ALL.into_iter().enumerate() {
        let label_area = chunks[2 + i * 3];
        let input_area = chunks[3 + i * 3];
        let note_area = chunks[4 + i * 3];
        let focused = form.focus == field;

        f.render_widget(
            Paragraph::new(Span::styled(field.label(), Style::default().add_modifier(Modifier::BOLD))),
            label_area,
        );

        let (text, cursor) = match field {
            FormField::Title => (form.title.value.clone(), Some(form.title.cursor)),
            FormField::Description => (form.description.value.clone(), Some(form.description.cursor)),
            FormField::DueDate => (form.due.value.clone(), Some(form.due.cursor)),
            FormField::Priority => (format!("< {} >", form.priority.selector_label()), None),
        };
        let border = if focused { PRIMARY } else { MUTED };
        let input_style = match field {
            FormField::Priority => Style::default().fg(priority_color(form.priority)),
            _ => Style::default(),
        };
        f.render_widget(
            Paragraph::new(Span::styled(text, input_style))
                .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(border))),
            input_area,
        );
        if let (true, Some(cursor)) = (focused, cursor) {
            // Offset of the last interior column of the bordered box.
            let max_x = input_area.width.saturating_sub(3);
            let offset = u16::try_from(cursor.min(usize::from(max_x))).unwrap_or(max_x);
            f.set_cursor_position((
                input_area.x + 1 + offset,
                input_area.y + 1,
            ));
        }

        let note = if let Some(message) = form.errors.get(field) {
            Some(Span::styled(format!("! {message}"), Style::default().fg(DESTRUCTIVE)))
        } else if field == FormField::DueDate && due_unrecognised {
            Some(Span::styled(
                "unrecognised date (try YYYY-MM-DD, today, tomorrow, in 3d, next fri)",
                Style::default().fg(DESTRUCTIVE),
            ))
        } else if field == FormField::DueDate {
            draft
                .due_date
                .map(|date| Span::styled(format!("→ {}", format_date(date)), Style::default().fg(MUTED)))
        } else {
            None
        };
        if let Some(note) = note {
            f.render_widget(Paragraph::new(note), note_area);
        }
    }

    let save_label = if is_edit { "Update Task" } else { "Create Task" };
    let save_style = if form.can_save(view.today) {
        Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    };
    let buttons_area = chunks[2 + FormField::ALL.len() * 3];
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("[Enter] {save_label}"), save_style),
            Span::raw("    "),
            Span::raw("[Esc] Cancel"),
        ])),
        buttons_area,
    );
}

fn render_status_bar(f: &mut Frame, area: Rect, view: &View) {
    let text = if !view.status.is_empty() {
        view.status.to_string()
    } else {
        match view.screen {
            Screen::Splash => "Loading... | q: quit".to_string(),
            Screen::Login => match view.login {
                LoginPhase::Idle => "Enter: sign in | q: quit".to_string(),
                LoginPhase::SigningIn => "Signing in...".to_string(),
            },
            Screen::TaskList => {
                "a: add | e: edit | space: toggle | d: delete | Tab: switch tab | L: log out | q: quit"
                    .to_string()
            }
            Screen::AddTask | Screen::EditTask(_) => {
                "Tab/↑↓: field | ←→: cursor/priority | Enter: save | Esc: cancel".to_string()
            }
        }
    };
    let status = Paragraph::new(text)
        .style(Style::default().bg(PRIMARY).fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::input::InputField;
    use ratatui::{backend::TestBackend, Terminal};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 11).unwrap()
    }

    fn draw(view: &View) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, view)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn view<'a>(screen: Screen, store: &'a TaskStore, form: &'a TaskForm) -> View<'a> {
        View {
            screen,
            store,
            tab: ListTab::Open,
            selected: Some(0),
            form,
            login: LoginPhase::Idle,
            status: "",
            today: today(),
        }
    }

    #[test]
    fn test_splash_shows_name_and_tagline() {
        let store = TaskStore::new();
        let form = TaskForm::new();
        let out = draw(&view(Screen::Splash, &store, &form));
        assert!(out.contains(APP_NAME));
        assert!(out.contains(APP_TAGLINE));
        assert!(out.contains("Loading..."));
    }

    #[test]
    fn test_login_shows_signing_in_state() {
        let store = TaskStore::new();
        let form = TaskForm::new();
        let mut v = view(Screen::Login, &store, &form);
        assert!(draw(&v).contains("Sign in with Google"));
        v.login = LoginPhase::SigningIn;
        let out = draw(&v);
        assert!(out.contains("Signing in..."));
        assert!(!out.contains("Sign in with Google"));
    }

    #[test]
    fn test_task_list_tabs_and_rows() {
        let store = TaskStore::with_samples();
        let form = TaskForm::new();
        let mut v = view(Screen::TaskList, &store, &form);
        let out = draw(&v);
        assert!(out.contains("Open Tasks (2)"));
        assert!(out.contains("Completed (1)"));
        assert!(out.contains("Buy groceries"));
        assert!(out.contains("Dec 12, 2024"));
        assert!(!out.contains("Book dentist appointment"));

        v.tab = ListTab::Completed;
        let out = draw(&v);
        assert!(out.contains("Book dentist appointment"));
        assert!(!out.contains("Buy groceries"));
    }

    #[test]
    fn test_empty_tabs_show_messages() {
        let store = TaskStore::new();
        let form = TaskForm::new();
        let mut v = view(Screen::TaskList, &store, &form);
        v.selected = None;
        assert!(draw(&v).contains("No open tasks. Great job!"));
        v.tab = ListTab::Completed;
        assert!(draw(&v).contains("No completed tasks yet"));
    }

    #[test]
    fn test_form_shows_field_errors() {
        let store = TaskStore::new();
        let mut form = TaskForm::new();
        assert!(!form.check());
        let out = draw(&view(Screen::AddTask, &store, &form));
        assert!(out.contains("Add New Task"));
        assert!(out.contains("Title is required"));
        assert!(out.contains("Due date is required"));
        assert!(out.contains("Create Task"));
    }

    #[test]
    fn test_edit_form_prefilled() {
        let store = TaskStore::with_samples();
        let form = TaskForm::from_task(store.get(1).unwrap());
        let out = draw(&view(Screen::EditTask(1), &store, &form));
        assert!(out.contains("Edit your task"));
        assert!(out.contains("Complete project presentation"));
        assert!(out.contains("2024-12-15"));
        assert!(out.contains("High Priority"));
        assert!(out.contains("Update Task"));
    }

    #[test]
    fn test_status_message_overrides_hints() {
        let store = TaskStore::with_samples();
        let form = TaskForm::new();
        let mut v = view(Screen::TaskList, &store, &form);
        v.status = "Task deleted Buy groceries";
        assert!(draw(&v).contains("Task deleted Buy groceries"));
    }

    #[test]
    fn test_out_of_range_due_shows_hint() {
        let store = TaskStore::new();
        let mut form = TaskForm::new();
        form.due = InputField::with_value("in 99999999999d");
        let out = draw(&view(Screen::AddTask, &store, &form));
        assert!(out.contains("unrecognised date"));
    }

    #[test]
    fn test_cursor_stays_inside_long_input() {
        let store = TaskStore::new();
        let mut form = TaskForm::new();
        form.title = InputField::with_value(&"x".repeat(70_000));
        let v = view(Screen::AddTask, &store, &form);

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, &v)).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        // Title box occupies columns 1..=118; its interior ends at 117.
        assert_eq!(cursor.x, 117);
        assert_eq!(cursor.y, 4);
    }
}
