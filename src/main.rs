//! # todo - Terminal To-Do Task Manager
//!
//! A small in-memory to-do manager with a terminal user interface (TUI) and a
//! headless replay mode for scripting and testing.
//!
//! ## Key Features
//!
//! - **Splash and Mock Sign-In**: A timed splash screen followed by a simulated
//!   "Sign in with Google" step; no real authentication takes place
//! - **Open / Completed Tabs**: Tasks are split by completion state, each tab
//!   with its own count and empty-state message
//! - **Add / Edit Form**: Title, description, due date and priority, with
//!   per-field validation messages
//! - **Explicit Navigation**: Screen changes go through a single transition
//!   table, so every (screen, event) pair has a defined result
//! - **Replay Mode**: Feed JSON-lines intents on stdin and read back the
//!   state after each one
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI with the sample tasks
//! todo
//!
//! # Start empty and skip the splash delay
//! todo --empty --splash-ms 0
//!
//! # Drive the app headlessly
//! printf '{"intent":"splash_complete"}\n{"intent":"login_succeeded"}\n' | todo replay
//! ```
//!
//! ## Key Commands
//!
//! - `todo ui` - Launch the TUI (the default when no subcommand is given)
//! - `todo replay [FILE]` - Apply intents from a file or stdin, one JSON object per line
//! - `todo completions <SHELL>` - Print shell completion scripts
//!
//! Tasks live in memory only; every run starts from the samples (or nothing
//! with `--empty`). The TUI logs to `<temp dir>/todo-tasks.log` unless
//! `--log-file` says otherwise.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod controller;
pub mod dates;
pub mod error;
pub mod fields;
pub mod logging;
pub mod nav;
pub mod notice;
pub mod store;
pub mod task;
pub mod timer;
pub mod validation;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
    pub mod view;
}

use cli::Cli;
use cmd::*;
use config::AppConfig;
use error::AppError;
use logging::{default_log_path, LogTarget};

fn main() {
    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli);
    let command = cli.command.clone().unwrap_or(Commands::Ui);

    // The TUI owns the terminal, so its logs go to a file; replay keeps
    // stdout for JSON and logs to stderr unless a file is given.
    let target = match &command {
        Commands::Ui => Some(LogTarget::File(cli.log_file.clone().unwrap_or_else(default_log_path))),
        Commands::Replay { .. } => Some(cli.log_file.clone().map_or(LogTarget::Stderr, LogTarget::File)),
        Commands::Completions { .. } => None,
    };
    if let Some(target) = target {
        if let Err(e) = logging::init(cli.log_level, &target) {
            eprintln!("{}", AppError::from(e));
            std::process::exit(1);
        }
    }

    match command {
        Commands::Ui => cmd_ui(config),
        Commands::Replay { input } => cmd_replay(&config, input),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}
