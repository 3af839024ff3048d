use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::config::{DEFAULT_LOGIN_DELAY_MS, DEFAULT_SPLASH_MS};
use crate::logging::LogLevel;

/// In-memory to-do manager with a terminal UI.
/// Nothing is persisted; every run starts from the sample tasks (or none with --empty).
#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Terminal to-do task manager")]
pub struct Cli {
    /// Splash screen duration in milliseconds.
    #[arg(long, global = true, env = "TODO_SPLASH_MS", default_value_t = DEFAULT_SPLASH_MS)]
    pub splash_ms: u64,

    /// Mock sign-in delay in milliseconds.
    #[arg(long, global = true, env = "TODO_LOGIN_DELAY_MS", default_value_t = DEFAULT_LOGIN_DELAY_MS)]
    pub login_delay_ms: u64,

    /// Start with no tasks instead of the samples.
    #[arg(long, global = true)]
    pub empty: bool,

    /// Log verbosity (RUST_LOG overrides).
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log file for the terminal UI.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
