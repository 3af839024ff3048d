//! Command implementations for the CLI interface.
//!
//! `ui` runs the terminal interface, `replay` drives the controller headlessly
//! from JSON-lines intents, and `completions` prints shell completion scripts.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::Subcommand;
use clap_complete::{generate, Shell};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::controller::{Controller, Intent, Outcome, Snapshot};
use crate::error::AppError;
use crate::notice::Notice;
use crate::store::TaskStore;
use crate::tui::run::run_tui;
use crate::validation::FieldErrors;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Launch the interactive terminal interface (default).
    Ui,

    /// Apply JSON-lines intents without a terminal and print the state after each.
    Replay {
        /// Intent file; reads stdin when omitted.
        input: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// One line of replay output.
#[derive(Debug, Serialize)]
struct ReplayRecord<'a> {
    line: usize,
    outcome: Option<Outcome>,
    errors: Option<FieldErrors>,
    notices: Vec<Notice>,
    state: Snapshot<'a>,
}

fn initial_store(config: &AppConfig) -> TaskStore {
    if config.seed_samples {
        TaskStore::with_samples()
    } else {
        TaskStore::new()
    }
}

/// Launch the terminal user interface.
pub fn cmd_ui(config: AppConfig) {
    if let Err(e) = run_tui(config) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Replay intents from `input` (or stdin) to stdout.
pub fn cmd_replay(config: &AppConfig, input: Option<PathBuf>) {
    let stdout = io::stdout();
    let result = match input {
        Some(path) => match File::open(&path) {
            Ok(file) => replay(config, BufReader::new(file), stdout.lock()),
            Err(e) => {
                eprintln!("Failed to open {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => replay(config, io::stdin().lock(), stdout.lock()),
    };
    if let Err(e) = result {
        eprintln!("Replay failed: {e}");
        std::process::exit(1);
    }
}

/// Feed each non-blank line of `reader` to a fresh controller as an `Intent`,
/// writing one JSON record per applied line to `writer`.
pub fn replay<R: BufRead, W: Write>(config: &AppConfig, reader: R, mut writer: W) -> Result<(), AppError> {
    let mut controller = Controller::new(initial_store(config));
    let mut applied = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let intent: Intent = serde_json::from_str(&line)
            .map_err(|source| AppError::Replay { line: line_no, source })?;
        debug!(line = line_no, ?intent, "replaying");

        let (outcome, errors) = match controller.dispatch(intent) {
            Ok(outcome) => (Some(outcome), None),
            Err(errors) => (None, Some(errors)),
        };
        let notices = controller.take_notices();
        let record = ReplayRecord {
            line: line_no,
            outcome,
            errors,
            notices,
            state: controller.snapshot(),
        };
        serde_json::to_writer(&mut writer, &record)?;
        writeln!(writer)?;
        applied += 1;
    }

    writer.flush()?;
    info!(applied, tasks = controller.store().len(), "replay finished");
    Ok(())
}

/// Generate shell completions.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}
