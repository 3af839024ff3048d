//! Runtime configuration and application metadata.

use std::time::Duration;

use crate::cli::Cli;

pub const APP_NAME: &str = "Todo Task Manager";
pub const APP_ID: &str = "todo-tasks";
pub const APP_TAGLINE: &str = "Organize your life, one task at a time";

pub const DEFAULT_SPLASH_MS: u64 = 2000;
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1500;

/// Settings the terminal UI and the replay driver run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub splash_delay: Duration,
    pub login_delay: Duration,
    pub seed_samples: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            splash_delay: Duration::from_millis(DEFAULT_SPLASH_MS),
            login_delay: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
            seed_samples: true,
        }
    }
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        AppConfig {
            splash_delay: Duration::from_millis(cli.splash_ms),
            login_delay: Duration::from_millis(cli.login_delay_ms),
            seed_samples: !cli.empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let cli = Cli::parse_from(["todo"]);
        assert_eq!(AppConfig::from_cli(&cli), AppConfig::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(["todo", "--splash-ms", "0", "--login-delay-ms", "250", "--empty"]);
        let config = AppConfig::from_cli(&cli);
        assert_eq!(config.splash_delay, Duration::ZERO);
        assert_eq!(config.login_delay, Duration::from_millis(250));
        assert!(!config.seed_samples);
    }
}
