use crate::theme::Theme;
use anyhow::{anyhow, Context};
use clap::{ArgAction, Parser, Subcommand};
use std::fs::{self, OpenOptions};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "schedulr", version, about = "Terminal task scheduler")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured colour theme
    #[arg(long, value_enum, global = true)]
    pub theme: Option<Theme>,

    /// Start with an empty task list
    #[arg(long, global = true)]
    pub no_sample: bool,

    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Interactive dashboard (default)
    Ui,
    /// Print tasks ordered by due date
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print completion statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Ui)
    }
}

fn level_for(verbose: u8, quiet: u8) -> &'static str {
    if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    }
}

/// Installs the global subscriber. With `log_file` set, events go to that
/// file instead of stderr so they don't draw over the terminal UI.
pub fn init_tracing(verbose: u8, quiet: u8, log_file: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level_for(verbose, quiet)))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true);

    let init_result = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create log directory {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .try_init(),
    };

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_ui() {
        let cli = Cli::parse_from(["schedulr"]);
        assert_eq!(cli.command(), Command::Ui);
        assert!(!cli.no_sample);
        assert_eq!(cli.theme, None);
    }

    #[test]
    fn parses_flags_after_subcommand() {
        let cli = Cli::parse_from(["schedulr", "stats", "--json", "--theme", "light", "-vv"]);
        assert_eq!(cli.command(), Command::Stats { json: true });
        assert_eq!(cli.theme, Some(Theme::Light));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0, 0), "warn");
        assert_eq!(level_for(2, 0), "debug");
        assert_eq!(level_for(3, 0), "trace");
        assert_eq!(level_for(3, 2), "error");
    }
}
