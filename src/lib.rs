pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod sample;
pub mod statistics;
pub mod task;
pub mod task_store;
pub mod theme;
pub mod ui;

use anyhow::Context;
use app::App;
use cli::{Cli, Command};
use config::Config;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use task_store::TaskStore;
use tracing::{info, warn};

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command();

    let (mut cfg, source) = Config::load(cli.config.as_deref())?;
    if let Some(theme) = cli.theme {
        cfg.theme = theme;
    }
    if cli.no_sample {
        cfg.sample_data = false;
    }

    let log_file = matches!(command, Command::Ui).then(|| cfg.log_file());
    cli::init_tracing(cli.verbose, cli.quiet, log_file.as_deref())?;
    source.report(&cfg);
    info!(?command, theme = cfg.theme.name(), "starting schedulr");

    let store = if cfg.sample_data {
        TaskStore::with_sample_data()
    } else {
        TaskStore::new()
    };

    match command {
        Command::Ui => run_ui(App::new(store, &cfg))?,
        Command::List { json } => print_list(&mut io::stdout().lock(), &store, json)?,
        Command::Stats { json } => print_stats(&mut io::stdout().lock(), &store, json)?,
    }

    info!("done");
    Ok(())
}

/// Runs `restore` when dropped, so an early `?` during setup or a failing
/// event loop still hands the terminal back in cooked mode.
struct TerminalGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
}

fn run_ui(mut app: App) -> anyhow::Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let _guard = TerminalGuard {
        restore: || {
            if let Err(err) = restore_terminal() {
                warn!(error = %err, "failed to restore terminal");
            }
        },
    };

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = ui::run_app(&mut terminal, &mut app);
    terminal.show_cursor()?;

    result.context("terminal UI failed")
}

pub fn print_list<W: Write>(out: &mut W, store: &TaskStore, json: bool) -> anyhow::Result<()> {
    let tasks = store.list_tasks();
    if json {
        serde_json::to_writer_pretty(&mut *out, &tasks)?;
        writeln!(out)?;
        return Ok(());
    }
    if tasks.is_empty() {
        writeln!(out, "No tasks yet!")?;
    }
    for t in &tasks {
        writeln!(
            out,
            "[#{}] {:<10} {}  {}",
            t.id,
            t.status,
            t.due_date,
            t.title
        )?;
    }
    Ok(())
}

pub fn print_stats<W: Write>(out: &mut W, store: &TaskStore, json: bool) -> anyhow::Result<()> {
    let stats = store.statistics();
    if json {
        serde_json::to_writer_pretty(&mut *out, &stats)?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(out, "Total tasks:        {}", stats.total)?;
    writeln!(out, "Completed:          {}", stats.completed)?;
    writeln!(out, "Pending:            {}", stats.pending)?;
    writeln!(out, "Completion rate:    {}%", stats.completion_rate)?;
    writeln!(out, "Productivity score: {}", stats.productivity_score)?;
    writeln!(out, "Current streak:     {} days", stats.current_streak)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::Cell;

    #[test]
    fn terminal_guard_restores_on_early_return() {
        let restored = Cell::new(0);
        let setup = || -> anyhow::Result<()> {
            let _guard = TerminalGuard {
                restore: || restored.set(restored.get() + 1),
            };
            Err(anyhow!("backend unavailable"))
        };

        assert!(setup().is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn terminal_guard_restores_once_on_success() {
        let restored = Cell::new(0);
        {
            let _guard = TerminalGuard {
                restore: || restored.set(restored.get() + 1),
            };
        }
        assert_eq!(restored.get(), 1);
    }
}
