//! todo-tui binary entry point

use std::io;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use todo_core::TodoClient;
use todo_tui::{
    cli::{self, Cli},
    runtime, App, Config, UreqTransport,
};

const DEFAULT_LOG_FILTER: &str = "todo_tui=info,todo_core=info";

fn main() -> Result<()> {
    let cli = Cli::parse();
    runtime::block_on(run(cli), runtime::SHUTDOWN_GRACE)?
}

async fn run(cli: Cli) -> Result<()> {

    let mut config = Config::from_env()?;
    if let Some(url) = cli.url.clone() {
        config.api_url = url;
    }
    config.validate()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // CLI mode - log to stderr, print output and exit
    if cli.cli {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();

        let Some(command) = cli.command else {
            eprintln!("Error: CLI mode requires a command");
            std::process::exit(1);
        };
        let client = TodoClient::new(&config.api_url);
        let retries = config.initial_fetch_retries;
        let retry_delay = config.retry_delay();
        let output = tokio::task::spawn_blocking(move || {
            cli::run_command(command, client, UreqTransport::new(), retries, retry_delay)
        })
        .await
        .context("CLI worker panicked")??;
        print!("{output}");
        return Ok(());
    }

    // Log to a file in TUI mode so output does not corrupt the screen
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Cannot open log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    info!(api_url = %config.api_url, "starting todo TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, Arc::new(UreqTransport::new()));
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => {
            info!("todo TUI exited successfully");
            Ok(())
        }
        Err(e) => {
            error!("todo TUI encountered an error: {e}");
            Err(e)
        }
    }
}
