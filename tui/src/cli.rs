//! Command-line interface definitions and non-interactive commands

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use todo_core::{CreationForm, DeleteControl, Mutation, Session, TodoClient, TodoItem, Transport};
use tracing::warn;

#[derive(Parser)]
#[command(name = "todo-tui")]
#[command(about = "Terminal client for the todo API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Run in CLI mode (print output and exit, no interactive TUI)
    #[arg(long, global = true)]
    pub cli: bool,
    /// Base URL of the todo API (overrides TODO_API_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print every todo item
    List,
    /// Create a todo item
    Add {
        /// Item text, sent as-is
        text: String,
    },
    /// Replace an item's text
    Update {
        id: String,
        text: String,
    },
    /// Delete an item
    Delete {
        id: String,
    },
}

/// Run one command against the API and print the refreshed list.
///
/// A failed initial fetch only fails `list`; mutations are still sent and
/// followed by their own refresh.
pub fn run_command<T: Transport>(
    command: Commands,
    client: TodoClient,
    transport: T,
    retries: u32,
    retry_delay: Duration,
) -> Result<String> {
    let mut session = Session::new(client, transport);
    let started = session.start(retries, retry_delay);

    let mutation = match command {
        Commands::List => None,
        Commands::Add { text } => {
            let mut form = CreationForm::new(false);
            form.set_input(text);
            Some(form.submit())
        }
        Commands::Update { id, text } => Some(Mutation::Update { id, text }),
        Commands::Delete { id } => Some(DeleteControl::new(id).confirm()),
    };

    match (&mutation, started) {
        (None, Err(e)) => {
            return Err(anyhow::Error::from(e).context("Failed to fetch todo list"));
        }
        (Some(mutation), Err(e)) => {
            warn!("initial fetch failed, sending {} anyway: {e}", mutation.verb());
        }
        (_, Ok(_)) => {}
    }

    let mut out = String::new();
    if let Some(mutation) = mutation {
        let outcome = session.perform(&mutation);
        out.push_str(&format!("{}: {outcome}\n", mutation.verb()));
    }
    out.push_str(&format_items(session.items()));
    Ok(out)
}

pub fn format_items(items: &[TodoItem]) -> String {
    if items.is_empty() {
        return "No todo items.\n".to_string();
    }
    let width = items.iter().map(|i| i.id.len()).max().unwrap_or(0).max(2);
    let mut out = format!("{:<width$}  {}\n", "ID", "TEXT");
    for item in items {
        out.push_str(&format!("{:<width$}  {}\n", item.id, item.text));
    }
    out.push_str(&format!("\nTotal: {} item(s)\n", items.len()));
    out
}
