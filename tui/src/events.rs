//! Messages flowing between worker tasks and the event loop

use todo_core::{HttpResponse, Mutation, TransportError};

/// Completion reports from network workers.
#[derive(Debug)]
pub enum AppEvent {
    /// A list request finished (after any retries).
    FetchFinished(Result<HttpResponse, TransportError>),
    /// A create, update or delete request finished.
    MutationFinished {
        mutation: Mutation,
        result: Result<HttpResponse, TransportError>,
    },
}

/// Work the event loop should start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetch the full list; `retries` extra attempts on failure.
    Fetch { retries: u32 },
    /// Send a mutation, then fetch.
    Mutate(Mutation),
    Quit,
}
