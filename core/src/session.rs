//! Synchronous driver that wires the list container to a transport.
//!
//! Every mutation is followed by exactly one full list fetch, whatever the
//! mutation's outcome. Used by the command-line mode and by tests; the
//! interactive front end runs the same steps on worker tasks.

use std::time::Duration;

use tracing::{info, warn};

use crate::client::TodoClient;
use crate::controls::{Mutation, MutationOutcome};
use crate::error::ClientError;
use crate::list::ListContainer;
use crate::transport::{fetch_with_retry, Transport};
use crate::types::TodoItem;

pub struct Session<T> {
    transport: T,
    list: ListContainer,
}

impl<T: Transport> Session<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            transport,
            list: ListContainer::new(client),
        }
    }

    pub fn list(&self) -> &ListContainer {
        &self.list
    }

    pub fn items(&self) -> &[TodoItem] {
        self.list.items()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Initial load, retried up to `retries` extra times `delay` apart.
    pub fn start(&mut self, retries: u32, delay: Duration) -> Result<usize, ClientError> {
        let result = fetch_with_retry(&self.transport, self.list.fetch_request(), retries, delay);
        self.list.apply_fetch(result)
    }

    pub fn refresh(&mut self) -> Result<usize, ClientError> {
        self.list.fetch_all(&self.transport)
    }

    /// Send `mutation`, then refresh. The refresh happens even when the
    /// mutation could not be sent or was rejected.
    pub fn perform(&mut self, mutation: &Mutation) -> MutationOutcome {
        let outcome = match mutation.to_request(self.list.client()) {
            Ok(request) => {
                let result = self.transport.execute(request);
                MutationOutcome::from_response(self.list.client(), &result)
            }
            Err(e) => MutationOutcome::Unsent(e.to_string()),
        };
        info!(verb = mutation.verb(), %outcome, "mutation finished");
        if let Err(e) = self.refresh() {
            warn!("refresh after {} failed: {e}", mutation.verb());
        }
        outcome
    }
}
