//! Interactive controls: the creation form, per-row update surfaces and
//! delete buttons.
//!
//! # Design
//! Controls never perform I/O. Each user action that should reach the server
//! yields a `Mutation`; the caller turns it into a request, executes it and
//! refreshes the list regardless of how the request ended.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::client::{MutationStatus, TodoClient};
use crate::error::{ApiError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::TodoItem;

/// A change requested from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create { text: String },
    Update { id: String, text: String },
    Delete { id: String },
}

impl Mutation {
    pub fn to_request(&self, client: &TodoClient) -> Result<HttpRequest, ApiError> {
        match self {
            Mutation::Create { text } => client.build_create(text),
            Mutation::Update { id, text } => client.build_update(id, text),
            Mutation::Delete { id } => client.build_delete(id),
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Mutation::Create { .. } => "create",
            Mutation::Update { .. } => "update",
            Mutation::Delete { .. } => "delete",
        }
    }
}

/// How a mutation ended. Every variant is followed by a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    Rejected { status: u16 },
    Unreachable(String),
    Unsent(String),
}

impl MutationOutcome {
    pub fn from_response(
        client: &TodoClient,
        result: &Result<HttpResponse, TransportError>,
    ) -> Self {
        match result {
            Ok(response) => match client.parse_mutation(response) {
                MutationStatus::Applied => MutationOutcome::Applied,
                MutationStatus::Rejected { status } => MutationOutcome::Rejected { status },
            },
            Err(e) => MutationOutcome::Unreachable(e.to_string()),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

impl fmt::Display for MutationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationOutcome::Applied => write!(f, "ok"),
            MutationOutcome::Rejected { status } => write!(f, "server answered HTTP {status}"),
            MutationOutcome::Unreachable(reason) => write!(f, "network failure: {reason}"),
            MutationOutcome::Unsent(reason) => write!(f, "not sent: {reason}"),
        }
    }
}

/// Free-text input that submits a create request.
///
/// The input is not validated: empty and whitespace-only text is submitted
/// as-is. It is kept after submission unless `clear_on_submit` is set.
#[derive(Debug, Clone, Default)]
pub struct CreationForm {
    input: String,
    clear_on_submit: bool,
}

impl CreationForm {
    pub fn new(clear_on_submit: bool) -> Self {
        Self {
            input: String::new(),
            clear_on_submit,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    pub fn submit(&mut self) -> Mutation {
        let text = if self.clear_on_submit {
            std::mem::take(&mut self.input)
        } else {
            self.input.clone()
        };
        Mutation::Create { text }
    }
}

/// Identifies one row's update surface.
///
/// Keys live in their own namespace and embed the full item id, so two
/// distinct ids can never share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceKey(String);

impl SurfaceKey {
    const NAMESPACE: &'static str = "update-surface:";

    pub fn for_item(id: &str) -> Self {
        Self(format!("{}{id}", Self::NAMESPACE))
    }

    pub fn item_id(&self) -> &str {
        &self.0[Self::NAMESPACE.len()..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What `cancel` does on an update surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelBehavior {
    /// Drop the local edits; nothing is sent.
    #[default]
    Discard,
    /// Send the edits exactly like confirm.
    Persist,
}

impl FromStr for CancelBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" => Ok(CancelBehavior::Discard),
            "persist" => Ok(CancelBehavior::Persist),
            other => Err(format!(
                "unknown cancel behavior `{other}` (expected `discard` or `persist`)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Closed,
    Open,
}

/// Modal editor for one item's text.
#[derive(Debug, Clone)]
pub struct UpdateControl {
    id: String,
    draft: String,
    state: SurfaceState,
}

impl UpdateControl {
    pub fn new(item: &TodoItem) -> Self {
        Self {
            id: item.id.clone(),
            draft: item.text.clone(),
            state: SurfaceState::Closed,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SurfaceState::Open
    }

    /// Open with the draft reset to `current_text`, or close if open.
    pub fn toggle(&mut self, current_text: &str) {
        match self.state {
            SurfaceState::Closed => {
                self.draft = current_text.to_string();
                self.state = SurfaceState::Open;
            }
            SurfaceState::Open => self.state = SurfaceState::Closed,
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn push(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn pop(&mut self) {
        self.draft.pop();
    }

    /// Close and return the update to send. `None` when not open.
    pub fn confirm(&mut self) -> Option<Mutation> {
        if !self.is_open() {
            return None;
        }
        self.state = SurfaceState::Closed;
        Some(Mutation::Update {
            id: self.id.clone(),
            text: self.draft.clone(),
        })
    }

    pub fn cancel(&mut self, behavior: CancelBehavior) -> Option<Mutation> {
        match behavior {
            CancelBehavior::Persist => self.confirm(),
            CancelBehavior::Discard => {
                self.close();
                None
            }
        }
    }

    /// Close without sending, whatever the cancel behavior is.
    pub fn close(&mut self) {
        self.state = SurfaceState::Closed;
    }
}

/// Every row's update control, keyed by `SurfaceKey`.
#[derive(Debug, Clone, Default)]
pub struct UpdateSurfaces {
    controls: HashMap<SurfaceKey, UpdateControl>,
}

impl UpdateSurfaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the surface for `item`, creating its control on first use.
    pub fn toggle(&mut self, item: &TodoItem) -> &UpdateControl {
        let control = self
            .controls
            .entry(SurfaceKey::for_item(&item.id))
            .or_insert_with(|| UpdateControl::new(item));
        control.toggle(&item.text);
        control
    }

    pub fn get(&self, key: &SurfaceKey) -> Option<&UpdateControl> {
        self.controls.get(key)
    }

    pub fn get_mut(&mut self, key: &SurfaceKey) -> Option<&mut UpdateControl> {
        self.controls.get_mut(key)
    }

    pub fn is_open(&self, key: &SurfaceKey) -> bool {
        self.get(key).is_some_and(UpdateControl::is_open)
    }

    /// Drop controls whose item is no longer in `items`.
    pub fn retain_items(&mut self, items: &[TodoItem]) {
        self.controls
            .retain(|key, _| items.iter().any(|item| item.id == key.item_id()));
    }
}

/// Delete button for one row. Fires immediately, no confirmation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteControl {
    id: String,
}

impl DeleteControl {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn confirm(&self) -> Mutation {
        Mutation::Delete {
            id: self.id.clone(),
        }
    }
}
