//! I/O-free client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and consumes `HttpResponse` values without
//! touching the network (host-does-IO pattern). Whoever implements
//! `Transport` executes the round-trip.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - `ListContainer` owns the only copy of the items and replaces it
//!   wholesale from each successful list fetch.
//! - Controls (`CreationForm`, `UpdateControl`, `DeleteControl`) yield
//!   `Mutation`s instead of doing I/O. Every mutation is followed by a full
//!   refresh, never by a local patch.

pub mod client;
pub mod controls;
pub mod error;
pub mod http;
pub mod list;
pub mod session;
pub mod transport;
pub mod types;

pub use client::{MutationStatus, TodoClient};
pub use controls::{
    CancelBehavior, CreationForm, DeleteControl, Mutation, MutationOutcome, SurfaceKey,
    SurfaceState, UpdateControl, UpdateSurfaces,
};
pub use error::{ApiError, ClientError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{ItemRow, ListContainer};
pub use session::Session;
pub use transport::{fetch_with_retry, Transport};
pub use types::{DeletePayload, ItemPayload, TodoItem, TodoListResponse};
