//! Terminal client for the todo API.
//!
//! The list, form and update/delete controls live in `todo-core`; this
//! crate adds the ureq transport, the event loop and rendering.

pub mod app;
pub mod cli;
pub mod config;
pub mod events;
pub mod runtime;
pub mod transport;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use transport::UreqTransport;
