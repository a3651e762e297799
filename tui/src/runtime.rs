//! Runtime bootstrap for the binary.
//!
//! `#[tokio::main]` waits for every `spawn_blocking` task before the process
//! can exit, so quitting while a request hangs would hang too. The runtime is
//! built by hand and shut down with a bounded grace period instead.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

/// How long in-flight requests get to finish after the app returns.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

/// Run `future` to completion, then abandon any blocking work still running
/// after `grace`.
pub fn block_on<F: Future>(future: F, grace: Duration) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    let output = runtime.block_on(future);
    debug!(?grace, "shutting down runtime");
    runtime.shutdown_timeout(grace);
    Ok(output)
}
