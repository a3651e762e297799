//! The seam between the I/O-free core and whatever executes requests.

use std::time::Duration;

use tracing::warn;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
///
/// Implementations must return non-2xx responses as `Ok`; only failures
/// where no response arrived are `Err`.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Execute a list request, retrying transport failures and non-2xx answers
/// up to `retries` extra times with `delay` between attempts.
///
/// A 2xx response is returned as-is even if its body later fails to parse.
pub fn fetch_with_retry<T: Transport + ?Sized>(
    transport: &T,
    request: HttpRequest,
    retries: u32,
    delay: Duration,
) -> Result<HttpResponse, TransportError> {
    let mut attempt = 0;
    loop {
        let result = transport.execute(request.clone());
        let failed = match &result {
            Ok(response) => !response.is_success(),
            Err(_) => true,
        };
        if !failed || attempt >= retries {
            return result;
        }
        attempt += 1;
        warn!(attempt, "list fetch failed, retrying");
        std::thread::sleep(delay);
    }
}
