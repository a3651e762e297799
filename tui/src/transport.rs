//! ureq-backed `Transport`.

use std::time::Duration;

use todo_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use tracing::debug;

/// Blocking HTTP transport. Non-2xx responses come back as data.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(None)
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = %req.method, path = %req.path, "sending request");
        let url = req.path;
        let content_type = req
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
            .unwrap_or("application/json");

        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => self
                .agent
                .get(&url)
                .header("content-type", content_type)
                .call(),
            (HttpMethod::Post, body) => self
                .agent
                .post(&url)
                .content_type(content_type)
                .send(body.unwrap_or_default().as_bytes()),
            (HttpMethod::Put, body) => self
                .agent
                .put(&url)
                .content_type(content_type)
                .send(body.unwrap_or_default().as_bytes()),
            (HttpMethod::Delete, Some(body)) => self
                .agent
                .delete(&url)
                .force_send_body()
                .content_type(content_type)
                .send(body.as_bytes()),
            (HttpMethod::Delete, None) => self.agent.delete(&url).call(),
        };

        let mut response = result.map_err(|e| match e {
            ureq::Error::Io(io) => TransportError::Io(io.to_string()),
            other => TransportError::Connect {
                url: url.clone(),
                reason: other.to_string(),
            },
        })?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Io(e.to_string()))?;
        debug!(status, "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
