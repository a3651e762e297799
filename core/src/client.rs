//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//!
//! Mutation responses are never treated as failures: whatever comes back,
//! the caller refreshes the list. `parse_mutation` only classifies the
//! status so it can be shown to the user.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{DeletePayload, ItemPayload, TodoItem, TodoListResponse};

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// How the server answered a create, update or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    Applied,
    Rejected { status: u16 },
}

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todo", self.base_url),
            headers: json_headers(),
            body: None,
        }
    }

    pub fn build_create(&self, text: &str) -> Result<HttpRequest, ApiError> {
        let payload = ItemPayload {
            item: text.to_string(),
        };
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/todo", self.base_url),
            headers: json_headers(),
            body: Some(to_json(&payload)?),
        })
    }

    pub fn build_update(&self, id: &str, text: &str) -> Result<HttpRequest, ApiError> {
        let payload = ItemPayload {
            item: text.to_string(),
        };
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_path(id),
            headers: json_headers(),
            body: Some(to_json(&payload)?),
        })
    }

    pub fn build_delete(&self, id: &str) -> Result<HttpRequest, ApiError> {
        let payload = DeletePayload { id: id.to_string() };
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_path(id),
            headers: json_headers(),
            body: Some(to_json(&payload)?),
        })
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        check_success(&response)?;
        let envelope: TodoListResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(envelope.data)
    }

    pub fn parse_mutation(&self, response: &HttpResponse) -> MutationStatus {
        if response.is_success() {
            MutationStatus::Applied
        } else {
            MutationStatus::Rejected {
                status: response.status,
            }
        }
    }

    fn item_path(&self, id: &str) -> String {
        format!(
            "{}/todo/{}",
            self.base_url,
            utf8_percent_encode(id, PATH_SEGMENT)
        )
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json<T: Serialize>(payload: &T) -> Result<String, ApiError> {
    serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
