//! Wire DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! the integration tests catch any drift between the two crates. The list
//! endpoint names the text field `item`, so `TodoItem` accepts either name.

use serde::{Deserialize, Serialize};

/// A single todo item as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    #[serde(alias = "item")]
    pub text: String,
}

impl TodoItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Envelope returned by `GET /todo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub data: Vec<TodoItem>,
}

/// Body for create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPayload {
    pub item: String,
}

/// Body sent along with a delete request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePayload {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_item_accepts_text_field() {
        let item: TodoItem = serde_json::from_str(r#"{"id":"1","text":"a"}"#).unwrap();
        assert_eq!(item, TodoItem::new("1", "a"));
    }

    #[test]
    fn todo_item_accepts_item_field() {
        let item: TodoItem = serde_json::from_str(r#"{"id":"7","item":"buy milk"}"#).unwrap();
        assert_eq!(item.text, "buy milk");
    }

    #[test]
    fn todo_item_allows_empty_text() {
        let item: TodoItem = serde_json::from_str(r#"{"id":"1","text":""}"#).unwrap();
        assert!(item.text.is_empty());
    }

    #[test]
    fn list_response_keeps_order() {
        let resp: TodoListResponse = serde_json::from_str(
            r#"{"data":[{"id":"b","item":"second"},{"id":"a","item":"first"}]}"#,
        )
        .unwrap();
        let ids: Vec<_> = resp.data.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn list_response_rejects_missing_data() {
        let result: Result<TodoListResponse, _> = serde_json::from_str(r#"{"items":[]}"#);
        assert!(result.is_err());
    }
}
