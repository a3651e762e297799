//! The list container: the one canonical copy of the todo items.
//!
//! # Invariants
//! - `items` is always exactly the payload of the last fetch that succeeded.
//! - A failed fetch (transport error, non-2xx, bad body) leaves `items`
//!   untouched.
//! - Items are only ever replaced wholesale, never patched in place.

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::controls::{DeleteControl, SurfaceKey};
use crate::error::{ClientError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::TodoItem;

#[derive(Debug, Clone)]
pub struct ListContainer {
    client: TodoClient,
    items: Vec<TodoItem>,
    fetches_applied: u64,
}

impl ListContainer {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            items: Vec::new(),
            fetches_applied: 0,
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Number of fetch responses that replaced the list so far.
    pub fn fetches_applied(&self) -> u64 {
        self.fetches_applied
    }

    pub fn fetch_request(&self) -> HttpRequest {
        self.client.build_list()
    }

    /// Apply the outcome of a list request. Returns the new item count.
    pub fn apply_fetch(
        &mut self,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<usize, ClientError> {
        let response = result.inspect_err(|e| warn!("list fetch failed: {e}"))?;
        let items = self
            .client
            .parse_list(response)
            .inspect_err(|e| warn!("list fetch rejected: {e}"))?;
        debug!(count = items.len(), "replacing todo list");
        self.items = items;
        self.fetches_applied += 1;
        Ok(self.items.len())
    }

    pub fn fetch_all<T: Transport>(&mut self, transport: &T) -> Result<usize, ClientError> {
        let result = transport.execute(self.fetch_request());
        self.apply_fetch(result)
    }

    /// One row per item, in response order.
    pub fn rows(&self) -> Vec<ItemRow<'_>> {
        self.items.iter().map(ItemRow::new).collect()
    }
}

/// One rendered item with its update and delete controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow<'a> {
    pub id: &'a str,
    pub text: &'a str,
    pub update_key: SurfaceKey,
}

impl<'a> ItemRow<'a> {
    pub fn new(item: &'a TodoItem) -> Self {
        Self {
            id: &item.id,
            text: &item.text,
            update_key: SurfaceKey::for_item(&item.id),
        }
    }

    pub fn delete_control(&self) -> DeleteControl {
        DeleteControl::new(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn container() -> ListContainer {
        ListContainer::new(TodoClient::new("http://localhost:8000"))
    }

    fn ok(body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    #[test]
    fn empty_payload_renders_no_rows() {
        let mut list = container();
        list.apply_fetch(ok(r#"{"data":[]}"#)).unwrap();
        assert!(list.rows().is_empty());
    }

    #[test]
    fn single_item_renders_one_row() {
        let mut list = container();
        list.apply_fetch(ok(r#"{"data":[{"id":"1","text":"a"}]}"#))
            .unwrap();
        let rows = list.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "a");
        assert_eq!(rows[0].id, "1");
        assert_eq!(rows[0].update_key, SurfaceKey::for_item("1"));
    }

    #[test]
    fn fetch_replaces_list_wholesale() {
        let mut list = container();
        list.apply_fetch(ok(r#"{"data":[{"id":"1","text":"a"},{"id":"2","text":"b"}]}"#))
            .unwrap();
        list.apply_fetch(ok(r#"{"data":[{"id":"3","text":"c"}]}"#))
            .unwrap();
        assert_eq!(list.items(), &[TodoItem::new("3", "c")]);
        assert_eq!(list.fetches_applied(), 2);
    }

    #[test]
    fn failed_fetch_keeps_previous_list() {
        let mut list = container();
        list.apply_fetch(ok(r#"{"data":[{"id":"1","text":"a"}]}"#))
            .unwrap();

        let err = list
            .apply_fetch(Err(TransportError::Io("reset".to_string())))
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));

        let err = list
            .apply_fetch(Ok(HttpResponse {
                status: 503,
                headers: Vec::new(),
                body: String::new(),
            }))
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api(ApiError::HttpError { status: 503, .. })
        ));

        list.apply_fetch(ok("garbage")).unwrap_err();

        assert_eq!(list.items(), &[TodoItem::new("1", "a")]);
        assert_eq!(list.fetches_applied(), 1);
    }

    #[test]
    fn row_delete_control_is_scoped_to_row() {
        let item = TodoItem::new("42", "x");
        let row = ItemRow::new(&item);
        assert_eq!(row.delete_control().id(), "42");
    }
}
