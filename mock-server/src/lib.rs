//! In-memory implementation of the `/todo` API.
//!
//! Items keep insertion order. Ids are server-assigned UUID strings.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub item: String,
}

#[derive(Deserialize)]
pub struct ItemBody {
    pub item: String,
}

#[derive(Serialize, Deserialize)]
pub struct ListBody {
    pub data: Vec<Todo>,
}

pub type Db = Arc<RwLock<Vec<Todo>>>;

pub fn app() -> Router {
    app_with(Db::default())
}

/// Router over a caller-provided store, so tests can seed or inspect it.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/todo", get(list_todos).post(create_todo))
        .route("/todo/{id}", put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Db::default()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

async fn list_todos(State(db): State<Db>) -> Json<ListBody> {
    let todos = db.read().await;
    Json(ListBody {
        data: todos.clone(),
    })
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<ItemBody>,
) -> (StatusCode, Json<Todo>) {
    let todo = Todo {
        id: Uuid::new_v4().to_string(),
        item: input.item,
    };
    debug!(id = %todo.id, "created todo");
    db.write().await.push(todo.clone());
    (StatusCode::CREATED, Json(todo))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<ItemBody>,
) -> Result<Json<Todo>, StatusCode> {
    let mut todos = db.write().await;
    let todo = todos
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    todo.item = input.item;
    debug!(%id, "updated todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut todos = db.write().await;
    let index = todos
        .iter()
        .position(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    todos.remove(index);
    debug!(%id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_with_item_field() {
        let todo = Todo {
            id: "1".to_string(),
            item: "Test".to_string(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "1", "item": "Test" }));
    }

    #[test]
    fn list_body_wraps_items_in_data() {
        let body = ListBody { data: Vec::new() };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"data":[]}"#);
    }

    #[test]
    fn item_body_allows_empty_text() {
        let input: ItemBody = serde_json::from_str(r#"{"item":""}"#).unwrap();
        assert!(input.item.is_empty());
    }

    #[test]
    fn item_body_rejects_missing_item() {
        let result: Result<ItemBody, _> = serde_json::from_str(r#"{"text":"x"}"#);
        assert!(result.is_err());
    }
}
