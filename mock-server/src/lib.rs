use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
}

/// Items in insertion order, which is also display order.
pub type Db = Arc<RwLock<Vec<TodoItem>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-seeded with `items`.
pub fn app_with(items: Vec<TodoItem>) -> Router {
    let db: Db = Arc::new(RwLock::new(items));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<TodoItem>> {
    Json(db.read().await.clone())
}

async fn create_todo(
    State(db): State<Db>,
    input: Result<Json<TodoItem>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoItem>), StatusCode> {
    let Json(item) = input.map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;
    if item.id.is_empty() || item.text.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let mut todos = db.write().await;
    if todos.iter().any(|t| t.id == item.id) {
        return Err(StatusCode::CONFLICT);
    }
    debug!(id = %item.id, "created todo");
    todos.push(item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut todos = db.write().await;
    let before = todos.len();
    todos.retain(|t| t.id != id);
    if todos.len() == before {
        return StatusCode::NOT_FOUND;
    }
    debug!(%id, "deleted todo");
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_to_json() {
        let todo = TodoItem {
            id: "1700000000000".to_string(),
            text: "Test".to_string(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "1700000000000");
        assert_eq!(json["text"], "Test");
    }

    #[test]
    fn todo_rejects_missing_id() {
        let result: Result<TodoItem, _> = serde_json::from_str(r#"{"text":"no id"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn todo_rejects_missing_text() {
        let result: Result<TodoItem, _> = serde_json::from_str(r#"{"id":"1"}"#);
        assert!(result.is_err());
    }
}
