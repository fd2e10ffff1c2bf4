//! Reference task server.
//!
//! Serves the same four endpoints the client consumes, over an in-memory
//! [`TaskStore`]. Used by `td serve` and by the integration tests.

pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::model::{NewTask, Task, TaskId, TaskUpdate};
pub use store::TaskStore;

#[derive(Clone)]
struct AppState {
    store: Arc<Mutex<TaskStore>>,
}

/// Handler failure, rendered as a plain-text body
#[derive(Debug)]
enum Rejection {
    InvalidId,
    NotFound(TaskId),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Rejection::InvalidId => (StatusCode::BAD_REQUEST, "Invalid task ID").into_response(),
            Rejection::NotFound(id) => {
                debug!(task_id = id.0, "task not found");
                (StatusCode::NOT_FOUND, "Task not found").into_response()
            }
        }
    }
}

fn parse_id(raw: &str) -> Result<TaskId, Rejection> {
    raw.parse().map_err(|_| Rejection::InvalidId)
}

/// Any origin may call the API, so a browser frontend can share the server
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(86400))
}

/// Build the router over `store`
pub fn router(store: TaskStore) -> Router {
    let state = AppState {
        store: Arc::new(Mutex::new(store)),
    };
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/:id", put(update_task).delete(delete_task))
        .layer(cors())
        .with_state(state)
}

async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    let store = state.store.lock().await;
    Json(store.list().to_vec())
}

async fn create_task(State(state): State<AppState>, Json(new): Json<NewTask>) -> Json<Task> {
    let task = state.store.lock().await.create(new);
    info!(task_id = task.id.0, title = %task.title, "created task");
    Json(task)
}

async fn update_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(update): Json<TaskUpdate>,
) -> Result<Json<Task>, Rejection> {
    let id = parse_id(&raw_id)?;
    debug!(task_id = id.0, ?update, "update request");
    let task = state
        .store
        .lock()
        .await
        .update(id, &update)
        .ok_or(Rejection::NotFound(id))?;
    info!(task_id = id.0, "updated task");
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, Rejection> {
    let id = parse_id(&raw_id)?;
    if !state.store.lock().await.delete(id) {
        return Err(Rejection::NotFound(id));
    }
    info!(task_id = id.0, "deleted task");
    Ok(StatusCode::NO_CONTENT)
}

/// Serve until the process is stopped
pub async fn serve(addr: SocketAddr, store: TaskStore) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("task server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(store)).await
}

/// Serve on an ephemeral loopback port in the background.
/// Returns the base URL to point a client at.
pub async fn spawn_local(store: TaskStore) -> std::io::Result<(String, JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(store);
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), handle))
}
