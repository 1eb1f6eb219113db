// SPDX-License-Identifier: MIT
// rest/routes/tasks.rs — Task CRUD routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

use crate::tasks::{Task, TaskDraft, TaskError, TaskPatch};
use crate::AppContext;

type RestError = (StatusCode, Json<Value>);

/// Map the service error taxonomy onto HTTP status codes. This is the only
/// place wire codes are decided.
fn error_response(err: TaskError) -> RestError {
    let status = match &err {
        TaskError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        TaskError::NotFound(_) => StatusCode::NOT_FOUND,
        TaskError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(err = %err, "task storage failure");
    }
    (status, Json(json!({ "error": err.to_string() })))
}

/// A missing, null, or malformed JSON body is a caller error (400), not
/// axum's default 422.
fn bad_body(rejection: JsonRejection) -> RestError {
    error_response(TaskError::InvalidArgument(rejection.body_text()))
}

pub async fn list_tasks(State(ctx): State<Arc<AppContext>>) -> Result<Json<Vec<Task>>, RestError> {
    ctx.tasks
        .get_all_tasks()
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn get_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, RestError> {
    ctx.tasks
        .get_task_by_id(id)
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<TaskDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), RestError> {
    let Json(draft) = payload.map_err(bad_body)?;
    let task = ctx.tasks.create_task(draft).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<i64>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<Task>, RestError> {
    let Json(patch) = payload.map_err(bad_body)?;
    ctx.tasks
        .update_task(id, patch)
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, RestError> {
    ctx.tasks
        .delete_task(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}
