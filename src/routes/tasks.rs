use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{CreateTaskRequest, NewTask, StatusChange, StatusUpdateRequest},
    service::TaskService,
};
use actix_web::{get, post, put, web, HttpResponse, Responder};

/// Creates a new task for the authenticated user.
///
/// ## Request Body:
/// - `title`: required, non-empty.
/// - `description` (optional).
///
/// ## Responses:
/// - `201 Created`: The created task, status `pending`.
/// - `400 Bad Request`: Missing title.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `500 Internal Server Error`: Store failure.
#[post("")]
pub async fn create_task(
    service: web::Data<TaskService>,
    user: AuthenticatedUser,
    task_data: web::Json<CreateTaskRequest>,
) -> Result<impl Responder, AppError> {
    let new_task = NewTask::try_from(task_data.into_inner())?;
    let task = service.create_task(&user.0, new_task).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Lists every task owned by `user_id`, newest first.
///
/// `user_id` must be the authenticated user's own id. A value that is not a
/// number can never match and is treated the same way.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `403 Forbidden`: `user_id` is not the caller.
/// - `500 Internal Server Error`: Store failure.
#[get("/{user_id}")]
pub async fn list_tasks(
    service: web::Data<TaskService>,
    user: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let requested_user_id = user_id
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::Forbidden)?;
    let tasks = service.list_tasks(&user.0, requested_user_id).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Advances a task's status.
///
/// Without a `status` in the body (or without a body at all) the task moves one
/// step along `pending -> in_progress -> done`. With a `status`, the task is set
/// to exactly that value.
///
/// ## Responses:
/// - `200 OK`: The updated task.
/// - `400 Bad Request`: Unknown status, or implicit advance of a `done` task. Both are
///   only reported for an existing task owned by the caller.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `403 Forbidden`: The task belongs to someone else.
/// - `404 Not Found`: No such task.
/// - `500 Internal Server Error`: Store failure.
#[put("/{id}/status")]
pub async fn advance_status(
    service: web::Data<TaskService>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
    body: web::Bytes,
) -> Result<impl Responder, AppError> {
    let task_id = task_id
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::TaskNotFound)?;
    let change = parse_status_change(&body)?;
    let task = service.advance_status(&user.0, task_id, &change).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Interprets an optional JSON body as a status change.
fn parse_status_change(body: &[u8]) -> Result<StatusChange, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StatusChange::Advance);
    }
    let request: StatusUpdateRequest = serde_json::from_slice(body)
        .map_err(|e| AppError::ValidationError(format!("Invalid JSON body: {}", e)))?;
    Ok(StatusChange::from(request))
}
