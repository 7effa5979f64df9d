use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{CreateTodo, MessageResponse, TodoPatch},
    store::TodoStore,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Lists the caller's active todos.
///
/// Pinned todos come first, then the most recently created.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Todo` objects.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn list_todos(
    store: web::Data<TodoStore>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let todos = store.list_active(user.0).await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// Creates a todo for the caller.
///
/// ## Request Body:
/// - `title`: 1 to 500 characters (required).
/// - `description` (optional): up to 2000 characters.
/// - `priority` (optional): `low`, `medium` or `high`; defaults to `medium`.
/// - `due_date` (optional): RFC 3339 timestamp.
///
/// ## Responses:
/// - `201 Created`: the new `Todo`, with `completed` and `pinned` false.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `422 Unprocessable Entity`: malformed body or field limits exceeded.
#[post("")]
pub async fn create_todo(
    store: web::Data<TodoStore>,
    user: AuthenticatedUser,
    todo_data: web::Json<CreateTodo>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let todo = store.create(user.0, todo_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(todo))
}

/// Lists the caller's trashed todos, most recently deleted first.
///
/// Registered ahead of `/{id}` so `trash` is never taken for an id.
#[get("/trash")]
pub async fn list_trash(
    store: web::Data<TodoStore>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let todos = store.list_trash(user.0).await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// Retrieves one active todo.
///
/// ## Responses:
/// - `200 OK`: the `Todo`.
/// - `404 Not Found`: no such active todo for this caller.
#[get("/{id}")]
pub async fn get_todo(
    store: web::Data<TodoStore>,
    user: AuthenticatedUser,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let todo = store.get(user.0, todo_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Partially updates an active todo.
///
/// Only keys present in the body are written. `description` and `due_date`
/// may be sent as `null` to clear them. An empty body returns the todo as is.
///
/// ## Responses:
/// - `200 OK`: the updated `Todo`.
/// - `404 Not Found`: no such active todo for this caller.
/// - `422 Unprocessable Entity`: malformed body or field limits exceeded.
#[patch("/{id}")]
pub async fn update_todo(
    store: web::Data<TodoStore>,
    user: AuthenticatedUser,
    todo_id: web::Path<Uuid>,
    todo_patch: web::Json<TodoPatch>,
) -> Result<impl Responder, AppError> {
    todo_patch.validate()?;

    let todo = store
        .update(user.0, todo_id.into_inner(), todo_patch.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Moves an active todo to the trash.
#[delete("/{id}")]
pub async fn delete_todo(
    store: web::Data<TodoStore>,
    user: AuthenticatedUser,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    store.soft_delete(user.0, todo_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Todo deleted successfully")))
}

/// Restores a trashed todo.
///
/// ## Responses:
/// - `200 OK`: the restored `Todo`.
/// - `404 Not Found`: the todo is not in this caller's trash.
#[post("/{id}/restore")]
pub async fn restore_todo(
    store: web::Data<TodoStore>,
    user: AuthenticatedUser,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let todo = store.restore(user.0, todo_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Deletes a todo for good, whether active or trashed.
#[delete("/{id}/permanent")]
pub async fn permanent_delete_todo(
    store: web::Data<TodoStore>,
    user: AuthenticatedUser,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    store
        .delete_permanently(user.0, todo_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Todo permanently deleted")))
}
