//! Persistence for todos.
//!
//! `TodoStore` is the only writer of the `todos` table. Every statement is scoped
//! by owner as well as by todo id, so a todo that belongs to someone else looks
//! exactly like one that does not exist.

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::UserId;
use crate::error::AppError;
use crate::models::{CreateTodo, Todo, TodoPatch};

macro_rules! todo_columns {
    () => {
        "id, user_id, title, description, completed, pinned, priority, due_date, \
         created_at, updated_at, deleted_at"
    };
}

const LIST_ACTIVE: &str = concat!(
    "SELECT ",
    todo_columns!(),
    " FROM todos WHERE user_id = $1 AND deleted_at IS NULL \
     ORDER BY pinned DESC, created_at DESC"
);

const LIST_TRASH: &str = concat!(
    "SELECT ",
    todo_columns!(),
    " FROM todos WHERE user_id = $1 AND deleted_at IS NOT NULL \
     ORDER BY deleted_at DESC"
);

const GET_ACTIVE: &str = concat!(
    "SELECT ",
    todo_columns!(),
    " FROM todos WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL"
);

const INSERT: &str = concat!(
    "INSERT INTO todos (user_id, title, description, priority, due_date, completed, pinned) \
     VALUES ($1, $2, $3, $4, $5, false, false) RETURNING ",
    todo_columns!()
);

// Non-nullable columns keep their value when the bound parameter is NULL.
// Nullable columns carry a presence flag so an explicit null can clear them.
const UPDATE: &str = concat!(
    "UPDATE todos SET \
     title = COALESCE($3, title), \
     description = CASE WHEN $4 THEN $5 ELSE description END, \
     completed = COALESCE($6, completed), \
     pinned = COALESCE($7, pinned), \
     priority = COALESCE($8, priority), \
     due_date = CASE WHEN $9 THEN $10 ELSE due_date END, \
     updated_at = NOW() \
     WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL RETURNING ",
    todo_columns!()
);

const SOFT_DELETE: &str =
    "UPDATE todos SET deleted_at = NOW() WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL";

const RESTORE: &str = concat!(
    "UPDATE todos SET deleted_at = NULL \
     WHERE id = $1 AND user_id = $2 AND deleted_at IS NOT NULL RETURNING ",
    todo_columns!()
);

const DELETE_PERMANENTLY: &str = "DELETE FROM todos WHERE id = $1 AND user_id = $2";

fn not_found() -> AppError {
    AppError::NotFound("Todo not found".into())
}

/// Owner-scoped CRUD and trash operations over a shared connection pool.
#[derive(Debug, Clone)]
pub struct TodoStore {
    pool: PgPool,
}

impl TodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active todos, pinned first, then newest first.
    pub async fn list_active(&self, user: UserId) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(LIST_ACTIVE)
            .bind(user.as_uuid())
            .fetch_all(&self.pool)
            .await?;
        Ok(todos)
    }

    /// Inserts an active, unpinned, incomplete todo. Priority defaults to medium.
    pub async fn create(&self, user: UserId, input: CreateTodo) -> Result<Todo, AppError> {
        let priority = input.priority_or_default();
        let todo = sqlx::query_as::<_, Todo>(INSERT)
            .bind(user.as_uuid())
            .bind(input.title)
            .bind(input.description)
            .bind(priority)
            .bind(input.due_date)
            .fetch_one(&self.pool)
            .await?;

        log::debug!("user {} created todo {}", user, todo.id);
        Ok(todo)
    }

    pub async fn get(&self, user: UserId, id: Uuid) -> Result<Todo, AppError> {
        sqlx::query_as::<_, Todo>(GET_ACTIVE)
            .bind(id)
            .bind(user.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }

    /// Writes the fields present in `patch` and bumps `updated_at`.
    ///
    /// An empty patch writes nothing and returns the current state.
    pub async fn update(&self, user: UserId, id: Uuid, patch: TodoPatch) -> Result<Todo, AppError> {
        if patch.is_empty() {
            return self.get(user, id).await;
        }

        let TodoPatch {
            title,
            description,
            completed,
            pinned,
            priority,
            due_date,
        } = patch;

        sqlx::query_as::<_, Todo>(UPDATE)
            .bind(id)
            .bind(user.as_uuid())
            .bind(title)
            .bind(description.is_some())
            .bind(description.flatten())
            .bind(completed)
            .bind(pinned)
            .bind(priority)
            .bind(due_date.is_some())
            .bind(due_date.flatten())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }

    /// Moves an active todo to the trash. `updated_at` is left alone.
    pub async fn soft_delete(&self, user: UserId, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(SOFT_DELETE)
            .bind(id)
            .bind(user.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }

    /// Trashed todos, most recently deleted first.
    pub async fn list_trash(&self, user: UserId) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(LIST_TRASH)
            .bind(user.as_uuid())
            .fetch_all(&self.pool)
            .await?;
        Ok(todos)
    }

    /// Takes a todo out of the trash. Active todos are not found here.
    pub async fn restore(&self, user: UserId, id: Uuid) -> Result<Todo, AppError> {
        sqlx::query_as::<_, Todo>(RESTORE)
            .bind(id)
            .bind(user.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Todo not found in trash".into()))
    }

    /// Removes the row, whether it is active or in the trash.
    pub async fn delete_permanently(&self, user: UserId, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(DELETE_PERMANENTLY)
            .bind(id)
            .bind(user.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        log::debug!("user {} permanently deleted todo {}", user, id);
        Ok(())
    }
}
