use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the priority of a todo.
/// Corresponds to the `todo_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "todo_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A todo as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Todo {
    /// Unique identifier (UUID v4, assigned by the database).
    pub id: Uuid,
    /// The owner; taken from the `sub` claim of the creating request.
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub pinned: bool,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `None` while active, set while the todo sits in the trash.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/todos`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTodo {
    /// Must be between 1 and 500 characters.
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    /// Maximum length of 2000 characters if provided.
    #[validate(length(max = 2000))]
    pub description: Option<String>,

    /// Defaults to `medium` when omitted.
    pub priority: Option<Priority>,

    pub due_date: Option<DateTime<Utc>>,
}

impl CreateTodo {
    pub fn priority_or_default(&self) -> Priority {
        self.priority.unwrap_or_default()
    }
}

/// Body of `PATCH /api/todos/{id}`.
///
/// Nullable columns use `Option<Option<T>>`: the outer `None` means the field was
/// omitted, `Some(None)` means it was sent as `null` and must be cleared.
/// Non-nullable columns treat an explicit `null` the same as an omitted field.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 2000))]
    pub description: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TodoPatch {
    /// True when the request carried no field to write.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.pinned.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

/// Marks a field as present whenever its key appears, even with a `null` value.
/// Combined with `#[serde(default)]`, a missing key stays `None`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Generic `{ "message": ... }` body returned by the delete endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
