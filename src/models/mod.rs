pub mod todo;

pub use todo::{CreateTodo, MessageResponse, Priority, Todo, TodoPatch};
