#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "Token verification, the owner-scoped todo store, request handlers and error"]
#![doc = "handling for the todo backend. The binary (`main.rs`) composes them into a server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::error::AppError;
pub use crate::store::TodoStore;
