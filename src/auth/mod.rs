//! Bearer-token authentication.
//!
//! Tokens are issued by the external identity provider; this module only
//! verifies them (`token`), enforces them on protected scopes (`middleware`) and
//! hands the caller's id to handlers (`extractors`).

pub mod extractors;
pub mod middleware;
pub mod token;

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use token::{Claims, TokenVerifier, UserId};
