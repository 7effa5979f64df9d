use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::UserId;
use crate::error::AppError;

/// The authenticated caller's id, read from request extensions.
///
/// `AuthMiddleware` puts it there after verifying the bearer token. On a route
/// the middleware does not cover, extraction fails with `AppError::Unauthorized`.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub UserId);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<UserId>().copied() {
            Some(user_id) => ready(Ok(AuthenticatedUser(user_id))),
            None => {
                let err = AppError::Unauthorized("Not authenticated".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
