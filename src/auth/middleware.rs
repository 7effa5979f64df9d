use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::TokenVerifier;
use crate::error::AppError;

/// Rejects requests without a valid bearer token.
///
/// On success the caller's `UserId` is inserted into the request extensions,
/// where `AuthenticatedUser` picks it up. Rejections are answered here with the
/// `AppError` response, so the wrapped service never runs. The `TokenVerifier`
/// is read from application data.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(user_id) => {
                req.extensions_mut().insert(user_id);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(app_err) => {
                log::debug!("rejected {} {}: {}", req.method(), req.path(), app_err);
                let response = req
                    .into_response(app_err.error_response())
                    .map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<crate::auth::UserId, AppError> {
    let verifier = req.app_data::<web::Data<TokenVerifier>>().ok_or_else(|| {
        AppError::InternalServerError("Token verifier is not configured".into())
    })?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".into()))?;

    verifier.verify(token)
}

/// Extracts the credentials from an `Authorization` header value.
/// The scheme is matched case-insensitively.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, credentials) = value.trim().split_once(' ')?;
    let credentials = credentials.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !credentials.is_empty() {
        Some(credentials)
    } else {
        None
    }
}
