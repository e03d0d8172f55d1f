use actix_web::dev::Payload;
use actix_web::error::JsonPayloadError;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};

use crate::application::authorization::AuthenticatedUser;
use crate::domain::error::DomainError;
use crate::presentation::middleware::RequestId;

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(DomainError::Unauthorized.into())),
        }
    }
}

pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}

/// Renders body extraction failures with the same JSON shape as domain errors.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    DomainError::InvalidBody(err.to_string()).into()
}

/// Turns a deferred body extraction failure back into a `DomainError`.
pub fn body_error(err: Error) -> DomainError {
    match err.as_error::<DomainError>() {
        Some(DomainError::InvalidBody(reason)) => DomainError::InvalidBody(reason.clone()),
        _ => DomainError::InvalidBody(err.to_string()),
    }
}

pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
