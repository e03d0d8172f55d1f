use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("missing required field: {0}")]
    ValidationMissing(&'static str),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),
    #[error("could not verify")]
    InvalidCredentials,
    #[error("unauthorized")]
    Unauthorized,
    #[error("post not found: {0}")]
    PostNotFound(i64),
    #[error("you are not authorized to {action} this post")]
    Forbidden { action: &'static str },
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::ValidationMissing(_) | DomainError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            DomainError::PostNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::InvalidCredentials | DomainError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            DomainError::Forbidden { .. } => StatusCode::FORBIDDEN,
            DomainError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // storage and crypto details stay in the logs
        let message = match self {
            DomainError::Internal(_) => "internal server error".to_string(),
            DomainError::PostNotFound(_) => "post not found".to_string(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            message: message.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn maps_variants_to_status_codes() {
        let cases = [
            (DomainError::ValidationMissing("title"), StatusCode::BAD_REQUEST),
            (DomainError::InvalidBody("eof".into()), StatusCode::BAD_REQUEST),
            (
                DomainError::UserAlreadyExists("alice".into()),
                StatusCode::CONFLICT,
            ),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::Unauthorized, StatusCode::UNAUTHORIZED),
            (DomainError::PostNotFound(7), StatusCode::NOT_FOUND),
            (
                DomainError::Forbidden { action: "delete" },
                StatusCode::FORBIDDEN,
            ),
            (
                DomainError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err}");
        }
    }

    #[actix_web::test]
    async fn internal_errors_do_not_leak_details() {
        let response = DomainError::Internal("connection refused".into()).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["message"], "internal server error");
    }

    #[actix_web::test]
    async fn forbidden_names_the_action() {
        let response = DomainError::Forbidden { action: "update" }.error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["message"], "you are not authorized to update this post");
    }
}
