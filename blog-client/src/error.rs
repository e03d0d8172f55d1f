use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogClientError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Token storage error: {0}")]
    TokenStorage(#[from] std::io::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl BlogClientError {
    pub async fn from_http_response(resp: reqwest::Response) -> Self {
        let status = resp.status();
        match resp.text().await {
            Ok(body) => Self::from_status(status, &body),
            Err(err) => Self::RequestError(err),
        }
    }

    /// Maps a non-2xx status and its body onto an error variant. JSON bodies
    /// of the form `{"message": ...}` are unwrapped; anything else is kept verbatim.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.message)
            .unwrap_or_else(|_| body.trim().to_string());

        match status {
            StatusCode::BAD_REQUEST => Self::InvalidRequest(message),
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::CONFLICT => Self::Conflict(message),
            other => Self::Server {
                status: other.as_u16(),
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_json_messages() {
        let err = BlogClientError::from_status(
            StatusCode::FORBIDDEN,
            r#"{"message":"you are not authorized to delete this post"}"#,
        );
        assert!(
            matches!(err, BlogClientError::Forbidden(ref m) if m == "you are not authorized to delete this post")
        );
    }

    #[test]
    fn keeps_plain_bodies() {
        let err = BlogClientError::from_status(StatusCode::NOT_FOUND, "Not Found\n");
        assert!(matches!(err, BlogClientError::NotFound(ref m) if m == "Not Found"));
    }

    #[test]
    fn maps_statuses() {
        assert!(matches!(
            BlogClientError::from_status(StatusCode::CONFLICT, ""),
            BlogClientError::Conflict(_)
        ));
        assert!(matches!(
            BlogClientError::from_status(StatusCode::UNAUTHORIZED, ""),
            BlogClientError::Unauthorized(_)
        ));
        assert!(matches!(
            BlogClientError::from_status(StatusCode::BAD_GATEWAY, "upstream"),
            BlogClientError::Server { status: 502, .. }
        ));
    }
}
