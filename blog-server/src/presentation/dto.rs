use crate::domain::error::DomainError;
use crate::domain::post::Post;
use serde::{Deserialize, Serialize};

/// Absent and `null` fields are both treated as missing.
fn required(value: Option<String>, field: &'static str) -> Result<String, DomainError> {
    value.ok_or(DomainError::ValidationMissing(field))
}

// ======================= AUTH =======================

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl CredentialsRequest {
    pub fn validate(self) -> Result<Credentials, DomainError> {
        Ok(Credentials {
            username: required(self.username, "username")?,
            password: required(self.password, "password")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ======================= POSTS =======================

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

pub struct PostFields {
    pub title: String,
    pub content: String,
}

impl PostRequest {
    pub fn validate(self) -> Result<PostFields, DomainError> {
        Ok(PostFields {
            title: required(self.title, "title")?,
            content: required(self.content, "content")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostCreatedResponse {
    pub message: String,
    pub id: i64,
}

// ======================= Utils =======================

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_absent_fields_are_missing() {
        let absent: CredentialsRequest = serde_json::from_str(r#"{"password":"pw"}"#).unwrap();
        assert!(matches!(
            absent.validate(),
            Err(DomainError::ValidationMissing("username"))
        ));

        let null: PostRequest =
            serde_json::from_str(r#"{"title":"t","content":null}"#).unwrap();
        assert!(matches!(
            null.validate(),
            Err(DomainError::ValidationMissing("content"))
        ));
    }

    #[test]
    fn post_response_hides_author_and_timestamps() {
        let post = Post {
            id: 3,
            author_id: 9,
            title: "t".into(),
            content: "c".into(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(PostResponse::from(post)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "title": "t", "content": "c"}));
    }
}
