use crate::domain::error::DomainError;
use crate::domain::post::Post;

/// Caller identity resolved from a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Update,
    Delete,
}

impl PostAction {
    pub fn as_str(self) -> &'static str {
        match self {
            PostAction::Update => "update",
            PostAction::Delete => "delete",
        }
    }
}

/// Only the author of a post may change or remove it.
pub fn authorize_mutation(
    user: &AuthenticatedUser,
    post: &Post,
    action: PostAction,
) -> Result<(), DomainError> {
    if post.author_id != user.id {
        return Err(DomainError::Forbidden {
            action: action.as_str(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post_by(author_id: i64) -> Post {
        Post {
            id: 1,
            author_id,
            title: "t".into(),
            content: "c".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_is_allowed() {
        let alice = AuthenticatedUser {
            id: 1,
            username: "alice".into(),
        };
        assert!(authorize_mutation(&alice, &post_by(1), PostAction::Update).is_ok());
        assert!(authorize_mutation(&alice, &post_by(1), PostAction::Delete).is_ok());
    }

    #[test]
    fn other_users_are_forbidden() {
        let bob = AuthenticatedUser {
            id: 2,
            username: "bob".into(),
        };
        let err = authorize_mutation(&bob, &post_by(1), PostAction::Delete).unwrap_err();
        assert!(matches!(err, DomainError::Forbidden { action: "delete" }));
    }
}
