use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{NewPost, Post};
use crate::domain::user::{NewUser, User};

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<i64, User>,
    usernames: HashMap<String, i64>,
    posts: BTreeMap<i64, Post>,
    last_user_id: i64,
    last_post_id: i64,
}

/// Process-local store backing both repositories.
///
/// Used by the test suite and by `STORAGE=memory` runs. Users and posts share
/// one lock so the author reference of a post is checked against the same
/// snapshot it is written into.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        if state.usernames.contains_key(&user.username) {
            return Err(DomainError::UserAlreadyExists(user.username));
        }

        state.last_user_id += 1;
        let created = User {
            id: state.last_user_id,
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        state.usernames.insert(created.username.clone(), created.id);
        state.users.insert(created.id, created.clone());

        info!(user_id = created.id, username = %created.username, "user created");
        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .usernames
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create(&self, post: NewPost) -> Result<Post, DomainError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&post.author_id) {
            return Err(DomainError::Internal(format!(
                "author {} does not exist",
                post.author_id
            )));
        }

        state.last_post_id += 1;
        let now = Utc::now();
        let created = Post {
            id: state.last_post_id,
            author_id: post.author_id,
            title: post.title,
            content: post.content,
            created_at: now,
            updated_at: now,
        };
        state.posts.insert(created.id, created.clone());

        info!(post_id = created.id, author_id = created.author_id, "post created");
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        Ok(self.state.read().await.posts.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.state.read().await.posts.values().cloned().collect())
    }

    async fn update_post(
        &self,
        id: i64,
        author_id: i64,
        title: String,
        content: String,
    ) -> Result<Option<Post>, DomainError> {
        let mut state = self.state.write().await;
        let Some(post) = state
            .posts
            .get_mut(&id)
            .filter(|post| post.author_id == author_id)
        else {
            return Ok(None);
        };

        post.title = title;
        post.content = content;
        post.updated_at = Utc::now();

        info!(post_id = id, "post updated");
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: i64, author_id: i64) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        let owned = state
            .posts
            .get(&id)
            .is_some_and(|post| post.author_id == author_id);
        if owned {
            state.posts.remove(&id);
            info!(post_id = id, "post deleted");
        }
        Ok(owned)
    }
}
