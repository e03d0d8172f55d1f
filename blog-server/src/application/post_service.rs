use std::sync::Arc;

use crate::application::authorization::{AuthenticatedUser, PostAction, authorize_mutation};
use crate::data::post_repository::PostRepository;
use crate::domain::{
    error::DomainError,
    post::{NewPost, Post},
};
use tracing::instrument;

pub struct PostService<R: PostRepository + ?Sized + 'static> {
    repo: Arc<R>,
}

impl<R: PostRepository + ?Sized + 'static> Clone for PostService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> PostService<R>
where
    R: PostRepository + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.list().await
    }

    #[instrument(skip(self, content))]
    pub async fn create_post(
        &self,
        author: &AuthenticatedUser,
        title: String,
        content: String,
    ) -> Result<Post, DomainError> {
        self.repo
            .create(NewPost::new(author.id, title, content))
            .await
    }

    /// Loads a post the caller wants to change. Missing post → `PostNotFound`,
    /// someone else's post → `Forbidden`.
    pub async fn authorize(
        &self,
        user: &AuthenticatedUser,
        post_id: i64,
        action: PostAction,
    ) -> Result<Post, DomainError> {
        let post = self.get_post(post_id).await?;
        authorize_mutation(user, &post, action)?;
        Ok(post)
    }

    /// Rewrites the caller's post. `changes` yields the new title and content
    /// and is only evaluated once the post is known to exist and belong to
    /// the caller.
    #[instrument(skip(self, changes))]
    pub async fn update_post<F>(
        &self,
        user: &AuthenticatedUser,
        post_id: i64,
        changes: F,
    ) -> Result<Post, DomainError>
    where
        F: FnOnce() -> Result<(String, String), DomainError>,
    {
        self.authorize(user, post_id, PostAction::Update).await?;
        let (title, content) = changes()?;

        self.repo
            .update_post(post_id, user.id, title, content)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, user: &AuthenticatedUser, post_id: i64) -> Result<(), DomainError> {
        self.authorize(user, post_id, PostAction::Delete).await?;

        if !self.repo.delete_post(post_id, user.id).await? {
            // removed by a concurrent request between the check and the write
            return Err(DomainError::PostNotFound(post_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemoryStore;
    use crate::data::user_repository::UserRepository;
    use crate::domain::user::NewUser;

    async fn setup() -> (PostService<InMemoryStore>, AuthenticatedUser, AuthenticatedUser) {
        let store = Arc::new(InMemoryStore::new());
        let mut users = Vec::new();
        for name in ["alice", "bob"] {
            let user = UserRepository::create(
                store.as_ref(),
                NewUser::new(name.to_string(), "hash".to_string()),
            )
            .await
            .unwrap();
            users.push(AuthenticatedUser {
                id: user.id,
                username: user.username,
            });
        }
        let bob = users.pop().unwrap();
        let alice = users.pop().unwrap();
        (PostService::new(store), alice, bob)
    }

    #[tokio::test]
    async fn owner_can_update_and_delete() {
        let (posts, alice, _) = setup().await;
        let post = posts
            .create_post(&alice, "Hello".into(), "World".into())
            .await
            .unwrap();
        assert_eq!(post.author_id, alice.id);

        let updated = posts
            .update_post(&alice, post.id, || Ok(("Hi".into(), "There".into())))
            .await
            .unwrap();
        assert_eq!(updated.title, "Hi");
        assert_eq!(posts.get_post(post.id).await.unwrap().content, "There");

        posts.delete_post(&alice, post.id).await.unwrap();
        assert!(matches!(
            posts.get_post(post.id).await,
            Err(DomainError::PostNotFound(_))
        ));
    }

    #[tokio::test]
    async fn non_owner_is_forbidden_and_nothing_changes() {
        let (posts, alice, bob) = setup().await;
        let post = posts
            .create_post(&alice, "Hello".into(), "World".into())
            .await
            .unwrap();

        let update = posts
            .update_post(&bob, post.id, || Ok(("Hacked".into(), "!".into())))
            .await;
        assert!(matches!(update, Err(DomainError::Forbidden { action: "update" })));

        let delete = posts.delete_post(&bob, post.id).await;
        assert!(matches!(delete, Err(DomainError::Forbidden { action: "delete" })));

        assert_eq!(posts.get_post(post.id).await.unwrap().title, "Hello");
    }

    #[tokio::test]
    async fn missing_post_is_not_found_before_ownership() {
        let (posts, _, bob) = setup().await;
        assert!(matches!(
            posts
                .update_post(&bob, 99, || Ok(("t".into(), "c".into())))
                .await,
            Err(DomainError::PostNotFound(99))
        ));
        assert!(matches!(
            posts.delete_post(&bob, 99).await,
            Err(DomainError::PostNotFound(99))
        ));
    }

    #[tokio::test]
    async fn changes_are_not_evaluated_before_ownership_is_known() {
        let (posts, alice, bob) = setup().await;
        let post = posts
            .create_post(&alice, "Hello".into(), "World".into())
            .await
            .unwrap();

        let bad_body = || -> Result<(String, String), DomainError> {
            Err(DomainError::ValidationMissing("title"))
        };
        assert!(matches!(
            posts.update_post(&bob, 99, bad_body).await,
            Err(DomainError::PostNotFound(99))
        ));
        assert!(matches!(
            posts.update_post(&bob, post.id, bad_body).await,
            Err(DomainError::Forbidden { action: "update" })
        ));
        assert!(matches!(
            posts.update_post(&alice, post.id, bad_body).await,
            Err(DomainError::ValidationMissing("title"))
        ));
        assert_eq!(posts.get_post(post.id).await.unwrap().title, "Hello");
    }

    #[tokio::test]
    async fn lists_posts_in_creation_order() {
        let (posts, alice, bob) = setup().await;
        posts.create_post(&alice, "P1".into(), "one".into()).await.unwrap();
        posts.create_post(&bob, "P2".into(), "two".into()).await.unwrap();

        let listed = posts.list_posts().await.unwrap();
        let pairs: Vec<(&str, &str)> = listed
            .iter()
            .map(|p| (p.title.as_str(), p.content.as_str()))
            .collect();
        assert_eq!(pairs, vec![("P1", "one"), ("P2", "two")]);
    }
}
