//! Repository tests against a real PostgreSQL server.
//!
//! Ignored by default. Run with a reachable database:
//! `DATABASE_URL=postgres://... cargo test -p blog-server --test postgres -- --ignored`

use blog_server::data::post_repository::{PostRepository, PostgresPostRepository};
use blog_server::data::user_repository::{PostgresUserRepository, UserRepository};
use blog_server::domain::error::DomainError;
use blog_server::domain::post::NewPost;
use blog_server::domain::user::NewUser;
use sqlx::PgPool;

fn new_user(username: &str) -> NewUser {
    NewUser::new(username.to_string(), "$argon2id$stub".to_string())
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL"]
async fn duplicate_username_maps_to_conflict(pool: PgPool) {
    let users = PostgresUserRepository::new(pool);
    let alice = users.create(new_user("alice")).await.unwrap();

    let err = users.create(new_user("alice")).await.unwrap_err();
    assert!(matches!(err, DomainError::UserAlreadyExists(ref name) if name == "alice"));

    let found = users.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(found.id, alice.id);
    assert_eq!(users.find_by_id(alice.id).await.unwrap().unwrap().username, "alice");
    assert!(users.find_by_username("nobody").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL"]
async fn writes_are_scoped_to_the_author(pool: PgPool) {
    let users = PostgresUserRepository::new(pool.clone());
    let posts = PostgresPostRepository::new(pool);
    let alice = users.create(new_user("alice")).await.unwrap();
    let bob = users.create(new_user("bob")).await.unwrap();

    let post = posts
        .create(NewPost::new(alice.id, "Hello".into(), "World".into()))
        .await
        .unwrap();

    let foreign = posts
        .update_post(post.id, bob.id, "Hacked".into(), "!".into())
        .await
        .unwrap();
    assert!(foreign.is_none());
    assert!(!posts.delete_post(post.id, bob.id).await.unwrap());
    assert_eq!(posts.find_by_id(post.id).await.unwrap().unwrap().title, "Hello");

    let updated = posts
        .update_post(post.id, alice.id, "Hi".into(), "There".into())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.content, "There");

    assert!(posts.delete_post(post.id, alice.id).await.unwrap());
    assert!(posts.find_by_id(post.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL"]
async fn lists_posts_in_insertion_order(pool: PgPool) {
    let users = PostgresUserRepository::new(pool.clone());
    let posts = PostgresPostRepository::new(pool);
    let alice = users.create(new_user("alice")).await.unwrap();

    for title in ["P1", "P2", "P3"] {
        posts
            .create(NewPost::new(alice.id, title.into(), "body".into()))
            .await
            .unwrap();
    }

    let titles: Vec<String> = posts
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, ["P1", "P2", "P3"]);
}
