use std::sync::Arc;

use blog_server::application::auth_service::AuthService;
use blog_server::application::post_service::PostService;
use blog_server::data::memory::InMemoryStore;
use blog_server::data::post_repository::PostgresPostRepository;
use blog_server::data::user_repository::PostgresUserRepository;
use blog_server::infrastructure::config::{AppConfig, StorageKind};
use blog_server::infrastructure::database::{create_pool, run_migrations};
use blog_server::infrastructure::logging::init_logging;
use blog_server::infrastructure::security::JwtKeys;
use blog_server::server::start_rest_server;
use tracing::warn;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;
    let keys = JwtKeys::new(config.jwt_secret.clone(), config.jwt_ttl_seconds);

    match config.storage {
        StorageKind::Postgres => {
            let database_url = config
                .database_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("database url is not configured"))?;
            let pool = create_pool(&database_url).await?;
            run_migrations(&pool).await?;

            let auth_service =
                AuthService::new(Arc::new(PostgresUserRepository::new(pool.clone())), keys);
            let post_service = PostService::new(Arc::new(PostgresPostRepository::new(pool)));

            start_rest_server(config, auth_service, post_service).await
        }
        StorageKind::Memory => {
            warn!("using in-memory storage, data is lost on restart");
            let store = Arc::new(InMemoryStore::new());

            let auth_service = AuthService::new(Arc::clone(&store), keys);
            let post_service = PostService::new(store);

            start_rest_server(config, auth_service, post_service).await
        }
    }
}
