use crate::application::auth_service::AuthService;
use crate::application::post_service::PostService;
use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;
use crate::infrastructure::config::AppConfig;
use crate::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use crate::presentation::routes;
use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer};
use tracing::info;

pub async fn start_rest_server<U, P>(
    config: AppConfig,
    auth_service: AuthService<U>,
    post_service: PostService<P>,
) -> anyhow::Result<()>
where
    U: UserRepository + ?Sized + 'static,
    P: PostRepository + ?Sized + 'static,
{
    let bind_address = (config.host.clone(), config.port);

    info!(
        host = %bind_address.0,
        port = bind_address.1,
        "HTTP server starting"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(security_headers())
            .wrap(build_cors(&config.cors_origins))
            .configure(routes::configure(
                auth_service.clone(),
                post_service.clone(),
            ))
    })
    .bind(bind_address)?
    .run()
    .await
    .map_err(anyhow::Error::new)?;

    info!("HTTP server stopped");
    Ok(())
}

/// Headers added to every response.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("Referrer-Policy", "no-referrer"))
        .add(("Permissions-Policy", "geolocation=()"))
        .add(("Cross-Origin-Opener-Policy", "same-origin"))
}

/// CORS for the configured origins; `*` allows any origin.
pub fn build_cors(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .max_age(3600);

    if origins.iter().any(|origin| origin == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
