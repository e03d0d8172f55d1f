use actix_web::{guard, web};

use crate::application::auth_service::AuthService;
use crate::application::post_service::PostService;
use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;
use crate::presentation::handlers;
use crate::presentation::middleware::JwtAuthMiddleware;
use crate::presentation::utils::json_error_handler;

/// Registers every route of the API.
///
/// Reads of `/posts` are public; writes go through [`JwtAuthMiddleware`].
/// The public resources carry a `GET` guard so other methods on the same
/// path fall through to the protected scope.
pub fn configure<U, P>(
    auth: AuthService<U>,
    posts: PostService<P>,
) -> impl FnOnce(&mut web::ServiceConfig)
where
    U: UserRepository + ?Sized + 'static,
    P: PostRepository + ?Sized + 'static,
{
    move |cfg| {
        cfg.app_data(web::Data::new(auth.clone()))
            .app_data(web::Data::new(posts))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/", web::get().to(handlers::index::index))
            .route("/health", web::get().to(handlers::index::health))
            .route("/register", web::post().to(handlers::auth::register::<U>))
            .route("/login", web::post().to(handlers::auth::login::<U>))
            .service(
                web::resource("/posts")
                    .guard(guard::Get())
                    .route(web::get().to(handlers::post::list_posts::<P>)),
            )
            .service(
                web::resource("/posts/{id}")
                    .guard(guard::Get())
                    .route(web::get().to(handlers::post::get_post::<P>)),
            )
            .service(
                web::scope("/posts")
                    .wrap(JwtAuthMiddleware::new(auth))
                    .service(
                        web::resource("").route(web::post().to(handlers::post::create_post::<P>)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(handlers::post::update_post::<P>))
                            .route(web::delete().to(handlers::post::delete_post::<P>)),
                    ),
            );
    }
}
