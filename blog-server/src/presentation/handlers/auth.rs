use crate::application::auth_service::AuthService;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::{AccessTokenResponse, CredentialsRequest, MessageResponse};
use crate::presentation::utils::request_id;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

pub async fn register<U: UserRepository + ?Sized + 'static>(
    req: HttpRequest,
    service: web::Data<AuthService<U>>,
    payload: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, DomainError> {
    let credentials = payload.into_inner().validate()?;
    let user = service
        .register(credentials.username, credentials.password)
        .await?;

    info!(
        request_id = %request_id(&req),
        user_id = user.id,
        username = %user.username,
        "user registered"
    );

    Ok(HttpResponse::Created().json(MessageResponse::new("User registered successfully!")))
}

pub async fn login<U: UserRepository + ?Sized + 'static>(
    req: HttpRequest,
    service: web::Data<AuthService<U>>,
    payload: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, DomainError> {
    let credentials = payload.into_inner().validate()?;
    let jwt = service
        .login(&credentials.username, &credentials.password)
        .await?;

    info!(
        request_id = %request_id(&req),
        username = %credentials.username,
        "user logged in"
    );

    Ok(HttpResponse::Ok().json(AccessTokenResponse {
        access_token: jwt,
        token_type: "Bearer".to_string(),
        expires_in: service.keys().ttl_seconds(),
    }))
}
