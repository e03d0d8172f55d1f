use crate::application::authorization::AuthenticatedUser;
use crate::application::post_service::PostService;
use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::{MessageResponse, PostCreatedResponse, PostRequest, PostResponse};
use crate::presentation::utils::{body_error, request_id};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::info;

pub async fn create_post<P: PostRepository + ?Sized + 'static>(
    req: HttpRequest,
    user: AuthenticatedUser,
    posts: web::Data<PostService<P>>,
    payload: web::Json<PostRequest>,
) -> Result<HttpResponse, DomainError> {
    let fields = payload.into_inner().validate()?;
    let post = posts.create_post(&user, fields.title, fields.content).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        post_id = post.id,
        "post created"
    );

    Ok(HttpResponse::Created().json(PostCreatedResponse {
        message: "Post created successfully!".to_string(),
        id: post.id,
    }))
}

pub async fn list_posts<P: PostRepository + ?Sized + 'static>(
    posts: web::Data<PostService<P>>,
) -> Result<HttpResponse, DomainError> {
    let posts: Vec<PostResponse> = posts
        .list_posts()
        .await?
        .into_iter()
        .map(PostResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}

pub async fn get_post<P: PostRepository + ?Sized + 'static>(
    posts: web::Data<PostService<P>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let post = posts.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

pub async fn update_post<P: PostRepository + ?Sized + 'static>(
    req: HttpRequest,
    user: AuthenticatedUser,
    posts: web::Data<PostService<P>>,
    path: web::Path<i64>,
    payload: Result<web::Json<PostRequest>, actix_web::Error>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    // body errors surface only after the post is found and owned
    posts
        .update_post(&user, post_id, || {
            let fields = payload.map_err(body_error)?.into_inner().validate()?;
            Ok((fields.title, fields.content))
        })
        .await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        post_id,
        "post updated"
    );

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post updated successfully!")))
}

pub async fn delete_post<P: PostRepository + ?Sized + 'static>(
    req: HttpRequest,
    user: AuthenticatedUser,
    posts: web::Data<PostService<P>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    posts.delete_post(&user, post_id).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        post_id,
        "post deleted"
    );

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted successfully!")))
}
