use actix_web::{HttpResponse, Responder, http::header::ContentType};
use chrono::{DateTime, Utc};
use serde::Serialize;

const INFO_PAGE: &str = "This is a simple blog API for CRUD operations with authentication and authorization.<br/>\
Use the following endpoints in any API testing tool:<br/>\
1. Register a user: <i>HOST</i>/register (POST, {\"username\", \"password\"})<br/>\
2. Log in to get an access token: <i>HOST</i>/login (POST, {\"username\", \"password\"})<br/>\
3. View, create, update or delete posts with GET, POST, PUT, DELETE on <i>HOST</i>/posts<br/>\
Note: /posts lists every post, while /posts/<i>id</i> targets the post with that id.<br/>\
Note: after logging in, send the access token in the authorization header:<br/>\
Authorization: Bearer <i>your_access_token</i>";

pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INFO_PAGE)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
