pub mod auth;
pub mod index;
pub mod post;
