pub mod auth_service;
pub mod authorization;
pub mod post_service;
