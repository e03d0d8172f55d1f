//! Typed HTTP client for the blog API.

mod error;
mod http_client;

pub use error::BlogClientError;
pub use http_client::{BlogClientHttp, Post};
