use crate::error::BlogClientError;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

const TOKEN_FILE: &str = ".blog_token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}\n{}", self.id, self.title, self.content)
    }
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Clone)]
pub struct BlogClientHttp {
    client: Client,
    base_url: String,
    token: Option<String>,
    token_path: Option<PathBuf>,
}

impl BlogClientHttp {
    pub fn connect(endpoint: &str) -> Result<Self, BlogClientError> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        Ok(Self {
            client: Client::builder().build()?,
            base_url,
            token: None,
            token_path: Some(PathBuf::from(TOKEN_FILE)),
        })
    }

    /// Keeps the token in memory only.
    pub fn without_token_file(mut self) -> Self {
        self.token_path = None;
        self
    }

    pub fn set_token(&mut self, token: String) -> Result<(), BlogClientError> {
        if let Some(path) = &self.token_path {
            fs::write(path, &token)?;
        }
        self.token = Some(token);
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn load_token(&self) -> Option<String> {
        match &self.token {
            Some(t) if !t.is_empty() => Some(t.clone()),
            _ => self
                .token_path
                .as_ref()
                .and_then(|path| fs::read_to_string(path).ok())
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }

    fn authorized(&self, req: RequestBuilder) -> Result<RequestBuilder, BlogClientError> {
        let token = self
            .load_token()
            .ok_or_else(|| BlogClientError::Unauthorized("not logged in".to_string()))?;
        Ok(req.bearer_auth(token))
    }

    async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T, BlogClientError> {
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(BlogClientError::from_http_response(resp).await)
        }
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<String, BlogClientError> {
        let resp = self
            .client
            .post(self.url("/register"))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        let body: MessageResponse = Self::parse(resp).await?;
        Ok(body.message)
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), BlogClientError> {
        let resp = self
            .client
            .post(self.url("/login"))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        let auth: AuthResponse = Self::parse(resp).await?;
        self.set_token(auth.access_token)
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, BlogClientError> {
        let resp = self.client.get(self.url("/posts")).send().await?;
        Self::parse(resp).await
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, BlogClientError> {
        let resp = self
            .client
            .get(self.url(&format!("/posts/{}", id)))
            .send()
            .await?;
        Self::parse(resp).await
    }

    pub async fn create_post(&self, title: &str, content: &str) -> Result<i64, BlogClientError> {
        let req = self.authorized(self.client.post(self.url("/posts")))?;
        let resp = req
            .json(&serde_json::json!({
                "title": title,
                "content": content,
            }))
            .send()
            .await?;

        let created: CreatedResponse = Self::parse(resp).await?;
        Ok(created.id)
    }

    pub async fn update_post(
        &self,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<(), BlogClientError> {
        let req = self.authorized(self.client.put(self.url(&format!("/posts/{}", id))))?;
        let resp = req
            .json(&serde_json::json!({
                "title": title,
                "content": content,
            }))
            .send()
            .await?;

        let _: MessageResponse = Self::parse(resp).await?;
        Ok(())
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), BlogClientError> {
        let req = self.authorized(self.client.delete(self.url(&format!("/posts/{}", id))))?;
        let resp = req.send().await?;

        let _: MessageResponse = Self::parse(resp).await?;
        Ok(())
    }
}
