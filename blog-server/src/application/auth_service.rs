use std::sync::Arc;

use tracing::{instrument, warn};

use crate::application::authorization::AuthenticatedUser;
use crate::data::user_repository::UserRepository;
use crate::domain::{
    error::DomainError,
    user::{NewUser, User},
};
use crate::infrastructure::security::{JwtKeys, hash_password, verify_password};

pub struct AuthService<R: UserRepository + ?Sized + 'static> {
    repo: Arc<R>,
    keys: JwtKeys,
}

impl<R: UserRepository + ?Sized + 'static> Clone for AuthService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            keys: self.keys.clone(),
        }
    }
}

impl<R> AuthService<R>
where
    R: UserRepository + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>, keys: JwtKeys) -> Self {
        Self { repo, keys }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    #[instrument(skip(self, password))]
    pub async fn register(&self, username: String, password: String) -> Result<User, DomainError> {
        if self.repo.find_by_username(&username).await?.is_some() {
            return Err(DomainError::UserAlreadyExists(username));
        }

        let hash =
            hash_password(&password).map_err(|err| DomainError::Internal(err.to_string()))?;
        self.repo.create(NewUser::new(username, hash)).await
    }

    /// Checks a username/password pair. Unknown users and wrong passwords are
    /// indistinguishable to the caller.
    #[instrument(skip(self, password))]
    pub async fn verify(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        let valid = verify_password(password, &user.password_hash).map_err(|err| {
            warn!(user_id = user.id, "stored password hash is unreadable: {}", err);
            DomainError::InvalidCredentials
        })?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        Ok(user)
    }

    pub fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.keys
            .generate_token(&user.username)
            .map_err(|err| DomainError::Internal(err.to_string()))
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, DomainError> {
        let user = self.verify(username, password).await?;
        self.issue_token(&user)
    }

    /// Validates a bearer token and returns the username it was issued for.
    pub fn validate_token(&self, token: &str) -> Result<String, DomainError> {
        self.keys
            .verify_token(token)
            .map(|claims| claims.sub)
            .map_err(|_| DomainError::Unauthorized)
    }

    /// Resolves a bearer token to a user that still exists.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, DomainError> {
        let username = self.validate_token(token)?;
        let user = self
            .repo
            .find_by_username(&username)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username,
        })
    }
}
