// ============================
// crates/backend-lib/src/auth/service.rs
// ============================
//! Registration and login against the credential store.
use super::password::{hash_password, verify_password};
use super::token::TokenService;
use crate::error::AppError;
use crate::store::CredentialStore;

/// Auth service: hashes passwords on registration, verifies them on
/// login, and issues bearer tokens.
#[derive(Clone)]
pub struct AuthService<S> {
    store: S,
    tokens: TokenService,
    hash_cost: u32,
}

impl<S: CredentialStore> AuthService<S> {
    pub fn new(store: S, tokens: TokenService, hash_cost: u32) -> Self {
        Self {
            store,
            tokens,
            hash_cost,
        }
    }

    /// Register a new user. Fails with `Conflict` if the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AppError> {
        let hash = hash_password(password, self.hash_cost)?;
        self.store.insert_user(username, &hash).await?;
        tracing::info!(username, "user registered");
        Ok(())
    }

    /// Verify credentials and issue a signed, time-limited token.
    ///
    /// Unknown usernames and wrong passwords fail with the same error
    /// kind; only the message differs.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .store
            .find_user(username)
            .await?
            .ok_or_else(|| AppError::InvalidCredentials("user not found".to_string()))?;

        if !verify_password(&user.password_hash, password) {
            return Err(AppError::InvalidCredentials("wrong password".to_string()));
        }

        self.tokens.issue(&user.id, &user.username)
    }
}
