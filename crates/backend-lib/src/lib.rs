// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend functionality for the stockroom record-management server.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod router;
pub mod store;

use std::sync::Arc;

use crate::auth::{AuthService, TokenService};
use crate::catalog::CatalogService;
use crate::config::Settings;

/// Application state shared across all handlers.
///
/// Constructed once at startup from a store handle and the settings;
/// nothing here is ambient or process-global.
#[derive(Clone)]
pub struct AppState<S> {
    /// Auth service (registration, login)
    pub auth: AuthService<S>,
    /// Catalog service (series, products)
    pub catalog: CatalogService<S>,
    /// Token verifier for protected routes; shares the signing secret
    /// with the auth service
    pub tokens: TokenService,
    /// Settings
    pub settings: Arc<Settings>,
}

impl<S: Clone + store::CredentialStore + store::CatalogStore> AppState<S> {
    /// Create a new application state
    pub fn new(store: S, settings: Settings) -> Self {
        let tokens = TokenService::new(&settings.token_secret, settings.token_ttl_secs);

        Self {
            auth: AuthService::new(store.clone(), tokens.clone(), settings.bcrypt_cost),
            catalog: CatalogService::new(store),
            tokens,
            settings: Arc::new(settings),
        }
    }
}
