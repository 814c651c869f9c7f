//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::{Database, UserStore};
use crate::services::{CredentialManager, CredentialService, TokenIssuer};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and lookup
    pub credentials: Arc<dyn CredentialService>,
    /// Used by the auth middleware to verify bearer tokens
    pub token_issuer: Arc<dyn TokenIssuer>,
    /// Present only when running against a database
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Wire a credential manager over the given store and issuer.
    pub fn new(
        store: Arc<dyn UserStore>,
        token_issuer: Arc<dyn TokenIssuer>,
        database: Option<Arc<Database>>,
    ) -> Self {
        let credentials = Arc::new(CredentialManager::new(store, token_issuer.clone()));

        Self {
            credentials,
            token_issuer,
            database,
        }
    }
}
