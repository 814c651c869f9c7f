//! User store - persistence of user records.
//!
//! The [`UserStore`] trait is the only seam the credential manager sees.
//! Failures come back as a typed [`StoreError`]; uniqueness of `email` is
//! enforced by each implementation, not by callers.

pub(crate) mod entities;
mod memory;
mod sea;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{NewUser, UserRecord};

pub use memory::MemoryUserStore;
pub use sea::SeaUserStore;

#[cfg(test)]
use mockall::automock;

/// Errors reported by a user store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique field already holds the given value
    #[error("{field} '{value}' already exists")]
    Conflict { field: &'static str, value: String },

    /// Backend failure; the detail is for logs only
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(detail: impl std::fmt::Display) -> Self {
        StoreError::Unavailable(detail.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// User store trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user, assigning its id and timestamps.
    ///
    /// Returns [`StoreError::Conflict`] when the email is already taken.
    async fn insert(&self, user: NewUser) -> StoreResult<UserRecord>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>>;

    /// Find a user by primary identifier
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<UserRecord>>;
}
