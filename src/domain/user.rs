//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::config::ROLE_USER;

/// Stored user record.
///
/// Deliberately not `Serialize`: the only outward shape is [`PublicUser`].
#[derive(Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub roles: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("name", &self.name)
            .field("roles", &self.roles)
            .field("is_active", &self.is_active)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Payload handed to the store on insert.
///
/// Carries the derived hash only; there is no field for a raw password.
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub roles: Vec<String>,
    pub is_active: bool,
}

impl NewUser {
    /// Combine a password hash with profile fields.
    pub fn new(email: String, password_hash: String, profile: Profile) -> Self {
        Self {
            email,
            password_hash,
            name: profile.name,
            roles: profile
                .roles
                .filter(|roles| !roles.is_empty())
                .unwrap_or_else(|| vec![ROLE_USER.to_string()]),
            is_active: true,
        }
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("name", &self.name)
            .field("roles", &self.roles)
            .finish()
    }
}

/// Raw login or registration credentials.
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Profile attributes supplied at registration.
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    /// Defaults to the `user` role when absent or empty
    pub roles: Option<Vec<String>>,
}

impl Profile {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: None,
        }
    }
}

/// User view safe to return to a caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicUser {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address
    pub email: String,
    /// User display name
    pub name: String,
    /// Opaque role strings
    pub roles: Vec<String>,
    pub is_active: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for PublicUser {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            roles: user.roles,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: PublicUser,
    /// Opaque signed session token
    pub token: String,
}
