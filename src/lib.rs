//! Credential manager - user registration, login and session tokens.
//!
//! Passwords are hashed with Argon2id before they reach storage, login
//! verifies against the stored hash, and sessions are signed JWTs whose
//! subject is the user id.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: command-line entry points (`serve`, `migrate`)
//! - **config**: environment configuration and constants
//! - **domain**: user records, outward views, the password value object
//! - **services**: the credential manager and token issuance
//! - **infra**: database setup and user store implementations
//! - **api**: HTTP handlers, middleware and routes
//! - **errors**: centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server against Postgres
//! cargo run -- serve
//!
//! # Start with a throwaway in-memory store
//! cargo run -- serve --in-memory
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

pub use api::AppState;
pub use config::Config;
pub use domain::{AuthSession, Credentials, Password, Profile, PublicUser, UserRecord};
pub use errors::{AppError, AppResult};
pub use services::{CredentialManager, CredentialService, JwtIssuer, TokenConfig, TokenIssuer};
