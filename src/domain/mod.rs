//! Domain layer - Core business entities and logic
//!
//! User records, the outward user view, raw credential inputs and the
//! password value object.

pub mod password;
pub mod user;

pub use password::Password;
pub use user::{AuthSession, Credentials, NewUser, Profile, PublicUser, UserRecord};
