//! Application services layer - Use cases and business logic.
//!
//! Services depend on the store and issuer traits, never on concrete
//! backends.

mod credential_manager;
mod token;

pub use credential_manager::{CredentialManager, CredentialService};
pub use token::{Claims, JwtIssuer, TokenConfig, TokenIssuer};

#[cfg(test)]
pub use token::MockTokenIssuer;
