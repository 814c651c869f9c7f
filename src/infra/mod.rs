//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - User store implementations (SeaORM and in-process)

pub mod db;
pub mod store;

pub use db::{Database, Migrator};
pub use store::{MemoryUserStore, SeaUserStore, StoreError, StoreResult, UserStore};

#[cfg(test)]
pub use store::MockUserStore;
