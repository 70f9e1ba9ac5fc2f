//! # Agora Infrastructure
//!
//! Concrete implementations of the ports defined in `agora-core`.
//! This crate contains the PostgreSQL and in-memory data sources and the
//! authentication primitives.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL data sources via SeaORM
//! - `auth` - JWT + Argon2 authentication

pub mod database;
pub mod memory;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, DatabaseConnections};
pub use memory::{InMemoryPostDataSource, InMemoryUserDataSource};

#[cfg(feature = "postgres")]
pub use database::{PostgresPostDataSource, PostgresUserDataSource};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
