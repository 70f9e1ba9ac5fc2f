//! Database connection management and PostgreSQL data sources.

mod connections;

#[cfg(feature = "postgres")]
mod mapper;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "postgres")]
pub use postgres_base::PostgresDataSource;
#[cfg(feature = "postgres")]
pub use postgres_repo::{PostgresPostDataSource, PostgresUserDataSource};
