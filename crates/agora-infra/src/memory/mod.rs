//! In-memory data sources - fallback when PostgreSQL is not configured.

mod posts;
mod users;

pub use posts::InMemoryPostDataSource;
pub use users::InMemoryUserDataSource;
