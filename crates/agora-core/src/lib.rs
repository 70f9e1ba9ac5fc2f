//! # Agora Core
//!
//! The domain layer of the Agora social network backend.
//! This crate contains domain models, the error taxonomy, the data source
//! ports and the use-case services, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
