//! # Agora Shared
//!
//! Request and response types of the HTTP API, shared with API clients.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
