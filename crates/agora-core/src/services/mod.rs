//! Domain services - one method per use case, composed from data source calls.

mod authentication;
mod post;
mod user;

#[cfg(test)]
mod testing;

pub use authentication::{AuthenticationService, Session};
pub use post::PostService;
pub use user::UserService;
