//! Domain-level error types.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::ports::AuthError;

/// User mutation being persisted when an update fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserOperation {
    Login,
    Logout,
    Profile,
}

impl fmt::Display for UserOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UserOperation::Login => "login",
            UserOperation::Logout => "logout",
            UserOperation::Profile => "profile",
        })
    }
}

/// Domain errors - business logic failures.
///
/// Variants carry the identifiers involved and, for wrapped failures, the
/// underlying cause. The `Display` output embeds both.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Post '{post_id}' not found")]
    PostNotFound { post_id: Uuid },

    #[error("User '{user_id}' not found")]
    UserNotFound { user_id: Uuid },

    #[error("Error retrieving posts. {cause}")]
    GettingPosts {
        #[source]
        cause: RepoError,
    },

    #[error("Error retrieving post '{post_id}'. {cause}")]
    GettingPost {
        post_id: Uuid,
        #[source]
        cause: RepoError,
    },

    #[error("Error creating post for user '{owner_id}'. {cause}")]
    CreatingPost {
        owner_id: Uuid,
        #[source]
        cause: RepoError,
    },

    #[error("Error setting like to post '{post_id}' by user '{liker_id}'. {cause}")]
    LikingPost {
        post_id: Uuid,
        liker_id: Uuid,
        #[source]
        cause: RepoError,
    },

    #[error("Error commenting post '{post_id}' by user '{owner_id}'. {cause}")]
    CommentingPost {
        post_id: Uuid,
        owner_id: Uuid,
        #[source]
        cause: RepoError,
    },

    #[error("Error retrieving user data. {cause}")]
    GettingUser {
        #[source]
        cause: RepoError,
    },

    #[error("Error creating user '{username}'. {cause}")]
    CreatingUser {
        username: String,
        #[source]
        cause: RepoError,
    },

    #[error("Error updating user '{user_id}' {operation} data. {cause}")]
    UpdatingUser {
        user_id: Uuid,
        operation: UserOperation,
        #[source]
        cause: RepoError,
    },

    #[error("Username '{username}' is already taken")]
    UsernameTaken { username: String },

    #[error("User '{username}' already exists. {cause}")]
    UserExists {
        username: String,
        #[source]
        cause: RepoError,
    },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication failure. {0}")]
    Auth(#[from] AuthError),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Whether the error reports a missing entity rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::PostNotFound { .. } | DomainError::UserNotFound { .. }
        )
    }

    /// Whether the error reports a clash with data that already exists.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DomainError::UsernameTaken { .. } | DomainError::UserExists { .. }
        )
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updating_user_message_embeds_id_and_cause() {
        let user_id = Uuid::new_v4();
        let err = DomainError::UpdatingUser {
            user_id,
            operation: UserOperation::Logout,
            cause: RepoError::Query("Testing error".to_string()),
        };

        assert_eq!(
            err.to_string(),
            format!("Error updating user '{user_id}' logout data. Query execution failed: Testing error")
        );
    }

    #[test]
    fn test_liking_post_message_names_post_and_liker() {
        let post_id = Uuid::new_v4();
        let liker_id = Uuid::new_v4();
        let err = DomainError::LikingPost {
            post_id,
            liker_id,
            cause: RepoError::Connection("refused".to_string()),
        };

        let message = err.to_string();
        assert!(message.contains(&post_id.to_string()));
        assert!(message.contains(&liker_id.to_string()));
        assert!(message.ends_with("refused"));
    }

    #[test]
    fn test_not_found_classification() {
        assert!(DomainError::PostNotFound { post_id: Uuid::nil() }.is_not_found());
        assert!(
            !DomainError::GettingPosts {
                cause: RepoError::NotFound
            }
            .is_not_found()
        );
    }

    #[test]
    fn test_conflict_classification() {
        let exists = DomainError::UserExists {
            username: "bob".to_string(),
            cause: RepoError::Constraint("email 'ann@example.com' already exists".to_string()),
        };

        assert!(exists.is_conflict());
        assert!(exists.to_string().contains("ann@example.com"));
        assert!(
            !DomainError::CreatingUser {
                username: "bob".to_string(),
                cause: RepoError::Query("boom".to_string()),
            }
            .is_conflict()
        );
    }

    #[test]
    fn test_source_is_the_repo_error() {
        use std::error::Error as _;

        let err = DomainError::GettingPosts {
            cause: RepoError::Query("boom".to_string()),
        };
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("Query execution failed: boom"));
    }
}
