//! Application state - shared across all handlers.

use std::sync::Arc;

use agora_core::ports::{PasswordService, PostDataSource, TokenService, UserDataSource};
use agora_core::services::{AuthenticationService, PostService, UserService};
use agora_infra::{
    Argon2PasswordService, DatabaseConnections, InMemoryPostDataSource, InMemoryUserDataSource,
    JwtTokenService,
};

#[cfg(feature = "postgres")]
use agora_infra::{PostgresPostDataSource, PostgresUserDataSource};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthenticationService>,
    pub posts: Arc<PostService>,
    pub users: Arc<UserService>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (db, users, posts) = Self::data_sources(config).await;

        let state = Self::from_parts(
            users,
            posts,
            Arc::new(Argon2PasswordService::new()),
            Arc::new(JwtTokenService::new(config.jwt.clone())),
            db,
        );

        tracing::info!("Application state initialized");
        state
    }

    /// Wire services over the given data sources and auth primitives.
    pub fn from_parts(
        users: Arc<dyn UserDataSource>,
        posts: Arc<dyn PostDataSource>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        db: Option<Arc<DatabaseConnections>>,
    ) -> Self {
        Self {
            auth: Arc::new(AuthenticationService::new(users.clone(), passwords, tokens)),
            posts: Arc::new(PostService::new(posts)),
            users: Arc::new(UserService::new(users)),
            db,
        }
    }

    /// In-memory data sources, no database.
    #[cfg(test)]
    pub fn in_memory(
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self::from_parts(
            Arc::new(InMemoryUserDataSource::new()),
            Arc::new(InMemoryPostDataSource::new()),
            passwords,
            tokens,
            None,
        )
    }

    #[cfg(feature = "postgres")]
    async fn data_sources(
        config: &AppConfig,
    ) -> (
        Option<Arc<DatabaseConnections>>,
        Arc<dyn UserDataSource>,
        Arc<dyn PostDataSource>,
    ) {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory_sources();
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => {
                let users: Arc<dyn UserDataSource> =
                    Arc::new(PostgresUserDataSource::new(connections.main.clone()));
                let posts: Arc<dyn PostDataSource> =
                    Arc::new(PostgresPostDataSource::new(connections.main.clone()));
                (Some(Arc::new(connections)), users, posts)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::in_memory_sources()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn data_sources(
        _config: &AppConfig,
    ) -> (
        Option<Arc<DatabaseConnections>>,
        Arc<dyn UserDataSource>,
        Arc<dyn PostDataSource>,
    ) {
        tracing::info!("Running without postgres feature - using in-memory data sources");
        Self::in_memory_sources()
    }

    fn in_memory_sources() -> (
        Option<Arc<DatabaseConnections>>,
        Arc<dyn UserDataSource>,
        Arc<dyn PostDataSource>,
    ) {
        (
            None,
            Arc::new(InMemoryUserDataSource::new()),
            Arc::new(InMemoryPostDataSource::new()),
        )
    }
}
