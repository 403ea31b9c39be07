//! Application state - shared across all handlers.

use std::sync::Arc;

use memo_core::ports::{HtmlSanitizer, PostRepository, TokenService};
use memo_infra::database::{DatabaseConfig, DatabaseConnections, InMemoryPostRepository};
use memo_infra::{AmmoniaSanitizer, JwtTokenService, SanitizePolicy};

#[cfg(feature = "postgres")]
use memo_infra::database::PostgresPostRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub sanitizer: Arc<dyn HtmlSanitizer>,
    pub tokens: Arc<dyn TokenService>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let (db, posts) = Self::init_store(db_config).await;

        // One policy value for the whole process.
        let sanitizer: Arc<dyn HtmlSanitizer> =
            Arc::new(AmmoniaSanitizer::new(SanitizePolicy::post_body()));
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());

        tracing::info!("Application state initialized");

        Self {
            posts,
            sanitizer,
            tokens,
            db,
        }
    }

    /// State over an explicit store, without a database handle.
    #[cfg(test)]
    pub fn with_store(posts: Arc<dyn PostRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            posts,
            sanitizer: Arc::new(AmmoniaSanitizer::default()),
            tokens,
            db: None,
        }
    }

    #[cfg(feature = "postgres")]
    async fn init_store(
        db_config: Option<&DatabaseConfig>,
    ) -> (Option<Arc<DatabaseConnections>>, Arc<dyn PostRepository>) {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return (None, Arc::new(InMemoryPostRepository::new()));
        };

        match DatabaseConnections::init(config).await {
            Ok(connections) => {
                let conn = Arc::new(connections);
                let repo = Arc::new(PostgresPostRepository::new(conn.main.clone()));
                (Some(conn), repo)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                (None, Arc::new(InMemoryPostRepository::new()))
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn init_store(
        _db_config: Option<&DatabaseConfig>,
    ) -> (Option<Arc<DatabaseConnections>>, Arc<dyn PostRepository>) {
        tracing::info!("Running without postgres feature - using in-memory post store");
        (None, Arc::new(InMemoryPostRepository::new()))
    }
}
