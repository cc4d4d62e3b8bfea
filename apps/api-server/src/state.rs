//! Application state - shared across all handlers.

use std::sync::Arc;

use folio_core::ports::PostRepository;
use folio_infra::InMemoryPostRepository;

#[cfg(feature = "postgres")]
use folio_infra::{DatabaseConfig, PostgresPostRepository};
#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};

use crate::config::AppConfig;

/// Shared application state.
///
/// Holds the single long-lived repository handle; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

/// Failures while building the state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[cfg(feature = "postgres")]
    #[error("Database initialization failed: {0}")]
    Database(#[from] migration::DbErr),
}

impl AppState {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Build the application state with the repository the config asks for.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let posts: Arc<dyn PostRepository> = match &config.database {
            #[cfg(feature = "postgres")]
            Some(db_config) => postgres_repository(db_config, config.auto_migrate).await?,
            #[cfg(not(feature = "postgres"))]
            Some(_) => {
                tracing::warn!(
                    "DATABASE_URL set but the postgres feature is disabled. Using in-memory repository."
                );
                Arc::new(InMemoryPostRepository::new())
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryPostRepository::new())
            }
        };

        tracing::info!("Application state initialized");

        Ok(Self::new(posts))
    }
}

#[cfg(feature = "postgres")]
async fn postgres_repository(
    config: &DatabaseConfig,
    auto_migrate: bool,
) -> Result<Arc<dyn PostRepository>, StartupError> {
    let conn = folio_infra::connect(config).await?;

    if auto_migrate {
        tracing::info!("Applying pending migrations");
        Migrator::up(&conn, None).await?;
    }

    Ok(Arc::new(PostgresPostRepository::new(conn)))
}
