//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::content::ThumbnailExtractor;
use quill_core::ports::{
    HtmlSanitizer, ImageStore, PasswordService, PostRepository, TokenService, UserRepository,
};
use quill_core::service::PostService;
use quill_infra::{
    AmmoniaSanitizer, Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository,
    JwtTokenService, LocalImageStore,
};

#[cfg(feature = "postgres")]
use quill_infra::database::{PostgresPostRepository, PostgresUserRepository};
#[cfg(feature = "postgres")]
use quill_infra::{DatabaseConfig, DatabaseConnections};

use crate::config::{AppConfig, UploadConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub images: Arc<dyn ImageStore>,
    pub upload: UploadConfig,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state, on PostgreSQL when it is configured and
    /// reachable, in memory otherwise.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let (db, post_repo, user_repo) = connect(config.database.as_ref()).await;

        #[cfg(not(feature = "postgres"))]
        let (post_repo, user_repo) = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            in_memory()
        };

        #[cfg_attr(not(feature = "postgres"), allow(unused_mut))]
        let mut state = Self::with_repositories(config, post_repo, user_repo);
        #[cfg(feature = "postgres")]
        {
            state.db = db;
        }

        tracing::info!("Application state initialized");
        state
    }

    /// Wire services around the given repositories.
    pub fn with_repositories(
        config: &AppConfig,
        post_repo: Arc<dyn PostRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        let sanitizer: Arc<dyn HtmlSanitizer> = Arc::new(AmmoniaSanitizer::new());
        let thumbnails = ThumbnailExtractor::new(config.thumbnail_base_url.clone());

        Self {
            posts: Arc::new(PostService::new(post_repo, sanitizer, thumbnails)),
            users: user_repo,
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            passwords: Arc::new(Argon2PasswordService::new()),
            images: Arc::new(LocalImageStore::new(config.upload.dir.clone())),
            upload: config.upload.clone(),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}

fn in_memory() -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>) {
    (
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
    )
}

#[cfg(feature = "postgres")]
async fn connect(
    config: Option<&DatabaseConfig>,
) -> (
    Option<Arc<DatabaseConnections>>,
    Arc<dyn PostRepository>,
    Arc<dyn UserRepository>,
) {
    let Some(config) = config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        let (posts, users) = in_memory();
        return (None, posts, users);
    };

    match DatabaseConnections::init(config).await {
        Ok(connections) => {
            let conn = Arc::new(connections);
            let posts = Arc::new(PostgresPostRepository::new(conn.main.clone()));
            let users = Arc::new(PostgresUserRepository::new(conn.main.clone()));
            (Some(conn), posts, users)
        }
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            let (posts, users) = in_memory();
            (None, posts, users)
        }
    }
}
