//! Shared fixtures for handler tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PageRequest, PostChanges, PostFilter, PostRepository};
use quill_infra::{InMemoryPostRepository, InMemoryUserRepository, JwtConfig};

use crate::config::{AppConfig, UploadConfig};
use crate::state::AppState;

fn test_config(upload: UploadConfig) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: None,
        upload,
        thumbnail_base_url: "http://cdn.test/defaults".to_string(),
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "quill-test".to_string(),
        },
    }
}

/// State over empty in-memory repositories.
pub fn test_state() -> AppState {
    test_state_with_upload(UploadConfig {
        dir: std::env::temp_dir().join("quill-test-uploads"),
        ..UploadConfig::default()
    })
}

pub fn test_state_with_upload(upload: UploadConfig) -> AppState {
    AppState::with_repositories(
        &test_config(upload),
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
    )
}

/// State whose post store is `posts`.
pub fn test_state_with_posts(posts: Arc<dyn PostRepository>) -> AppState {
    AppState::with_repositories(
        &test_config(UploadConfig::default()),
        posts,
        Arc::new(InMemoryUserRepository::new()),
    )
}

/// In-memory post store counting every call made to it.
#[derive(Default)]
pub struct CountingPosts {
    inner: InMemoryPostRepository,
    calls: AtomicUsize,
}

impl CountingPosts {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for CountingPosts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.hit();
        self.inner.find_by_id(id).await
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        self.hit();
        self.inner.save(entity).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.hit();
        self.inner.delete(id).await
    }
}

#[async_trait]
impl PostRepository for CountingPosts {
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepoError> {
        self.hit();
        self.inner.find_page(filter, page).await
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        self.hit();
        self.inner.count(filter).await
    }

    async fn update_fields(
        &self,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Option<Post>, RepoError> {
        self.hit();
        self.inner.update_fields(id, changes).await
    }

    async fn record_view(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.hit();
        self.inner.record_view(id).await
    }
}

/// `Authorization` header value for the given account.
pub fn bearer(state: &AppState, user_id: Uuid, username: &str) -> String {
    let token = state.tokens.generate_token(user_id, username).unwrap();
    format!("Bearer {token}")
}
