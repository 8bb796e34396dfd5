use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Returns `RepoError::NotFound` when nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Constraints for listing posts. `None` imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Post must carry this tag.
    pub tag: Option<String>,
    /// Post author's username must equal this.
    pub username: Option<String>,
}

impl PostFilter {
    /// Build a filter, treating empty strings as absent.
    pub fn new(tag: Option<String>, username: Option<String>) -> Self {
        Self {
            tag: tag.filter(|t| !t.is_empty()),
            username: username.filter(|u| !u.is_empty()),
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        let tag_ok = self
            .tag
            .as_ref()
            .is_none_or(|tag| post.tags.iter().any(|t| t == tag));
        let user_ok = self
            .username
            .as_ref()
            .is_none_or(|username| &post.user.username == username);
        tag_ok && user_ok
    }
}

/// Offset window into a sorted listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u64,
}

/// Fields written by a partial post update. `image` is always rewritten.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image: String,
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts matching `filter`, newest (highest id) first.
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepoError>;

    /// Number of posts matching `filter`.
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;

    /// Apply `changes` to the post with `id`. `None` if it does not exist.
    async fn update_fields(
        &self,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Option<Post>, RepoError>;

    /// Atomically add one to the view counter. `None` if the post does not exist.
    async fn record_view(&self, id: Uuid) -> Result<Option<Post>, RepoError>;
}
