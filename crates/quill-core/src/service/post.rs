//! Post use cases: write, list, lookup, read, update, remove.

use std::sync::Arc;

use uuid::Uuid;

use crate::content::{ThumbnailExtractor, excerpt};
use crate::domain::{Post, PostAuthor, PostDraft, PostPatch};
use crate::error::{DomainError, RepoError};
use crate::ports::{HtmlSanitizer, PageRequest, PostChanges, PostFilter, PostRepository};

/// Posts per listing page.
pub const PAGE_SIZE: u64 = 20;

/// Listing request as received from the client.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// 1-based page number, defaults to 1.
    pub page: Option<i64>,
    pub tag: Option<String>,
    pub username: Option<String>,
}

/// One page of post summaries. Bodies are excerpts.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub last_page: u64,
}

/// A post whose ownership by the requester has been verified.
///
/// Only [`OwnedPost::authorize`] creates one, so the mutating operations
/// cannot run without the ownership check.
#[derive(Debug, Clone)]
pub struct OwnedPost(Post);

impl OwnedPost {
    pub fn authorize(post: Post, requester_id: Uuid) -> Result<Self, DomainError> {
        if !post.is_owned_by(requester_id) {
            return Err(DomainError::Forbidden);
        }
        Ok(Self(post))
    }

    pub fn post(&self) -> &Post {
        &self.0
    }

    pub fn into_inner(self) -> Post {
        self.0
    }
}

/// Orchestrates validation, sanitization and persistence of posts.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    sanitizer: Arc<dyn HtmlSanitizer>,
    thumbnails: ThumbnailExtractor,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        sanitizer: Arc<dyn HtmlSanitizer>,
        thumbnails: ThumbnailExtractor,
    ) -> Self {
        Self {
            posts,
            sanitizer,
            thumbnails,
        }
    }

    /// Create a post owned by `author`.
    pub async fn write(&self, author: PostAuthor, draft: PostDraft) -> Result<Post, DomainError> {
        let input = draft.validate()?;

        let body = self.sanitizer.sanitize_body(&input.body);
        let image = self.thumbnails.extract(&body);
        let post = Post::new(author, input.title, body, image, input.tags);

        Ok(self.posts.save(post).await?)
    }

    /// Newest-first page of posts with excerpted bodies.
    pub async fn list(&self, query: ListQuery) -> Result<PostPage, DomainError> {
        let page = query.page.unwrap_or(1);
        if page < 1 {
            return Err(DomainError::Validation(
                "page must be a positive integer".to_string(),
            ));
        }

        let filter = PostFilter::new(query.tag, query.username);
        let total = self.posts.count(&filter).await?;
        let last_page = total.div_ceil(PAGE_SIZE);

        // Stores take signed offsets; anything past i64::MAX is an empty page.
        let offset = (page as u64 - 1)
            .checked_mul(PAGE_SIZE)
            .filter(|offset| *offset <= i64::MAX as u64);
        let Some(offset) = offset else {
            return Ok(PostPage {
                posts: Vec::new(),
                last_page,
            });
        };

        let window = PageRequest {
            offset,
            limit: PAGE_SIZE,
        };
        let posts = self.posts.find_page(&filter, window).await?;

        let posts = posts
            .into_iter()
            .map(|mut post| {
                post.body = excerpt(&self.sanitizer.paragraphs_only(&post.body));
                post
            })
            .collect();

        Ok(PostPage { posts, last_page })
    }

    /// Resolve a raw path id to a stored post.
    ///
    /// Malformed ids are rejected before the store is queried.
    pub async fn lookup(&self, raw_id: &str) -> Result<Post, DomainError> {
        let id = Uuid::parse_str(raw_id)
            .map_err(|_| DomainError::InvalidId(raw_id.to_string()))?;

        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::post_not_found(id))
    }

    /// Count a view of `post` and return the updated entity.
    pub async fn read(&self, post: Post) -> Result<Post, DomainError> {
        self.posts
            .record_view(post.id)
            .await?
            .ok_or(DomainError::post_not_found(post.id))
    }

    /// Apply `patch` to an owned post.
    ///
    /// The image is recomputed on every update, from the new body when one is
    /// supplied and from the stored body otherwise.
    pub async fn update(&self, owned: OwnedPost, patch: PostPatch) -> Result<Post, DomainError> {
        patch.validate()?;

        let current = owned.into_inner();
        let body = patch.body.map(|body| self.sanitizer.sanitize_body(&body));
        let image = self
            .thumbnails
            .extract(body.as_deref().unwrap_or(&current.body));

        let changes = PostChanges {
            title: patch.title,
            body,
            tags: patch.tags,
            image,
        };

        self.posts
            .update_fields(current.id, changes)
            .await?
            .ok_or(DomainError::post_not_found(current.id))
    }

    /// Delete an owned post. A post already gone counts as deleted.
    pub async fn remove(&self, owned: OwnedPost) -> Result<(), DomainError> {
        match self.posts.delete(owned.post().id).await {
            Ok(()) | Err(RepoError::NotFound) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
