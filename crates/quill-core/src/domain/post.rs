use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Snapshot of the account that created a post.
///
/// Copied into the post at creation time; renaming the account later does not
/// rewrite existing posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub id: Uuid,
    pub username: String,
}

/// Post entity - represents a blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub image: String,
    pub tags: Vec<String>,
    pub published_date: DateTime<Utc>,
    pub count: i64,
    pub user: PostAuthor,
}

impl Post {
    /// Create a new post with a time-ordered ID and a zeroed view counter.
    ///
    /// `body` and `image` are expected to be sanitized and derived already.
    pub fn new(
        author: PostAuthor,
        title: String,
        body: String,
        image: String,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            title,
            body,
            image,
            tags,
            published_date: Utc::now(),
            count: 0,
            user: author,
        }
    }

    /// Count one view.
    pub fn record_view(&mut self) {
        if self.count >= 0 {
            self.count += 1;
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user.id == user_id
    }
}

/// Raw create input, as received from the client.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// A create input that passed validation. Body is still unsanitized.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl PostDraft {
    /// Check that every field is present and well-formed.
    pub fn validate(self) -> Result<NewPost, DomainError> {
        let title = self
            .title
            .ok_or_else(|| DomainError::Validation("title is required".to_string()))?;
        let body = self
            .body
            .ok_or_else(|| DomainError::Validation("body is required".to_string()))?;
        let tags = self
            .tags
            .ok_or_else(|| DomainError::Validation("tags is required".to_string()))?;

        validate_title(&title)?;
        validate_tags(&tags)?;

        Ok(NewPost { title, body, tags })
    }
}

/// Partial update. Absent fields keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(tags) = &self.tags {
            validate_tags(tags)?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("title must not be empty".to_string()));
    }
    Ok(())
}

fn validate_tags(tags: &[String]) -> Result<(), DomainError> {
    match tags.iter().find(|tag| tag.contains(['<', '>'])) {
        Some(tag) => Err(DomainError::Validation(format!(
            "tag {tag:?} must be plain text"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> PostAuthor {
        PostAuthor {
            id: Uuid::new_v4(),
            username: "writer".to_string(),
        }
    }

    #[test]
    fn test_new_post_starts_unread() {
        let post = Post::new(
            author(),
            "Title".to_string(),
            "<p>Body</p>".to_string(),
            "<img src=\"a.png\">".to_string(),
            vec!["rust".to_string()],
        );

        assert_eq!(post.count, 0);
        assert_eq!(post.tags, vec!["rust".to_string()]);
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let first = Post::new(author(), "a".into(), "".into(), "".into(), vec![]);
        let second = Post::new(author(), "b".into(), "".into(), "".into(), vec![]);

        assert!(second.id > first.id);
    }

    #[test]
    fn test_record_view_increments() {
        let mut post = Post::new(author(), "a".into(), "".into(), "".into(), vec![]);
        post.record_view();
        post.record_view();
        assert_eq!(post.count, 2);
    }

    #[test]
    fn test_draft_requires_every_field() {
        let missing_tags = PostDraft {
            title: Some("Title".into()),
            body: Some("Body".into()),
            tags: None,
        };
        assert!(matches!(
            missing_tags.validate(),
            Err(DomainError::Validation(msg)) if msg.contains("tags")
        ));

        let missing_title = PostDraft {
            title: None,
            body: Some("Body".into()),
            tags: Some(vec![]),
        };
        assert!(missing_title.validate().is_err());
    }

    #[test]
    fn test_draft_rejects_blank_title() {
        let draft = PostDraft {
            title: Some("   ".into()),
            body: Some("Body".into()),
            tags: Some(vec![]),
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_tags_must_be_plain_text() {
        let patch = PostPatch {
            tags: Some(vec!["ok".into(), "<b>bold</b>".into()]),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_empty_patch_is_valid() {
        assert!(PostPatch::default().validate().is_ok());
    }
}
