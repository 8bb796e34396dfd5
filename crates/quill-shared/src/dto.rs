//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// A user's public information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

/// Body of `POST /posts`. Every field is required; presence is checked
/// server-side so a missing field yields a validation problem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Body of `PATCH /posts/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Query string of `GET /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub page: Option<i64>,
    pub tag: Option<String>,
    pub username: Option<String>,
}

/// A post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub image: String,
    pub tags: Vec<String>,
    pub published_date: String,
    pub count: i64,
    pub user: UserResponse,
}

/// Response to an image upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_response_uses_camel_case() {
        let post = PostResponse {
            id: "1".into(),
            title: "t".into(),
            body: "b".into(),
            image: "i".into(),
            tags: vec!["x".into()],
            published_date: "2024-01-01T00:00:00Z".into(),
            count: 3,
            user: UserResponse {
                id: "u".into(),
                username: "alice".into(),
            },
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["publishedDate"], "2024-01-01T00:00:00Z");
        assert_eq!(json["user"]["username"], "alice");
    }

    #[test]
    fn test_create_request_tolerates_missing_fields() {
        let req: CreatePostRequest = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("t"));
        assert!(req.tags.is_none());
    }

    #[test]
    fn test_create_request_rejects_non_string_tags() {
        let req = serde_json::from_str::<CreatePostRequest>(r#"{"tags":[1,2]}"#);
        assert!(req.is_err());
    }
}
