//! Extractors resolving the `{id}` path segment to a post.
//!
//! `LookedUpPost` validates the id and loads the post. `AuthorizedPost`
//! additionally requires an authenticated owner, checking authentication
//! before the store is touched.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;

use quill_core::domain::Post;
use quill_core::service::OwnedPost;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppError;
use crate::state::AppState;

/// A post resolved from the request path.
#[derive(Debug)]
pub struct LookedUpPost(pub Post);

/// A post resolved from the request path and owned by the requester.
#[derive(Debug)]
pub struct AuthorizedPost(pub OwnedPost);

async fn lookup(req: &HttpRequest) -> Result<Post, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("Server configuration error".to_string()))?;
    let raw_id = req.match_info().get("id").unwrap_or_default();

    Ok(state.posts.lookup(raw_id).await?)
}

impl FromRequest for LookedUpPost {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { lookup(&req).await.map(LookedUpPost) })
    }
}

impl FromRequest for AuthorizedPost {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let identity = Identity::authenticate(&req)?;
            let post = lookup(&req).await?;
            let owned = OwnedPost::authorize(post, identity.user_id)?;
            Ok(AuthorizedPost(owned))
        })
    }
}
