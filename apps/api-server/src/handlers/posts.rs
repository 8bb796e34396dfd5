//! Post handlers.

use actix_web::{HttpResponse, web};
use chrono::SecondsFormat;

use quill_core::domain::{Post, PostDraft, PostPatch};
use quill_core::service::ListQuery;
use quill_shared::dto::{
    CreatePostRequest, ListPostsQuery, PostResponse, UpdatePostRequest, UserResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::middleware::post_access::{AuthorizedPost, LookedUpPost};
use crate::state::AppState;

/// Header carrying the number of the last listing page.
pub const LAST_PAGE_HEADER: &str = "Last-Page";

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        body: post.body,
        image: post.image,
        tags: post.tags,
        published_date: post
            .published_date
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        count: post.count,
        user: UserResponse {
            id: post.user.id.to_string(),
            username: post.user.username,
        },
    }
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = state
        .posts
        .list(ListQuery {
            page: query.page,
            tag: query.tag,
            username: query.username,
        })
        .await?;

    let posts: Vec<PostResponse> = page.posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok()
        .insert_header((LAST_PAGE_HEADER, page.last_page.to_string()))
        .json(posts))
}

/// POST /api/posts
pub async fn write(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = PostDraft {
        title: req.title,
        body: req.body,
        tags: req.tags,
    };

    let post = state.posts.write(identity.author(), draft).await?;
    tracing::info!(post_id = %post.id, username = %identity.username, "Post written");

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// GET /api/posts/{id}
pub async fn read(
    state: web::Data<AppState>,
    LookedUpPost(post): LookedUpPost,
) -> AppResult<HttpResponse> {
    let post = state.posts.read(post).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PATCH /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    AuthorizedPost(owned): AuthorizedPost,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let patch = PostPatch {
        title: req.title,
        body: req.body,
        tags: req.tags,
    };

    let post = state.posts.update(owned, patch).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    AuthorizedPost(owned): AuthorizedPost,
) -> AppResult<HttpResponse> {
    let id = owned.post().id;
    state.posts.remove(owned).await?;
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
