//! Account handlers.

use actix_web::cookie::{Cookie, time::Duration};
use actix_web::{HttpResponse, HttpResponseBuilder, web};

use quill_core::domain::User;
use quill_core::error::DomainError;
use quill_core::ports::AuthError;
use quill_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use crate::middleware::auth::{AUTH_COOKIE, Identity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

/// Token response plus the matching session cookie.
fn issue_token(
    state: &AppState,
    user: &User,
    mut response: HttpResponseBuilder,
) -> AppResult<HttpResponse> {
    let token = state.tokens.generate_token(user.id, &user.username)?;
    let expires_in = state.tokens.expiration_seconds();

    let cookie = Cookie::build(AUTH_COOKIE, token.clone())
        .path("/")
        .http_only(true)
        .max_age(Duration::seconds(expires_in))
        .finish();

    Ok(response.cookie(cookie).json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: expires_in.max(0) as u64,
        user: UserResponse {
            id: user.id.to_string(),
            username: user.username.clone(),
        },
    }))
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    User::validate_username(&req.username)?;
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    if state.users.find_by_username(&req.username).await?.is_some() {
        let taken = format!("Username {} is already taken", req.username);
        return Err(DomainError::Duplicate(taken).into());
    }

    let password_hash = state.passwords.hash(&req.password)?;
    let user = state.users.save(User::new(req.username, password_hash)).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    issue_token(&state, &user, HttpResponse::Created())
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        return Err(AuthError::InvalidCredentials.into());
    }

    issue_token(&state, &user, HttpResponse::Ok())
}

/// GET /api/auth/check
pub async fn check(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(UserResponse {
        id: identity.user_id.to_string(),
        username: identity.username,
    }))
}

/// POST /api/auth/logout
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(AUTH_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::NoContent().cookie(cookie).finish()
}
