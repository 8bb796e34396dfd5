//! Authentication extractor.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use uuid::Uuid;

use quill_core::domain::PostAuthor;
use quill_core::ports::{AuthError, TokenClaims};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the access token.
pub const AUTH_COOKIE: &str = "access_token";

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

impl Identity {
    /// The `{id, username}` snapshot embedded in posts this user writes.
    pub fn author(&self) -> PostAuthor {
        PostAuthor {
            id: self.user_id,
            username: self.username.clone(),
        }
    }

    pub(crate) fn authenticate(req: &HttpRequest) -> Result<Self, AppError> {
        let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
            tracing::error!("AppState not found in app data");
            AppError::Internal("Server configuration error".to_string())
        })?;

        let token = bearer_token(req)?
            .or_else(|| req.cookie(AUTH_COOKIE).map(|c| c.value().to_string()))
            .ok_or(AuthError::MissingAuth)?;

        Ok(state.tokens.validate_token(&token)?.into())
    }
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// The token from an `Authorization: Bearer` header, if one was sent.
fn bearer_token(req: &HttpRequest) -> Result<Option<String>, AuthError> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(|token| Some(token.to_string()))
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    use crate::test_support::test_state;

    #[actix_web::test]
    async fn test_bearer_header_and_cookie_are_accepted() {
        let state = test_state();
        let token = state.tokens.generate_token(Uuid::new_v4(), "alice").unwrap();

        let req = TestRequest::default()
            .app_data(web::Data::new(state.clone()))
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_http_request();
        assert_eq!(Identity::authenticate(&req).unwrap().username, "alice");

        let req = TestRequest::default()
            .app_data(web::Data::new(state))
            .cookie(Cookie::new(AUTH_COOKIE, token))
            .to_http_request();
        assert_eq!(Identity::authenticate(&req).unwrap().username, "alice");
    }

    #[actix_web::test]
    async fn test_missing_or_malformed_credentials_are_rejected() {
        let state = test_state();

        let req = TestRequest::default()
            .app_data(web::Data::new(state.clone()))
            .to_http_request();
        assert!(matches!(
            Identity::authenticate(&req),
            Err(AppError::Unauthorized(_))
        ));

        let req = TestRequest::default()
            .app_data(web::Data::new(state))
            .insert_header((header::AUTHORIZATION, "Basic abc"))
            .to_http_request();
        assert!(matches!(
            Identity::authenticate(&req),
            Err(AppError::Unauthorized(_))
        ));
    }
}
