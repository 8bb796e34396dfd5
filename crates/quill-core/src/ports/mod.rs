//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod sanitizer;
mod storage;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use repository::{
    BaseRepository, PageRequest, PostChanges, PostFilter, PostRepository, UserRepository,
};
pub use sanitizer::HtmlSanitizer;
pub use storage::ImageStore;
