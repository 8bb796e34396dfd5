//! Domain entities - the core business objects.

mod post;
mod user;

pub use post::{NewPost, Post, PostAuthor, PostDraft, PostPatch};
pub use user::User;
