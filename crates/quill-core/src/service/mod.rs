//! Application services built on the ports.

mod post;
mod upload;

pub use post::{ListQuery, OwnedPost, PAGE_SIZE, PostPage, PostService};
pub use upload::{IMAGE_EXTENSIONS, upload_filename};
