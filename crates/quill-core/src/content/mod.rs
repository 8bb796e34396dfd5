//! Pure helpers deriving presentation data from post bodies.

mod excerpt;
mod thumbnail;

pub use excerpt::{ELLIPSIS, EXCERPT_LENGTH, excerpt};
pub use thumbnail::{FALLBACK_IMAGES, ThumbnailExtractor};
