//! Content module - posts, front-matter and markdown rendering

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use error::ContentError;
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::{PostRepository, CONTENT_EXTENSIONS};
pub use markdown::MarkdownRenderer;
pub use post::{sort_newest_first, Dated, Post, PostSummary};
