//! Content module - loads posts, derives their metadata, and indexes them

mod error;
mod frontmatter;
mod index;
mod post;
mod reading_time;
mod store;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use index::{sort_newest_first, PostIndex, PostSource};
pub use post::{derive, Post, PostMetadata};
pub use reading_time::{ReadingEstimate, ReadingTime, DEFAULT_WORDS_PER_MINUTE};
pub use store::{slug_of, ContentStore, RawPost};
