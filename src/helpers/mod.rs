//! Helper functions shared by page compositors and templates

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
