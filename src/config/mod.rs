//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::HomeConfig;
pub use site::SiteConfig;
