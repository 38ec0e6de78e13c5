//! memberlink-core - Core types and traits for forum-to-CRM profile sync.

pub mod attributes;
pub mod error;
pub mod listing;
pub mod traits;
pub mod types;
pub mod user;

pub use attributes::{AttributeMap, AttributeValue};
pub use error::Error;
pub use listing::{BurstSpan, PagingSection, UserListing, burst_spans};
pub use traits::{AvatarProvider, Forum, ForumUser, UserDirectory};
pub use types::ApiUrl;
pub use user::{DirectoryUser, ViewQuery};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
