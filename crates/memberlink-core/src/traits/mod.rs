//! Core traits for directory and collaborator behavior.

mod avatar;
mod directory;
mod forum;

pub use avatar::AvatarProvider;
pub use directory::UserDirectory;
pub use forum::{Forum, ForumUser};
