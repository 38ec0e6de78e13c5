//! Subcommand implementations.

pub mod avatar;
pub mod scan;
pub mod sync;
pub mod view;
