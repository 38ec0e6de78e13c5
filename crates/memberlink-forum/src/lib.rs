//! memberlink-forum - Forum lookup and avatar collaborators.

mod client;
mod gravatar;

pub use client::ForumClient;
pub use gravatar::Gravatar;

use memberlink_core::error::{Error, TransportError};

/// Classify a reqwest error into the transport taxonomy.
pub(crate) fn classify(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout {
            message: err.to_string(),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };

    Error::Transport(transport)
}
