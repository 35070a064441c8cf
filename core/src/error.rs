//! Error type for the Remote Sync Client.
//!
//! # Design
//! There is a single failure kind. Transport failures, non-2xx statuses and
//! payload problems are separate variants only so logs carry detail; the
//! store reacts to all of them the same way.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// The request never produced a response (connection refused, reset...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("decoding response failed: {0}")]
    Decode(String),

    /// The request payload could not be encoded.
    #[error("encoding request failed: {0}")]
    Encode(String),
}
