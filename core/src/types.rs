//! Domain DTO for the todo API.
//!
//! # Design
//! `TodoItem` mirrors the wire schema exactly (`{"id": ..., "text": ...}`)
//! and is defined independently from the mock-server crate. Integration
//! tests catch any schema drift between the two.

use serde::{Deserialize, Serialize};

/// A single todo item. The id is assigned by the client at creation time
/// and sent to the server as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
}

impl TodoItem {
    /// Build an item, trimming surrounding whitespace from `text`.
    pub fn new(id: impl Into<String>, text: &str) -> Self {
        Self {
            id: id.into(),
            text: text.trim().to_string(),
        }
    }
}
