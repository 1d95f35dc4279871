//! Column domain model
//!
//! A column is a named lane. Its position on the board is its index in
//! the board's column sequence.

use serde::{Deserialize, Serialize};

use super::id::Id;

/// A named lane on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: Id,
    pub title: String,
}

impl Column {
    pub fn new(id: Id, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// Returns a copy with the title replaced
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            title: title.into(),
        }
    }
}
