//! Task domain model
//!
//! Tasks carry the ID of the column that owns them. Ordering within a
//! column is derived from the board's flat task sequence.

use serde::{Deserialize, Serialize};

use super::id::Id;

/// A card living in exactly one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Id,
    pub column_id: Id,
    pub content: String,
}

impl Task {
    pub fn new(id: Id, column_id: Id, content: impl Into<String>) -> Self {
        Self {
            id,
            column_id,
            content: content.into(),
        }
    }

    /// Returns a copy reassigned to another column
    pub fn in_column(&self, column_id: Id) -> Self {
        Self {
            column_id,
            ..self.clone()
        }
    }

    /// Returns a copy with the content replaced
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
    }

    /// Returns true if this task belongs to the given column
    pub fn is_in(&self, column_id: &Id) -> bool {
        &self.column_id == column_id
    }
}
