//! Drag session state machine
//!
//! A session only remembers which entity is active. The entity itself is
//! always read from the board, so the two cannot drift apart.

use crate::domain::{EntityKind, Id};

use super::payload::DragPayload;

/// Current drag session state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    DraggingColumn(Id),
    DraggingTask(Id),
}

impl DragSession {
    /// Session entered when the given payload starts being dragged
    pub fn start(payload: &DragPayload) -> Self {
        match payload {
            DragPayload::Column { column } => DragSession::DraggingColumn(column.id.clone()),
            DragPayload::Task { task } => DragSession::DraggingTask(task.id.clone()),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragSession::Idle)
    }

    pub fn active_id(&self) -> Option<&Id> {
        match self {
            DragSession::Idle => None,
            DragSession::DraggingColumn(id) | DragSession::DraggingTask(id) => Some(id),
        }
    }

    pub fn active_kind(&self) -> Option<EntityKind> {
        match self {
            DragSession::Idle => None,
            DragSession::DraggingColumn(_) => Some(EntityKind::Column),
            DragSession::DraggingTask(_) => Some(EntityKind::Task),
        }
    }
}
