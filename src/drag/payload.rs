//! Drag payloads and dispatcher events

use serde::{Deserialize, Serialize};

use crate::domain::{BoardState, Column, EntityKind, Id, Task};

/// Entity attached to a draggable element and echoed back on every event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragPayload {
    Column { column: Column },
    Task { task: Task },
}

impl DragPayload {
    pub fn column(column: Column) -> Self {
        DragPayload::Column { column }
    }

    pub fn task(task: Task) -> Self {
        DragPayload::Task { task }
    }

    pub fn id(&self) -> &Id {
        match self {
            DragPayload::Column { column } => &column.id,
            DragPayload::Task { task } => &task.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            DragPayload::Column { .. } => EntityKind::Column,
            DragPayload::Task { .. } => EntityKind::Task,
        }
    }

    /// Looks up the entity with this ID on the board, columns first
    pub fn resolve(state: &BoardState, id: &Id) -> Option<Self> {
        state
            .column(id)
            .cloned()
            .map(Self::column)
            .or_else(|| state.task(id).cloned().map(Self::task))
    }
}

/// Drag lifecycle events emitted by a dispatcher
///
/// `over` is `None` when the pointer is not above any valid target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start {
        active: DragPayload,
    },
    Over {
        active: DragPayload,
        over: Option<DragPayload>,
    },
    End {
        active: Id,
        over: Option<Id>,
    },
    Cancel {
        active: Id,
    },
}
