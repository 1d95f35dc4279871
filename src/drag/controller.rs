//! Translating drag lifecycle events into board mutations
//!
//! Task hovers commit to the board immediately: reassignment and
//! repositioning happen on every `Over` event. Column reordering waits for
//! the drop. Dropping outside any target therefore abandons a column drag,
//! while a task drag keeps its last hover position unless the controller
//! runs with [`CancelPolicy::Revert`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{BoardModel, BoardState, Column, Id, Task};

use super::payload::{DragEvent, DragPayload};
use super::session::DragSession;

/// What happens to hover-time task changes when a drag ends without a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Keep whatever the last hover committed
    #[default]
    Keep,
    /// Put the dragged task back where the drag started
    Revert,
}

impl CancelPolicy {
    pub fn as_str(&self) -> &str {
        match self {
            CancelPolicy::Keep => "keep",
            CancelPolicy::Revert => "revert",
        }
    }
}

/// Where a dragged task sat when its drag started
#[derive(Debug, Clone, PartialEq, Eq)]
struct TaskOrigin {
    column_id: Id,
    index: usize,
}

/// Owns the board and the current drag session
pub struct DragController {
    board: BoardModel,
    session: DragSession,
    cancel_policy: CancelPolicy,
    /// Recorded at task drag start, only under `Revert`
    origin: Option<TaskOrigin>,
}

impl DragController {
    pub fn new(board: BoardModel) -> Self {
        Self {
            board,
            session: DragSession::Idle,
            cancel_policy: CancelPolicy::default(),
            origin: None,
        }
    }

    pub fn with_cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.cancel_policy = policy;
        self
    }

    pub fn board(&self) -> &BoardModel {
        &self.board
    }

    /// Mutable access for the create/delete/rename/update entry points
    pub fn board_mut(&mut self) -> &mut BoardModel {
        &mut self.board
    }

    pub fn state(&self) -> &BoardState {
        self.board.state()
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn cancel_policy(&self) -> CancelPolicy {
        self.cancel_policy
    }

    /// Column being dragged, read from the board
    pub fn active_column(&self) -> Option<&Column> {
        match &self.session {
            DragSession::DraggingColumn(id) => self.board.state().column(id),
            _ => None,
        }
    }

    /// Task being dragged, read from the board
    pub fn active_task(&self) -> Option<&Task> {
        match &self.session {
            DragSession::DraggingTask(id) => self.board.state().task(id),
            _ => None,
        }
    }

    /// Routes an event to its handler
    pub fn dispatch(&mut self, event: &DragEvent) {
        match event {
            DragEvent::Start { active } => self.on_drag_start(active),
            DragEvent::Over { active, over } => self.on_drag_over(active, over.as_ref()),
            DragEvent::End { active, over } => self.on_drag_end(active, over.as_ref()),
            DragEvent::Cancel { active } => self.on_drag_cancel(active),
        }
    }

    pub fn on_drag_start(&mut self, active: &DragPayload) {
        if !self.session.is_idle() {
            warn!(previous = ?self.session, "drag started while another was active");
        }
        self.session = DragSession::start(active);
        self.origin = match (self.cancel_policy, active) {
            (CancelPolicy::Revert, DragPayload::Task { task }) => {
                let state = self.board.state();
                state.task(&task.id).zip(state.task_index(&task.id)).map(|(task, index)| {
                    TaskOrigin {
                        column_id: task.column_id.clone(),
                        index,
                    }
                })
            }
            _ => None,
        };
        debug!(session = ?self.session, "drag start");
    }

    /// Hover handling; only task drags act here
    pub fn on_drag_over(&mut self, active: &DragPayload, over: Option<&DragPayload>) {
        let Some(over) = over else {
            return;
        };
        if active.id() == over.id() {
            return;
        }

        match (active, over) {
            (DragPayload::Task { task: active }, DragPayload::Task { task: over }) => {
                debug!(active = %active.id, over = %over.id, "task over task");
                self.board.move_task_over_task(&active.id, &over.id);
            }
            (DragPayload::Task { task }, DragPayload::Column { column }) => {
                debug!(active = %task.id, over = %column.id, "task over column");
                self.board.move_task_to_column(&task.id, &column.id);
            }
            (DragPayload::Column { .. }, _) => {}
        }
    }

    /// Drop handling; always returns the session to idle
    pub fn on_drag_end(&mut self, active: &Id, over: Option<&Id>) {
        let ended = std::mem::take(&mut self.session);
        let origin = self.origin.take();
        debug!(%active, over = ?over, "drag end");

        let Some(over) = over else {
            if let (Some(origin), DragSession::DraggingTask(task)) = (origin, &ended) {
                debug!(
                    %task,
                    column = %origin.column_id,
                    index = origin.index,
                    "returning task after cancelled drag"
                );
                self.board.place_task(task, &origin.column_id, origin.index);
            }
            return;
        };
        if active == over {
            return;
        }

        self.board.move_column(active, over);
    }

    /// Cancellation is a drop without a target
    pub fn on_drag_cancel(&mut self, active: &Id) {
        self.on_drag_end(active, None);
    }
}
