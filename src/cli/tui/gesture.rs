//! Mouse gesture recognition
//!
//! Turns raw press/drag/release positions into [`DragEvent`]s. A press only
//! becomes a drag once the pointer has travelled `activation_distance`
//! cells, so plain clicks still select. Columns are grabbed by their
//! header, tasks by their card. `Over` is emitted when the hovered entity
//! changes, not on every mouse move.

use crate::domain::{BoardState, Id};
use crate::drag::{DragEvent, DragPayload};

use super::layout::{BoardLayout, Hit};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Pointer {
    #[default]
    Released,
    Pressed {
        origin: (u16, u16),
        grab: Option<Id>,
    },
    Dragging {
        active: Id,
        last_over: Option<Id>,
    },
}

/// Outcome of releasing the mouse button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Release {
    /// Button went up without a drag
    Click(Option<Hit>),
    /// A drag finished
    Drop(DragEvent),
    /// No press was in progress
    Ignored,
}

#[derive(Debug, Clone)]
pub struct PointerTracker {
    state: Pointer,
    activation_distance: u16,
}

impl PointerTracker {
    pub fn new(activation_distance: u16) -> Self {
        Self {
            state: Pointer::Released,
            activation_distance,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, Pointer::Dragging { .. })
    }

    pub fn press(&mut self, x: u16, y: u16, layout: &BoardLayout) {
        let grab = match layout.hit_test(x, y) {
            Some(Hit::Header(id)) | Some(Hit::Card(id)) => Some(id),
            _ => None,
        };
        self.state = Pointer::Pressed {
            origin: (x, y),
            grab,
        };
    }

    pub fn drag_to(
        &mut self,
        x: u16,
        y: u16,
        layout: &BoardLayout,
        board: &BoardState,
    ) -> Vec<DragEvent> {
        let mut events = Vec::new();

        if let Pointer::Pressed { origin, grab } = &self.state {
            let travelled = origin.0.abs_diff(x).max(origin.1.abs_diff(y));
            if travelled < self.activation_distance {
                return events;
            }
            let Some(active) = grab.as_ref().and_then(|id| DragPayload::resolve(board, id))
            else {
                self.state = Pointer::Released;
                return events;
            };
            self.state = Pointer::Dragging {
                active: active.id().clone(),
                last_over: None,
            };
            events.push(DragEvent::Start { active });
        }

        if let Pointer::Dragging { active, last_over } = &mut self.state {
            let over = layout.hit_test(x, y).map(|hit| hit.id().clone());
            if over != *last_over {
                *last_over = over.clone();
                if let Some(active) = DragPayload::resolve(board, active) {
                    let over = over.and_then(|id| DragPayload::resolve(board, &id));
                    events.push(DragEvent::Over { active, over });
                }
            }
        }

        events
    }

    pub fn release(&mut self, x: u16, y: u16, layout: &BoardLayout) -> Release {
        match std::mem::take(&mut self.state) {
            Pointer::Released => Release::Ignored,
            Pointer::Pressed { .. } => Release::Click(layout.hit_test(x, y)),
            Pointer::Dragging { active, .. } => Release::Drop(DragEvent::End {
                active,
                over: layout.hit_test(x, y).map(|hit| hit.id().clone()),
            }),
        }
    }

    /// Aborts the current gesture; yields a cancel event if a drag was active
    pub fn cancel(&mut self) -> Option<DragEvent> {
        match std::mem::take(&mut self.state) {
            Pointer::Dragging { active, .. } => Some(DragEvent::Cancel { active }),
            _ => None,
        }
    }
}
