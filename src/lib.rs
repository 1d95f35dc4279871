//! dragboard - a kanban board with drag-and-drop reordering
//!
//! Columns and tasks are kept in two flat ordered lists. A drag session
//! moves tasks live while the pointer hovers and commits column moves on
//! drop. The same controller drives the interactive TUI and scripted
//! replays.

pub mod domain;
pub mod drag;
pub mod config;
pub mod logging;
pub mod cli;

pub use domain::{BoardModel, BoardState, Column, Id, IdGenerator, Task};
pub use drag::{CancelPolicy, DragController, DragEvent, DragPayload, DragSession};
