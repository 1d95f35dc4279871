//! Drag-and-drop reconciliation
//!
//! A dispatcher (the TUI, or a script) emits [`DragEvent`]s tagged with
//! [`DragPayload`]s. The [`DragController`] tracks the active entity in a
//! [`DragSession`] and turns each event into board mutations.

mod payload;
mod session;
mod controller;
pub mod script;

pub use payload::{DragEvent, DragPayload};
pub use session::DragSession;
pub use controller::{CancelPolicy, DragController};
pub use script::{RunSummary, Script, ScriptError, ScriptStep};
