//! Domain models for the board
//!
//! Contains the board state and its transitions without any I/O concerns.

mod id;
mod column;
mod task;
mod reorder;
mod board;

pub use id::{EntityKind, HashIdGenerator, Id, IdError, IdGenerator, SequentialIdGenerator};
pub use column::Column;
pub use task::Task;
pub use reorder::move_item;
pub use board::{BoardModel, BoardState};
