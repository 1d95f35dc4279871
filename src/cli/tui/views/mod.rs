//! View rendering for the TUI

pub mod board;
