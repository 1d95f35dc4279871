//! dragboard - kanban board with drag-and-drop reordering

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = dragboard::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
