//! Interactive board for dragboard
//!
//! Columns and task cards are drawn with ratatui. Mouse drags are turned
//! into drag events and fed to the same controller the `replay` command
//! drives.

mod app;
mod event;
mod gesture;
mod layout;
mod ui;
mod views;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};
use tracing::info;

use crate::config::Config;
use app::App;
use event::EventHandler;

/// Launch the TUI
pub fn run(config: &Config, seed: bool) -> Result<()> {
    info!(seed, "starting TUI");

    let mut app = App::new(config, seed);
    let mut terminal = ui::init_terminal()?;
    let event_handler = EventHandler::new(config.ui.tick_rate_ms);

    // Restores the terminal even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
