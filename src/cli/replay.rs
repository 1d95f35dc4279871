//! `replay` command: run a drag script and print the resulting board

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::output::Output;
use crate::config::{Config, IdStrategy};
use crate::domain::{BoardModel, BoardState};
use crate::drag::{script, DragController, RunSummary, Script};

/// Runs the script at `path` against an empty board
pub fn run(output: &Output, config: &Config, path: &Path, ids: Option<IdStrategy>) -> Result<()> {
    let script = Script::load(path)
        .with_context(|| format!("Failed to load script: {}", path.display()))?;
    let strategy = ids.unwrap_or(config.ids.strategy);
    debug!(steps = script.steps.len(), ids = strategy.as_str(), "replaying script");

    let board = BoardModel::new(strategy.generator());
    let mut controller =
        DragController::new(board).with_cancel_policy(config.drag.cancel_policy);
    let summary = script::run(&mut controller, &script);
    info!(applied = summary.applied, skipped = summary.skipped, "replay finished");

    if output.is_json() {
        output.data(&serde_json::json!({
            "board": controller.state(),
            "summary": summary,
        }));
    } else {
        print!("{}", render_board(controller.state()));
        output.success(&summary_line(&summary));
    }

    Ok(())
}

/// Text rendering: one block per column, tasks indented beneath
fn render_board(state: &BoardState) -> String {
    let mut out = String::new();
    if state.columns().is_empty() {
        out.push_str("(no columns)\n");
    }
    for column in state.columns() {
        out.push_str(&format!("{} ({})\n", column.title, column.id));
        let mut empty = true;
        for task in state.tasks_in(&column.id) {
            out.push_str(&format!("  - {} ({})\n", task.content, task.id));
            empty = false;
        }
        if empty {
            out.push_str("  (empty)\n");
        }
    }
    out
}

fn summary_line(summary: &RunSummary) -> String {
    format!(
        "Applied {} step(s), skipped {}",
        summary.applied, summary.skipped
    )
}
