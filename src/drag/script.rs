//! Scripted dispatcher
//!
//! A script is a JSON array of steps. Board steps call the CRUD entry
//! points; drag steps name entities by ID and are resolved into payloads
//! against the board at the moment they run, the way a pointer dispatcher
//! resolves whatever is under the cursor.
//!
//! ```json
//! [
//!   {"op": "add_column", "title": "Todo"},
//!   {"op": "add_column"},
//!   {"op": "drag_start", "active": "c1"},
//!   {"op": "drag_end", "active": "c1", "over": "c2"}
//! ]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::domain::Id;

use super::controller::DragController;
use super::payload::DragPayload;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One scripted action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    AddColumn {
        #[serde(default)]
        title: Option<String>,
    },
    RemoveColumn {
        id: Id,
    },
    RenameColumn {
        id: Id,
        title: String,
    },
    AddTask {
        column: Id,
    },
    RemoveTask {
        id: Id,
    },
    UpdateTask {
        id: Id,
        content: String,
    },
    DragStart {
        active: Id,
    },
    DragOver {
        active: Id,
        #[serde(default)]
        over: Option<Id>,
    },
    DragEnd {
        active: Id,
        #[serde(default)]
        over: Option<Id>,
    },
    DragCancel {
        active: Id,
    },
}

/// Ordered list of steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}

/// Counts reported after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub applied: usize,
    pub skipped: usize,
}

/// Runs every step of a script against a controller
pub fn run(controller: &mut DragController, script: &Script) -> RunSummary {
    let mut summary = RunSummary::default();
    for (index, step) in script.steps.iter().enumerate() {
        if apply(controller, step) {
            summary.applied += 1;
        } else {
            warn!(step = index, ?step, "skipping step: active entity not on the board");
            summary.skipped += 1;
        }
    }
    summary
}

/// Applies one step; returns false when a drag step names an unknown active entity
pub fn apply(controller: &mut DragController, step: &ScriptStep) -> bool {
    match step {
        ScriptStep::AddColumn { title } => {
            let board = controller.board_mut();
            match title {
                Some(title) => board.create_column_titled(title.clone()),
                None => board.create_column(),
            };
        }
        ScriptStep::RemoveColumn { id } => controller.board_mut().delete_column(id),
        ScriptStep::RenameColumn { id, title } => controller.board_mut().rename_column(id, title),
        ScriptStep::AddTask { column } => {
            controller.board_mut().create_task(column);
        }
        ScriptStep::RemoveTask { id } => controller.board_mut().delete_task(id),
        ScriptStep::UpdateTask { id, content } => controller.board_mut().update_task(id, content),
        ScriptStep::DragStart { active } => {
            let Some(active) = DragPayload::resolve(controller.state(), active) else {
                return false;
            };
            controller.on_drag_start(&active);
        }
        ScriptStep::DragOver { active, over } => {
            let Some(active) = DragPayload::resolve(controller.state(), active) else {
                return false;
            };
            let over = over
                .as_ref()
                .and_then(|over| DragPayload::resolve(controller.state(), over));
            controller.on_drag_over(&active, over.as_ref());
        }
        ScriptStep::DragEnd { active, over } => {
            let over = over
                .as_ref()
                .filter(|over| DragPayload::resolve(controller.state(), over).is_some());
            controller.on_drag_end(active, over);
        }
        ScriptStep::DragCancel { active } => controller.on_drag_cancel(active),
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoardModel, SequentialIdGenerator};

    fn controller() -> DragController {
        DragController::new(BoardModel::new(Box::new(SequentialIdGenerator::new())))
    }

    #[test]
    fn parse_steps() {
        let script = Script::from_json(
            r#"[
                {"op": "add_column", "title": "Todo"},
                {"op": "add_column"},
                {"op": "drag_over", "active": "t1"},
                {"op": "drag_end", "active": "c1", "over": "c2"}
            ]"#,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 4);
        assert_eq!(
            script.steps[0],
            ScriptStep::AddColumn { title: Some("Todo".to_string()) }
        );
        assert_eq!(script.steps[1], ScriptStep::AddColumn { title: None });
        assert_eq!(
            script.steps[2],
            ScriptStep::DragOver { active: "t1".parse().unwrap(), over: None }
        );
    }

    #[test]
    fn parse_rejects_unknown_op() {
        let err = Script::from_json(r#"[{"op": "undo"}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn parse_rejects_empty_id() {
        assert!(Script::from_json(r#"[{"op": "remove_task", "id": ""}]"#).is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Script::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
    }

    #[test]
    fn run_reorders_columns() {
        let script = Script::from_json(
            r#"[
                {"op": "add_column"},
                {"op": "add_column"},
                {"op": "drag_start", "active": "c1"},
                {"op": "drag_over", "active": "c1", "over": "c2"},
                {"op": "drag_end", "active": "c1", "over": "c2"}
            ]"#,
        )
        .unwrap();

        let mut ctl = controller();
        let summary = run(&mut ctl, &script);

        assert_eq!(summary, RunSummary { applied: 5, skipped: 0 });
        let order: Vec<_> = ctl.state().columns().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["c2", "c1"]);
        assert!(ctl.session().is_idle());
    }

    #[test]
    fn run_skips_unknown_active() {
        let script = Script::from_json(
            r#"[
                {"op": "add_column"},
                {"op": "drag_start", "active": "t9"},
                {"op": "drag_over", "active": "t9", "over": "c1"}
            ]"#,
        )
        .unwrap();

        let mut ctl = controller();
        let summary = run(&mut ctl, &script);
        assert_eq!(summary, RunSummary { applied: 1, skipped: 2 });
    }

    #[test]
    fn unknown_over_is_treated_as_no_target() {
        let script = Script::from_json(
            r#"[
                {"op": "add_column"},
                {"op": "add_column"},
                {"op": "drag_start", "active": "c1"},
                {"op": "drag_end", "active": "c1", "over": "c7"}
            ]"#,
        )
        .unwrap();

        let mut ctl = controller();
        run(&mut ctl, &script);
        let order: Vec<_> = ctl.state().columns().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["c1", "c2"]);
        assert!(ctl.session().is_idle());
    }
}
