//! Board state and its mutations
//!
//! [`BoardState`] holds the ordered columns and one flat, ordered task
//! sequence. Every transition takes the current state by reference and
//! returns a new one; a stale ID turns the transition into a no-op.
//!
//! [`BoardModel`] pairs a state with an [`IdGenerator`] and exposes the
//! create/delete/rename/update entry points used by a UI.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::column::Column;
use super::id::{EntityKind, Id, IdGenerator};
use super::reorder::move_item;
use super::task::Task;

/// Columns in render order plus every task in one flat sequence
///
/// A column's rendered task order is the order of its tasks in `tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    columns: Vec<Column>,
    tasks: Vec<Task>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn column(&self, id: &Id) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn task(&self, id: &Id) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn column_index(&self, id: &Id) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    pub fn task_index(&self, id: &Id) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    /// Tasks of one column, in board order
    pub fn tasks_in<'a>(&'a self, column_id: &Id) -> impl Iterator<Item = &'a Task> + 'a {
        let column_id = column_id.clone();
        self.tasks.iter().filter(move |t| t.is_in(&column_id))
    }

    pub fn task_count(&self, column_id: &Id) -> usize {
        self.tasks_in(column_id).count()
    }

    // ------------------------------------------------------------------
    // Column transitions
    // ------------------------------------------------------------------

    /// Appends a column; an ID already on the board leaves the state unchanged
    pub fn add_column(&self, id: Id, title: impl Into<String>) -> Self {
        if self.column(&id).is_some() {
            warn!(%id, "column id already present, not adding");
            return self.clone();
        }
        let mut columns = self.columns.clone();
        columns.push(Column::new(id, title));
        Self {
            columns,
            tasks: self.tasks.clone(),
        }
    }

    /// Removes a column together with every task it owns
    pub fn remove_column(&self, id: &Id) -> Self {
        Self {
            columns: self.columns.iter().filter(|c| &c.id != id).cloned().collect(),
            tasks: self.tasks.iter().filter(|t| !t.is_in(id)).cloned().collect(),
        }
    }

    pub fn rename_column(&self, id: &Id, title: &str) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .map(|c| if &c.id == id { c.with_title(title) } else { c.clone() })
                .collect(),
            tasks: self.tasks.clone(),
        }
    }

    /// Moves the `active` column to the index currently held by `over`
    pub fn move_column(&self, active: &Id, over: &Id) -> Self {
        match (self.column_index(active), self.column_index(over)) {
            (Some(from), Some(to)) => Self {
                columns: move_item(&self.columns, from, to),
                tasks: self.tasks.clone(),
            },
            _ => {
                debug!(%active, %over, "column move target not found");
                self.clone()
            }
        }
    }

    // ------------------------------------------------------------------
    // Task transitions
    // ------------------------------------------------------------------

    /// Appends a task to the flat sequence
    ///
    /// The owning column is not checked for existence.
    pub fn add_task(&self, id: Id, column_id: Id, content: impl Into<String>) -> Self {
        if self.task(&id).is_some() {
            warn!(%id, "task id already present, not adding");
            return self.clone();
        }
        let mut tasks = self.tasks.clone();
        tasks.push(Task::new(id, column_id, content));
        Self {
            columns: self.columns.clone(),
            tasks,
        }
    }

    pub fn remove_task(&self, id: &Id) -> Self {
        Self {
            columns: self.columns.clone(),
            tasks: self.tasks.iter().filter(|t| &t.id != id).cloned().collect(),
        }
    }

    pub fn update_task_content(&self, id: &Id, content: &str) -> Self {
        Self {
            columns: self.columns.clone(),
            tasks: self
                .tasks
                .iter()
                .map(|t| if &t.id == id { t.with_content(content) } else { t.clone() })
                .collect(),
        }
    }

    /// Hovering task `active` over task `over`
    ///
    /// `active` joins the column of `over` and takes its index in the flat
    /// sequence.
    pub fn move_task_over_task(&self, active: &Id, over: &Id) -> Self {
        let (Some(from), Some(to)) = (self.task_index(active), self.task_index(over)) else {
            debug!(%active, %over, "task hover target not found");
            return self.clone();
        };
        let column_id = self.tasks[to].column_id.clone();
        let mut tasks = self.tasks.clone();
        tasks[from] = tasks[from].in_column(column_id);
        Self {
            columns: self.columns.clone(),
            tasks: move_item(&tasks, from, to),
        }
    }

    /// Hovering task `active` over the body of column `column`
    ///
    /// Only the owning column changes; the task keeps its flat index.
    pub fn move_task_to_column(&self, active: &Id, column: &Id) -> Self {
        let Some(from) = self.task_index(active) else {
            debug!(%active, "hovering task not found");
            return self.clone();
        };
        if self.column(column).is_none() {
            debug!(%column, "hovered column not found");
            return self.clone();
        }
        let mut tasks = self.tasks.clone();
        tasks[from] = tasks[from].in_column(column.clone());
        Self {
            columns: self.columns.clone(),
            tasks: move_item(&tasks, from, from),
        }
    }

    /// Puts task `id` back into `column_id` at flat `index`
    ///
    /// The index is clamped to the current sequence. Nothing changes when the
    /// task or the column is gone.
    pub fn place_task(&self, id: &Id, column_id: &Id, index: usize) -> Self {
        let Some(from) = self.task_index(id) else {
            debug!(%id, "task to place not found");
            return self.clone();
        };
        if self.column(column_id).is_none() {
            debug!(%id, column = %column_id, "original column gone, task stays");
            return self.clone();
        }
        let to = index.min(self.tasks.len() - 1);
        let mut tasks = self.tasks.clone();
        tasks[from] = tasks[from].in_column(column_id.clone());
        Self {
            columns: self.columns.clone(),
            tasks: move_item(&tasks, from, to),
        }
    }
}

/// Board state plus the ID source used for new entities
pub struct BoardModel {
    state: BoardState,
    ids: Box<dyn IdGenerator>,
}

impl BoardModel {
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            state: BoardState::new(),
            ids,
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn columns(&self) -> &[Column] {
        self.state.columns()
    }

    pub fn tasks(&self) -> &[Task] {
        self.state.tasks()
    }

    /// Creates a column titled `Column {n}`, n being the new column count
    pub fn create_column(&mut self) -> Id {
        let title = format!("Column {}", self.state.columns().len() + 1);
        self.create_column_titled(title)
    }

    pub fn create_column_titled(&mut self, title: impl Into<String>) -> Id {
        let id = self.ids.next_id(EntityKind::Column);
        let title = title.into();
        debug!(%id, %title, "creating column");
        self.state = self.state.add_column(id.clone(), title);
        id
    }

    pub fn delete_column(&mut self, id: &Id) {
        debug!(%id, "deleting column");
        self.state = self.state.remove_column(id);
    }

    pub fn rename_column(&mut self, id: &Id, title: &str) {
        debug!(%id, %title, "renaming column");
        self.state = self.state.rename_column(id, title);
    }

    /// Creates a task with content `Task {n}`, n being the new total task count
    pub fn create_task(&mut self, column_id: &Id) -> Id {
        let id = self.ids.next_id(EntityKind::Task);
        let content = format!("Task {}", self.state.tasks().len() + 1);
        debug!(%id, column = %column_id, "creating task");
        self.state = self.state.add_task(id.clone(), column_id.clone(), content);
        id
    }

    pub fn delete_task(&mut self, id: &Id) {
        debug!(%id, "deleting task");
        self.state = self.state.remove_task(id);
    }

    pub fn update_task(&mut self, id: &Id, content: &str) {
        debug!(%id, "updating task content");
        self.state = self.state.update_task_content(id, content);
    }

    pub fn move_column(&mut self, active: &Id, over: &Id) {
        self.state = self.state.move_column(active, over);
    }

    pub fn move_task_over_task(&mut self, active: &Id, over: &Id) {
        self.state = self.state.move_task_over_task(active, over);
    }

    pub fn move_task_to_column(&mut self, active: &Id, column: &Id) {
        self.state = self.state.move_task_to_column(active, column);
    }

    pub fn place_task(&mut self, id: &Id, column_id: &Id, index: usize) {
        self.state = self.state.place_task(id, column_id, index);
    }
}
