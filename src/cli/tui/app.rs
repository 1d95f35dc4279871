//! TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::prelude::*;

use super::event::{Event, EventHandler};
use super::gesture::{PointerTracker, Release};
use super::layout::{BoardLayout, Hit};
use super::ui::Terminal;
use super::views;
use crate::config::{Config, UiConfig};
use crate::domain::{BoardModel, Id};
use crate::drag::{DragController, DragEvent};

/// Input mode
///
/// Editing disables dragging until the edit ends.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    EditColumn(Id),
    EditTask(Id),
}

/// Application state
pub struct App {
    /// Board plus drag session
    controller: DragController,

    /// Mouse gesture recognizer
    pointer: PointerTracker,

    /// UI settings
    ui: UiConfig,

    /// Terminal area of the last drawn frame
    area: Rect,

    /// Columns scrolled out on the left
    offset: usize,

    /// Focused column index
    focus_column: usize,

    /// Focused task index within the focused column, `None` for the header
    focus_task: Option<usize>,

    /// Input mode
    input_mode: InputMode,

    /// Status message to display
    status_message: Option<String>,

    /// Whether to quit
    should_quit: bool,
}

impl App {
    /// Create a new application, optionally seeded with three columns
    pub fn new(config: &Config, seed: bool) -> Self {
        let mut board = BoardModel::new(config.ids.strategy.generator());
        if seed {
            let todo = board.create_column_titled("Todo");
            board.create_column_titled("Doing");
            board.create_column_titled("Done");
            board.create_task(&todo);
            board.create_task(&todo);
        }

        Self {
            controller: DragController::new(board).with_cancel_policy(config.drag.cancel_policy),
            pointer: PointerTracker::new(config.drag.activation_distance),
            ui: config.ui.clone(),
            area: Rect::default(),
            offset: 0,
            focus_column: 0,
            focus_task: None,
            input_mode: InputMode::Normal,
            status_message: None,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| {
                self.area = frame.area();
                views::board::draw(frame, self);
            })?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(_, _) | Event::Tick => {}
            }
        }

        Ok(())
    }

    /// Layout of the board in the last drawn frame
    pub fn layout(&self) -> BoardLayout {
        self.layout_in(self.area)
    }

    pub fn layout_in(&self, area: Rect) -> BoardLayout {
        BoardLayout::compute(area, self.controller.state(), self.ui.column_width, self.offset)
    }

    /// Handle key events
    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.input_mode.clone() {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::EditColumn(id) => self.handle_edit_column_key(key, &id),
            InputMode::EditTask(id) => self.handle_edit_task_key(key, &id),
        }
    }

    /// Handle keys in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) {
        if self.pointer.is_dragging() {
            match key.code {
                KeyCode::Esc => self.cancel_drag(),
                KeyCode::Char('q') => self.should_quit = true,
                _ => self.status_message = Some("Drag in progress (Esc cancels)".to_string()),
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.status_message = None,

            // Navigation
            KeyCode::Char('h') | KeyCode::Left => self.focus_left(),
            KeyCode::Char('l') | KeyCode::Right => self.focus_right(),
            KeyCode::Char('j') | KeyCode::Down => self.focus_down(),
            KeyCode::Char('k') | KeyCode::Up => self.focus_up(),
            KeyCode::Char('[') => self.offset = self.offset.saturating_sub(1),
            KeyCode::Char(']') => {
                if self.offset + 1 < self.controller.state().columns().len() {
                    self.offset += 1;
                }
            }

            // Actions
            KeyCode::Char('a') => self.add_column(),
            KeyCode::Char('t') => self.add_task(),
            KeyCode::Char('x') => self.delete_focused(),
            KeyCode::Char('e') | KeyCode::Enter => self.edit_focused(),
            _ => {}
        }
    }

    fn handle_edit_column_key(&mut self, key: KeyEvent, id: &Id) {
        let Some(mut title) = self.controller.state().column(id).map(|c| c.title.clone()) else {
            self.input_mode = InputMode::Normal;
            return;
        };
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                title.pop();
                self.controller.board_mut().rename_column(id, &title);
            }
            KeyCode::Char(c) => {
                title.push(c);
                self.controller.board_mut().rename_column(id, &title);
            }
            _ => {}
        }
    }

    fn handle_edit_task_key(&mut self, key: KeyEvent, id: &Id) {
        let Some(mut content) = self.controller.state().task(id).map(|t| t.content.clone()) else {
            self.input_mode = InputMode::Normal;
            return;
        };
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                content.pop();
                self.controller.board_mut().update_task(id, &content);
            }
            KeyCode::Char(c) => {
                content.push(c);
                self.controller.board_mut().update_task(id, &content);
            }
            _ => {}
        }
    }

    /// Handle left-button mouse events
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        let layout = self.layout();

        match mouse.kind {
            MouseEventKind::Down(_) => {
                if self.input_mode != InputMode::Normal {
                    // clicking away ends the edit; this press does not drag
                    self.input_mode = InputMode::Normal;
                    return;
                }
                if self.pointer.is_dragging() {
                    // the previous release never reached us
                    self.cancel_drag();
                }
                let layout = self.layout();
                self.pointer.press(x, y, &layout);
            }
            MouseEventKind::Drag(_) => {
                let events = self.pointer.drag_to(x, y, &layout, self.controller.state());
                for event in events {
                    self.dispatch(event);
                }
            }
            MouseEventKind::Up(_) => match self.pointer.release(x, y, &layout) {
                Release::Click(Some(hit)) => self.focus_hit(&hit),
                Release::Click(None) | Release::Ignored => {}
                Release::Drop(event) => self.dispatch(event),
            },
            _ => {}
        }
    }

    fn cancel_drag(&mut self) {
        if let Some(event) = self.pointer.cancel() {
            self.dispatch(event);
            self.status_message = Some("Drag cancelled".to_string());
        }
    }

    /// Feed a drag event to the controller and keep focus on the dragged entity
    fn dispatch(&mut self, event: DragEvent) {
        let active = match &event {
            DragEvent::Start { active } | DragEvent::Over { active, .. } => active.id().clone(),
            DragEvent::End { active, .. } | DragEvent::Cancel { active } => active.clone(),
        };
        self.controller.dispatch(&event);
        self.focus_id(&active);
        self.clamp_focus();
    }

    // ------------------------------------------------------------------
    // Board actions
    // ------------------------------------------------------------------

    fn add_column(&mut self) {
        let id = self.controller.board_mut().create_column();
        self.focus_id(&id);
        self.status_message = Some("Added column".to_string());
    }

    fn add_task(&mut self) {
        let Some(column) = self.focused_column_id() else {
            self.status_message = Some("Add a column first ([a])".to_string());
            return;
        };
        let id = self.controller.board_mut().create_task(&column);
        self.focus_id(&id);
    }

    fn delete_focused(&mut self) {
        if let Some(task) = self.focused_task_id() {
            self.controller.board_mut().delete_task(&task);
            self.status_message = Some("Deleted task".to_string());
        } else if let Some(column) = self.focused_column_id() {
            self.controller.board_mut().delete_column(&column);
            self.status_message = Some("Deleted column".to_string());
        }
        self.clamp_focus();
    }

    fn edit_focused(&mut self) {
        if let Some(task) = self.focused_task_id() {
            self.input_mode = InputMode::EditTask(task);
        } else if let Some(column) = self.focused_column_id() {
            self.input_mode = InputMode::EditColumn(column);
        }
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    fn focus_left(&mut self) {
        self.focus_column = self.focus_column.saturating_sub(1);
        self.focus_task = None;
        self.scroll_to_focus();
    }

    fn focus_right(&mut self) {
        if self.focus_column + 1 < self.controller.state().columns().len() {
            self.focus_column += 1;
            self.focus_task = None;
        }
        self.scroll_to_focus();
    }

    fn focus_down(&mut self) {
        let count = self.focused_task_ids().len();
        self.focus_task = match self.focus_task {
            None if count > 0 => Some(0),
            Some(i) if i + 1 < count => Some(i + 1),
            other => other,
        };
    }

    fn focus_up(&mut self) {
        self.focus_task = match self.focus_task {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    fn focus_hit(&mut self, hit: &Hit) {
        self.focus_id(hit.id());
        if let Hit::Body(_) | Hit::Header(_) = hit {
            self.focus_task = None;
        }
    }

    /// Moves focus to a column or task by id; unknown ids leave focus alone
    fn focus_id(&mut self, id: &Id) {
        let state = self.controller.state();
        if let Some(index) = state.column_index(id) {
            self.focus_column = index;
            self.focus_task = None;
        } else if let Some(task) = state.task(id) {
            if let Some(index) = state.column_index(&task.column_id) {
                self.focus_column = index;
                self.focus_task = state.tasks_in(&task.column_id).position(|t| &t.id == id);
            }
        }
        self.scroll_to_focus();
    }

    fn clamp_focus(&mut self) {
        let columns = self.controller.state().columns().len();
        if columns == 0 {
            self.focus_column = 0;
            self.focus_task = None;
            self.offset = 0;
            return;
        }
        self.focus_column = self.focus_column.min(columns - 1);
        self.offset = self.offset.min(columns - 1);
        let count = self.focused_task_ids().len();
        self.focus_task = match self.focus_task {
            Some(_) if count == 0 => None,
            Some(i) => Some(i.min(count - 1)),
            None => None,
        };
    }

    fn scroll_to_focus(&mut self) {
        if self.focus_column < self.offset {
            self.offset = self.focus_column;
            return;
        }
        let visible = self.layout().columns.len().max(1);
        if self.area.width > 0 && self.focus_column >= self.offset + visible {
            self.offset = self.focus_column + 1 - visible;
        }
    }

    fn focused_task_ids(&self) -> Vec<Id> {
        match self.focused_column_id() {
            Some(column) => self
                .controller
                .state()
                .tasks_in(&column)
                .map(|t| t.id.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors for views
    // ------------------------------------------------------------------

    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    pub fn ui(&self) -> &UiConfig {
        &self.ui
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn focused_column_id(&self) -> Option<Id> {
        self.controller
            .state()
            .columns()
            .get(self.focus_column)
            .map(|c| c.id.clone())
    }

    pub fn focused_task_id(&self) -> Option<Id> {
        let index = self.focus_task?;
        self.focused_task_ids().into_iter().nth(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdStrategy;
    use crate::drag::CancelPolicy;
    use crossterm::event::{MouseButton, MouseEvent};

    fn app(seed: bool) -> App {
        let mut config = Config::default();
        config.ids.strategy = IdStrategy::Sequential;
        config.ui.column_width = 20;
        config.drag.activation_distance = 2;
        let mut app = App::new(&config, seed);
        app.area = Rect::new(0, 0, 80, 24);
        app
    }

    fn key(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn mouse(app: &mut App, kind: MouseEventKind, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn drag(app: &mut App, from: (u16, u16), to: (u16, u16)) {
        mouse(app, MouseEventKind::Down(MouseButton::Left), from.0, from.1);
        mouse(app, MouseEventKind::Drag(MouseButton::Left), to.0, to.1);
        mouse(app, MouseEventKind::Up(MouseButton::Left), to.0, to.1);
    }

    fn column_titles(app: &App) -> Vec<String> {
        app.controller()
            .state()
            .columns()
            .iter()
            .map(|c| c.title.clone())
            .collect()
    }

    // ==========================================================================
    // Keyboard
    // ==========================================================================

    #[test]
    fn seeded_board_has_three_columns() {
        let app = app(true);
        assert_eq!(column_titles(&app), vec!["Todo", "Doing", "Done"]);
        assert_eq!(app.controller().state().task_count(&"c1".parse().unwrap()), 2);
    }

    #[test]
    fn add_column_and_task_from_keys() {
        let mut app = app(false);
        key(&mut app, KeyCode::Char('t'));
        assert!(app.controller().state().tasks().is_empty());

        key(&mut app, KeyCode::Char('a'));
        key(&mut app, KeyCode::Char('a'));
        assert_eq!(column_titles(&app), vec!["Column 1", "Column 2"]);
        assert_eq!(app.focused_column_id(), Some("c2".parse().unwrap()));

        key(&mut app, KeyCode::Char('t'));
        let task = &app.controller().state().tasks()[0];
        assert_eq!(task.column_id.as_str(), "c2");
        assert_eq!(app.focused_task_id(), Some(task.id.clone()));
    }

    #[test]
    fn delete_task_then_column() {
        let mut app = app(true);
        key(&mut app, KeyCode::Char('j'));
        key(&mut app, KeyCode::Char('x'));
        assert_eq!(app.controller().state().tasks().len(), 1);

        key(&mut app, KeyCode::Char('k'));
        key(&mut app, KeyCode::Char('x'));
        assert_eq!(column_titles(&app), vec!["Doing", "Done"]);
        assert!(app.controller().state().tasks().is_empty());
    }

    #[test]
    fn editing_updates_live() {
        let mut app = app(true);
        key(&mut app, KeyCode::Char('e'));
        assert_eq!(app.input_mode(), &InputMode::EditColumn("c1".parse().unwrap()));

        key(&mut app, KeyCode::Backspace);
        key(&mut app, KeyCode::Char('!'));
        assert_eq!(column_titles(&app)[0], "Tod!");

        key(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode(), &InputMode::Normal);
    }

    // ==========================================================================
    // Mouse
    // ==========================================================================

    #[test]
    fn drag_column_header_onto_another() {
        let mut app = app(true);
        // headers sit on row 0; Todo at x 0..20, Doing at x 21..41
        drag(&mut app, (5, 0), (25, 0));
        assert_eq!(column_titles(&app), vec!["Doing", "Todo", "Done"]);
        assert!(app.controller().session().is_idle());
    }

    #[test]
    fn drag_task_into_other_column() {
        let mut app = app(true);
        // first card of Todo at rows 1..4; drop on Doing's body
        drag(&mut app, (5, 2), (25, 10));

        let task = app.controller().state().task(&"t1".parse().unwrap()).unwrap();
        assert_eq!(task.column_id.as_str(), "c2");
        assert_eq!(app.focused_column_id(), Some("c2".parse().unwrap()));
    }

    #[test]
    fn click_focuses_without_dragging() {
        let mut app = app(true);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 5);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 5);
        assert_eq!(app.focused_task_id(), Some("t2".parse().unwrap()));
        assert_eq!(column_titles(&app), vec!["Todo", "Doing", "Done"]);
    }

    #[test]
    fn escape_cancels_drag() {
        let mut app = app(true);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 0);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 25, 0);
        assert!(!app.controller().session().is_idle());

        key(&mut app, KeyCode::Esc);
        assert!(app.controller().session().is_idle());
        assert_eq!(column_titles(&app), vec!["Todo", "Doing", "Done"]);
    }

    #[test]
    fn press_during_unfinished_drag_cancels_it() {
        let mut app = app(true);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 2);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 25, 10);
        assert!(!app.controller().session().is_idle());

        // button released outside the terminal, next press arrives directly
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 50, 10);
        assert!(app.controller().session().is_idle());
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 50, 10);
        key(&mut app, KeyCode::Esc);
        assert!(app.controller().session().is_idle());

        key(&mut app, KeyCode::Char('a'));
        assert_eq!(column_titles(&app).len(), 4);
    }

    #[test]
    fn cancel_policy_comes_from_config() {
        let mut config = Config::default();
        config.drag.cancel_policy = CancelPolicy::Revert;
        let app = App::new(&config, false);
        assert_eq!(app.controller().cancel_policy(), CancelPolicy::Revert);
    }

    #[test]
    fn editing_blocks_drag() {
        let mut app = app(true);
        key(&mut app, KeyCode::Char('e'));
        drag(&mut app, (5, 0), (25, 0));
        assert_eq!(app.input_mode(), &InputMode::Normal);
        assert_eq!(column_titles(&app), vec!["Todo", "Doing", "Done"]);
    }
}
