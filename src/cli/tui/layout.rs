//! Board geometry and hit-testing
//!
//! The same layout is used to draw a frame and to resolve what lies under
//! the mouse pointer, so a drag always targets what the user sees.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

use crate::domain::{BoardState, Id};

/// Height of a task card including its borders
pub const CARD_HEIGHT: u16 = 3;

/// Screen areas of one rendered column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSlot {
    pub id: Id,
    /// Whole column including borders
    pub area: Rect,
    /// Top border row carrying the title; the column's drag handle
    pub header: Rect,
    /// Visible cards, in column order
    pub cards: Vec<(Id, Rect)>,
    /// Tasks that did not fit below the last visible card
    pub hidden: usize,
}

/// What lies under a screen position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Header(Id),
    Body(Id),
    Card(Id),
}

impl Hit {
    pub fn id(&self) -> &Id {
        match self {
            Hit::Header(id) | Hit::Body(id) | Hit::Card(id) => id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    pub board: Rect,
    pub status: Rect,
    pub columns: Vec<ColumnSlot>,
}

impl BoardLayout {
    /// Lays out columns left to right starting at column `offset`
    pub fn compute(area: Rect, state: &BoardState, column_width: u16, offset: usize) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(CARD_HEIGHT + 2), Constraint::Length(3)])
            .split(area);
        let (board, status) = (chunks[0], chunks[1]);

        let mut columns = Vec::new();
        let mut x = board.x;
        for column in state.columns().iter().skip(offset) {
            if x.saturating_add(column_width) > board.right() {
                break;
            }
            let rect = Rect::new(x, board.y, column_width, board.height);
            let header = Rect::new(rect.x, rect.y, rect.width, 1);

            let inner_bottom = rect.bottom().saturating_sub(1);
            let mut cards = Vec::new();
            let mut hidden = 0;
            let mut y = rect.y + 1;
            for task in state.tasks_in(&column.id) {
                if y + CARD_HEIGHT <= inner_bottom && hidden == 0 {
                    let card = Rect::new(rect.x + 1, y, rect.width.saturating_sub(2), CARD_HEIGHT);
                    cards.push((task.id.clone(), card));
                    y += CARD_HEIGHT;
                } else {
                    hidden += 1;
                }
            }

            columns.push(ColumnSlot {
                id: column.id.clone(),
                area: rect,
                header,
                cards,
                hidden,
            });
            x = x.saturating_add(column_width + 1);
        }

        Self {
            board,
            status,
            columns,
        }
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<Hit> {
        let pos = Position::new(x, y);
        let slot = self.columns.iter().find(|slot| slot.area.contains(pos))?;

        if slot.header.contains(pos) {
            return Some(Hit::Header(slot.id.clone()));
        }
        if let Some((id, _)) = slot.cards.iter().find(|(_, rect)| rect.contains(pos)) {
            return Some(Hit::Card(id.clone()));
        }
        Some(Hit::Body(slot.id.clone()))
    }
}
