//! Board view: columns side by side, task cards stacked inside

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::cli::tui::app::{App, InputMode};
use crate::cli::tui::layout::ColumnSlot;
use crate::domain::{Column, Id, Task};

const DRAG_COLOR: Color = Color::Magenta;
const FOCUS_COLOR: Color = Color::Yellow;

/// Draw the board and the status bar
pub fn draw(frame: &mut Frame, app: &App) {
    let layout = app.layout_in(frame.area());
    let state = app.controller().state();

    if state.columns().is_empty() {
        let hint = Paragraph::new("No columns yet, press [a] to add one")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(hint, layout.board);
    }

    let focused_column = app.focused_column_id();
    let focused_task = app.focused_task_id();

    for slot in &layout.columns {
        let Some(column) = state.column(&slot.id) else {
            continue;
        };
        let focused = focused_column.as_ref() == Some(&column.id) && focused_task.is_none();
        draw_column(frame, app, slot, column, focused);

        for (task_id, area) in &slot.cards {
            if let Some(task) = state.task(task_id) {
                let focused = focused_task.as_ref() == Some(task_id);
                draw_card(frame, app, task, *area, focused);
            }
        }

        if slot.hidden > 0 {
            let inner = slot.area.inner(Margin::new(1, 1));
            let row = Rect::new(inner.x, inner.bottom().saturating_sub(1), inner.width, 1);
            let more = Paragraph::new(format!("+{} more", slot.hidden))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(more, row);
        }
    }

    draw_status_bar(frame, app, layout.status);
}

fn draw_column(frame: &mut Frame, app: &App, slot: &ColumnSlot, column: &Column, focused: bool) {
    let state = app.controller().state();
    let editing = matches!(app.input_mode(), InputMode::EditColumn(id) if id == &column.id);

    let mut title = column.title.clone();
    if editing {
        title.push('_');
    }
    if app.ui().show_counts {
        title = format!("{} ({})", title, state.task_count(&column.id));
    }
    let title = fit(&title, slot.area.width.saturating_sub(4) as usize);

    let style = border_style(is_active(app, &column.id), focused || editing);
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(style);

    frame.render_widget(block, slot.area);
}

fn draw_card(frame: &mut Frame, app: &App, task: &Task, area: Rect, focused: bool) {
    let editing = matches!(app.input_mode(), InputMode::EditTask(id) if id == &task.id);

    let mut content = task.content.clone();
    if editing {
        content.push('_');
    }
    let content = fit(&content, area.width.saturating_sub(2) as usize);

    let style = border_style(is_active(app, &task.id), focused || editing);
    let card = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style),
    );

    frame.render_widget(card, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let controller = app.controller();

    let (content, style) = if let Some(column) = controller.active_column() {
        (
            format!("Dragging column '{}' (release to drop, Esc cancels)", column.title),
            Style::default().fg(DRAG_COLOR),
        )
    } else if let Some(task) = controller.active_task() {
        (
            format!("Dragging '{}' (release to drop, Esc cancels)", task.content),
            Style::default().fg(DRAG_COLOR),
        )
    } else {
        match app.input_mode() {
            InputMode::Normal => {
                let msg = app.status_message().unwrap_or(
                    "[a]dd column [t]ask [e]dit [x]delete [hjkl]focus [q]uit",
                );
                (msg.to_string(), Style::default())
            }
            InputMode::EditColumn(_) | InputMode::EditTask(_) => (
                "Editing, press Enter to finish".to_string(),
                Style::default().fg(FOCUS_COLOR),
            ),
        }
    };

    let paragraph = Paragraph::new(format!("dragboard {}", content))
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn is_active(app: &App, id: &Id) -> bool {
    app.controller().session().active_id() == Some(id)
}

fn border_style(active: bool, focused: bool) -> Style {
    if active {
        Style::default().fg(DRAG_COLOR).add_modifier(Modifier::BOLD)
    } else if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    }
}

/// Cut `s` to `width` characters, marking the cut with an ellipsis
fn fit(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, IdStrategy};
    use ratatui::backend::TestBackend;

    #[test]
    fn fit_keeps_short_strings() {
        assert_eq!(fit("hello", 10), "hello");
        assert_eq!(fit("hello", 5), "hello");
    }

    #[test]
    fn fit_marks_cut() {
        assert_eq!(fit("hello world", 6), "hello…");
        assert_eq!(fit("héllo", 2), "h…");
        assert_eq!(fit("abc", 0), "…");
    }

    fn render(app: &App) -> String {
        let mut terminal = ratatui::Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(80)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_columns_with_counts_and_cards() {
        let mut config = Config::default();
        config.ids.strategy = IdStrategy::Sequential;
        config.ui.column_width = 20;
        let app = App::new(&config, true);

        let screen = render(&app);
        assert!(screen.contains("Todo (2)"));
        assert!(screen.contains("Doing (0)"));
        assert!(screen.contains("Task 1"));
        assert!(screen.contains("[a]dd column"));
    }

    #[test]
    fn renders_hint_for_empty_board() {
        let app = App::new(&Config::default(), false);
        assert!(render(&app).contains("No columns yet"));
    }
}
