pub mod confirm_prompt;
pub mod help_overlay;
pub mod list_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::model::document::Document;
use crate::ops::view;

use super::app::App;

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App, doc: &mut Document) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: list | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    // The list height is only known here; keep the cursor on screen for it
    doc.set_page_height(chunks[0].height as usize);
    view::scroll_to_cursor(doc);

    list_view::render_list_view(frame, app, doc, chunks[0]);

    if app.confirm_quit.is_some() {
        confirm_prompt::render_confirm_prompt(frame, app, chunks[1]);
    } else {
        status_row::render_status_row(frame, app, doc, chunks[1]);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, doc, area);
    }
}
