use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Render the save-before-quit question in place of the status row
pub fn render_confirm_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.status_bg;
    let line = Line::from(vec![
        Span::styled(
            format!(" Save {}?", app.settings.path.display()),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " (y/n, Esc cancels)",
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}
