use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::document::{Document, Mode};
use crate::tui::app::App;

/// ` Mode:<m>; Filter:<f>; Autosave:<n>m; Modified|Saved HH:MM`
///
/// The filter is left out in Archive mode, autosave when it is off, and the
/// save state until there is something to report.
pub fn status_text(app: &App, doc: &Document) -> String {
    let mut s = format!(" Mode:{}", doc.mode());
    if doc.mode() != Mode::Archive {
        s.push_str(&format!("; Filter:{}", doc.filter()));
    }
    let minutes = app.settings.autosave_minutes();
    if minutes > 0 {
        s.push_str(&format!("; Autosave:{}m", minutes));
    }
    if app.has_unsaved_changes(doc) {
        s.push_str("; Modified");
    } else if let Some(saved) = app.last_saved {
        s.push_str(&format!("; Saved {}", saved.format("%H:%M")));
    }
    s
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, doc: &Document, area: Rect) {
    let bg = app.theme.status_bg;
    let mut spans = vec![Span::styled(
        status_text(app, doc),
        Style::default().fg(app.theme.text).bg(bg),
    )];
    if let Some(msg) = &app.status_message {
        spans.push(Span::styled(
            format!("; {}", msg),
            Style::default().fg(app.theme.red).bg(bg),
        ));
    }
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
