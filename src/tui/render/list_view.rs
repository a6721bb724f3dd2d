use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::document::{Document, Mode};
use crate::model::line::LineKind;
use crate::model::task::Status;
use crate::parse::{classify, parse_comment, try_parse_task};
use crate::tui::app::App;
use crate::util::unicode::{truncate_to_width, visible_start, width_before};

/// Width of the `> ` cursor gutter
const GUTTER: u16 = 2;

/// Render the visible lines, cursor row marked with `>`
pub fn render_list_view(frame: &mut Frame, app: &App, doc: &Document, area: Rect) {
    let bg = app.theme.background;
    let text_width = area.width.saturating_sub(GUTTER) as usize;
    let cursor_style = Style::default()
        .fg(app.theme.highlight)
        .bg(app.theme.selection_bg)
        .add_modifier(Modifier::BOLD);

    if doc.view().is_empty() {
        let hint = match doc.mode() {
            Mode::Archive => "Nothing archived. Press Esc to go back",
            Mode::Task | Mode::Edit | Mode::Exit => "No tasks. Press Enter to create one",
        };
        let line = Line::from(vec![
            Span::styled("> ", cursor_style),
            Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let height = area.height as usize;
    let end = (doc.scroll() + height).min(doc.view().len());
    let mut lines: Vec<Line> = Vec::with_capacity(end - doc.scroll());

    for (row, &index) in doc.view()[doc.scroll()..end].iter().enumerate() {
        let is_cursor = doc.scroll() + row == doc.cursor();
        let raw = doc.line(index);
        let shown = match doc.mode() {
            Mode::Archive => parse_comment(raw),
            Mode::Task | Mode::Edit | Mode::Exit => raw.to_string(),
        };

        let mut style = line_style(app, &shown);
        if is_cursor {
            style = style.bg(app.theme.selection_bg);
        }

        let marker = if is_cursor { "> " } else { "  " };
        let marker_style = if is_cursor {
            cursor_style
        } else {
            Style::default().bg(bg)
        };

        let body = match (&app.editor, is_cursor && doc.mode() == Mode::Edit) {
            (Some(editor), true) => {
                let start = visible_start(editor.text(), editor.caret(), text_width);
                let caret_col = width_before(editor.text(), editor.caret())
                    - width_before(editor.text(), start);
                frame.set_cursor_position(Position::new(
                    area.x + GUTTER + caret_col as u16,
                    area.y + row as u16,
                ));
                editor.text().chars().skip(start).collect()
            }
            _ => truncate_to_width(&shown, text_width),
        };

        lines.push(Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled(body, style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

/// Headings bright, closed tasks dimmed, everything else plain
fn line_style(app: &App, line: &str) -> Style {
    let base = Style::default().bg(app.theme.background);
    match classify(line) {
        LineKind::Task => match try_parse_task(line).map(|t| t.status) {
            Some(Status::Closed) => base
                .fg(app.theme.dim)
                .add_modifier(Modifier::CROSSED_OUT),
            _ => base.fg(app.theme.text),
        },
        LineKind::Normal if line.starts_with('#') => base
            .fg(app.theme.text_bright)
            .add_modifier(Modifier::BOLD),
        LineKind::Normal | LineKind::Comment => base.fg(app.theme.text),
    }
}
