use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::document::{Document, Mode};
use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, doc: &Document, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(70, 90, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    let mut bind = |key: &'static str, desc: &'static str| {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    };

    match doc.mode() {
        Mode::Archive => {
            bind(" \u{2191}\u{2193}/jk", "Move cursor");
            bind(" PgUp/PgDn", "Page up/down");
            bind(" z", "Restore line");
            bind(" u/r", "Undo/redo");
            bind(" s/w/Ctrl+S", "Save");
            bind(" Esc/Ctrl+F", "Back to tasks");
            bind(" q/Ctrl+Q", "Quit");
        }
        Mode::Task | Mode::Edit | Mode::Exit => {
            bind(" Enter/End/a", "Edit line");
            bind(" Insert/i", "Insert line above and edit");
            bind(" Delete/d", "Delete line");
            bind(" \u{2191}\u{2193}/jk", "Move cursor");
            bind(" PgUp/PgDn", "Page up/down");
            bind(" Space", "Toggle open/closed");
            bind(" \u{2190}/h \u{2192}/l", "Move line up/down");
            bind(" Ctrl+L", "Move line to bottom");
            bind(" z", "Archive line");
            bind(" Tab/f", "Next filter");
            bind(" Ctrl+F", "Archived lines");
            bind(" u/r", "Undo/redo");
            bind(" s/w/Ctrl+S", "Save");
            bind(" q/Ctrl+Q", "Quit");
        }
    }

    let mut all = vec![
        Line::from(Span::styled(" Key Bindings", header_style)),
        Line::from(""),
    ];
    all.append(&mut lines);
    all.push(Line::from(""));
    all.push(Line::from(Span::styled(" Editing", header_style)));
    let mut edit_lines = Vec::new();
    for (key, desc) in [
        (" Esc", "Stop editing"),
        (" Enter", "Split line at cursor"),
        (" Tab", "Make line a task"),
        (" Backspace", "At line start, join with line above"),
        (" \u{2191}\u{2193} PgUp/PgDn", "Save line and move"),
    ] {
        add_binding(&mut edit_lines, key, desc, key_style, desc_style);
    }
    all.append(&mut edit_lines);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(all).block(block).style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 22;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
