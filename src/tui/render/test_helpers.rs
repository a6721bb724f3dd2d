use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::autosave::lock;
use crate::model::config::Settings;
use crate::model::document::Document;
use crate::tui::app::App;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An app over `lines` that would save to `todo.md`
pub fn app_with(lines: &[&str]) -> App {
    let doc = Document::from_lines(lines.iter().map(|s| s.to_string()).collect());
    App::new(doc, Settings::for_path("todo.md"))
}

/// Render the whole screen for `app`
pub fn render_app(app: &App, w: u16, h: u16) -> String {
    let shared = app.doc.clone();
    let mut doc = lock(&shared);
    render_to_string(w, h, |frame, _area| super::render(frame, app, &mut doc))
}
