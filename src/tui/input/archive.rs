use crossterm::event::{KeyCode, KeyEvent};

use crate::model::document::{Document, Mode};
use crate::ops::{line_ops, view};
use crate::tui::app::App;

use super::*;

pub(super) fn handle_archive(app: &mut App, doc: &mut Document, key: KeyEvent) {
    if is_quit_chord(&key) {
        app.request_quit(doc);
        return;
    }
    if is_save_key(&key) {
        app.save(doc);
        return;
    }
    if is_ctrl(&key, 'f') || key.code == KeyCode::Esc {
        view::set_mode(doc, Mode::Task);
        return;
    }

    match (key.code, plain_char(&key)) {
        (KeyCode::Down, _) | (_, Some('j')) => view::cursor_down(doc),
        (KeyCode::Up, _) | (_, Some('k')) => view::cursor_up(doc),
        (KeyCode::PageDown, _) => view::page_down(doc),
        (KeyCode::PageUp, _) => view::page_up(doc),
        (_, Some('z')) => {
            line_ops::toggle_archive(doc);
        }
        (KeyCode::F(1), _) | (_, Some('?')) => app.show_help = true,
        (_, Some('q')) => app.request_quit(doc),
        (_, Some(c)) => {
            handle_history_key(doc, c);
        }
        _ => {}
    }
}
