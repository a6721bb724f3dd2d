use crossterm::event::{KeyCode, KeyEvent};

use crate::model::document::{Document, Mode};
use crate::ops::{line_ops, view};
use crate::tui::app::App;

use super::*;

pub(super) fn handle_task(app: &mut App, doc: &mut Document, key: KeyEvent) {
    if is_quit_chord(&key) {
        app.request_quit(doc);
        return;
    }
    if is_save_key(&key) {
        app.save(doc);
        return;
    }
    if is_ctrl(&key, 'l') {
        line_ops::move_line_to_bottom(doc);
        return;
    }
    if is_ctrl(&key, 'f') {
        view::set_mode(doc, Mode::Archive);
        return;
    }

    match (key.code, plain_char(&key)) {
        (KeyCode::Enter | KeyCode::End, _) | (_, Some('a')) => app.enter_edit(doc, None),
        (KeyCode::Insert, _) | (_, Some('i')) => {
            line_ops::insert_above_selected(doc);
            app.enter_edit(doc, None);
        }
        (KeyCode::Delete, _) | (_, Some('d')) => {
            line_ops::delete_selected(doc);
        }
        (KeyCode::Down, _) | (_, Some('j')) => view::cursor_down(doc),
        (KeyCode::Up, _) | (_, Some('k')) => view::cursor_up(doc),
        (KeyCode::PageDown, _) => view::page_down(doc),
        (KeyCode::PageUp, _) => view::page_up(doc),
        (_, Some(' ')) => {
            line_ops::toggle_task(doc);
        }
        (KeyCode::Left, _) | (_, Some('h')) => {
            line_ops::move_line_up(doc);
        }
        (KeyCode::Right, _) | (_, Some('l')) => {
            line_ops::move_line_down(doc);
        }
        (_, Some('z')) => {
            line_ops::toggle_archive(doc);
        }
        (KeyCode::Tab, _) | (_, Some('f')) => view::next_filter(doc),
        (KeyCode::F(1), _) | (_, Some('?')) => app.show_help = true,
        (_, Some('q')) => app.request_quit(doc),
        (_, Some(c)) => {
            handle_history_key(doc, c);
        }
        _ => {}
    }
}
