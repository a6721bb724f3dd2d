mod archive;
mod confirm;
mod edit;
mod task;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::autosave::lock;
use crate::model::document::{Document, Mode};
use crate::ops::undo;

use super::app::App;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    let shared = app.doc.clone();
    let mut doc = lock(&shared);

    if app.confirm_quit.is_some() {
        confirm::handle_confirm(app, &mut doc, key);
        return;
    }
    // Help overlay closes on any key
    if app.show_help {
        app.show_help = false;
        return;
    }
    app.status_message = None;

    match doc.mode() {
        Mode::Task => task::handle_task(app, &mut doc, key),
        Mode::Edit => edit::handle_edit(app, &mut doc, key),
        Mode::Archive => archive::handle_archive(app, &mut doc, key),
        Mode::Exit => {}
    }
}

/// Handle a bracketed paste. Only Edit mode takes text; line breaks become
/// spaces since a line cannot hold them.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() || app.confirm_quit.is_some() {
        return;
    }
    if let Some(editor) = app.editor.as_mut() {
        let clean = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
        editor.insert_str(&clean);
        app.last_caret = editor.caret();
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// A printable key with no Ctrl/Alt held
fn plain_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

fn is_quit_chord(key: &KeyEvent) -> bool {
    is_ctrl(key, 'q') || is_ctrl(key, 'x') || is_ctrl(key, 'c')
}

fn is_save_key(key: &KeyEvent) -> bool {
    is_ctrl(key, 's') || matches!(plain_char(key), Some('s' | 'w'))
}

/// Undo/redo shared by Task and Archive modes
fn handle_history_key(doc: &mut Document, c: char) -> bool {
    match c {
        'u' => {
            undo::undo(doc);
            true
        }
        'r' => {
            undo::redo(doc);
            true
        }
        _ => false,
    }
}
