use crossterm::event::{KeyCode, KeyEvent};

use crate::model::document::Document;
use crate::model::line::LineKind;
use crate::ops::{line_ops, view};
use crate::parse::classify;
use crate::parse::task_codec::TASK_PREFIX_LEN;
use crate::tui::app::App;

use super::*;

pub(super) fn handle_edit(app: &mut App, doc: &mut Document, key: KeyEvent) {
    if is_quit_chord(&key) {
        app.request_quit(doc);
        return;
    }
    if app.editor.is_none() {
        app.attach_editor(doc, app.last_caret);
    }

    match key.code {
        KeyCode::Esc => app.exit_edit(doc),
        KeyCode::Enter => split(app, doc),
        KeyCode::Tab => add_task_prefix(app, doc),
        KeyCode::Backspace => backspace(app, doc),
        KeyCode::Down => move_to(app, doc, view::cursor_down),
        KeyCode::Up => move_to(app, doc, view::cursor_up),
        KeyCode::PageDown => move_to(app, doc, view::page_down),
        KeyCode::PageUp => move_to(app, doc, view::page_up),
        _ => edit_text(app, key),
    }
}

/// Keys handled by the line editor alone
fn edit_text(app: &mut App, key: KeyEvent) {
    let Some(editor) = app.editor.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Home => editor.home(),
        KeyCode::End => editor.end(),
        KeyCode::Delete => {
            editor.delete();
        }
        _ => match plain_char(&key) {
            Some(c) => editor.insert_char(c),
            None => return,
        },
    }
    app.last_caret = editor.caret();
}

/// Commit the line, move with `step`, and reattach at the remembered column
fn move_to(app: &mut App, doc: &mut Document, step: fn(&mut Document)) {
    app.detach_editor(doc);
    step(doc);
    app.attach_editor(doc, app.last_caret);
}

/// Break the line at the caret; the caret lands on the new line, after its
/// task prefix if it has one.
fn split(app: &mut App, doc: &mut Document) {
    let Some(editor) = app.editor.take() else {
        return;
    };
    if line_ops::split_selected(doc, editor.text(), editor.caret()).is_none() {
        app.editor = Some(editor);
        return;
    }
    let caret = match doc.selected_line() {
        Some((_, line)) if classify(line) == LineKind::Task => TASK_PREFIX_LEN,
        _ => 0,
    };
    app.attach_editor(doc, caret);
    app.last_caret = caret;
}

/// At column 0, skip past an existing task prefix or prepend one
fn add_task_prefix(app: &mut App, doc: &Document) {
    let Some(editor) = app.editor.as_mut() else {
        return;
    };
    if editor.caret() != 0 {
        return;
    }
    if classify(editor.text()) != LineKind::Task {
        editor.insert_str(&doc.task_filter_prefix());
    }
    editor.set_caret(TASK_PREFIX_LEN);
    app.last_caret = editor.caret();
}

/// Column 0 joins with the line above. Right after a task prefix the whole
/// prefix goes at once.
fn backspace(app: &mut App, doc: &mut Document) {
    let Some(editor) = app.editor.as_mut() else {
        return;
    };
    let caret = editor.caret();
    if caret == 0 {
        let text = editor.text().to_string();
        if let Some(joined_at) = line_ops::join_with_previous(doc, &text) {
            app.attach_editor(doc, joined_at);
            app.last_caret = joined_at;
        }
        return;
    }
    if caret == TASK_PREFIX_LEN && classify(editor.text()) == LineKind::Task {
        editor.backspace_n(TASK_PREFIX_LEN);
    } else {
        editor.backspace();
    }
    app.last_caret = editor.caret();
}
