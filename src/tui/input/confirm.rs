use crossterm::event::{KeyCode, KeyEvent};

use crate::model::document::Document;
use crate::tui::app::App;

use super::*;

/// Save-before-quit prompt: y saves then quits, n quits, Esc goes back
pub(super) fn handle_confirm(app: &mut App, doc: &mut Document, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.cancel_quit(doc);
        return;
    }
    match plain_char(&key) {
        Some('y' | 'Y') => {
            if app.save(doc) {
                app.confirm_quit = None;
                app.should_quit = true;
            } else {
                app.cancel_quit(doc);
            }
        }
        Some('n' | 'N') => {
            app.confirm_quit = None;
            app.should_quit = true;
        }
        _ => {}
    }
}
