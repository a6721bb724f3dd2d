//! View projection: which lines are visible, and where the cursor and scroll
//! window sit among them.
//!
//! `recompute` is the single synchronization point between the lines and the
//! cursor. Everything that changes lines, mode or filter calls it before the
//! cursor is read again.

use crate::model::document::{Document, Mode};
use crate::model::line::LineKind;
use crate::model::task::Filter;
use crate::parse::{classify, try_parse_task};

/// Indices of the lines visible under `mode` and `filter`, in document order.
pub fn project(lines: &[String], mode: Mode, filter: Filter) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_visible(line, mode, filter))
        .map(|(i, _)| i)
        .collect()
}

fn is_visible(line: &str, mode: Mode, filter: Filter) -> bool {
    let kind = classify(line);
    match mode {
        Mode::Archive => kind == LineKind::Comment,
        Mode::Task | Mode::Edit | Mode::Exit => match kind {
            LineKind::Comment => false,
            LineKind::Normal => true,
            LineKind::Task => try_parse_task(line).is_some_and(|t| filter.admits(t.status)),
        },
    }
}

/// Rebuild the view and pull the cursor (and scroll window) back into range.
pub fn recompute(doc: &mut Document) {
    doc.view = project(doc.lines(), doc.mode, doc.filter);
    if doc.view.is_empty() {
        doc.cursor = 0;
    } else if doc.cursor >= doc.view.len() {
        doc.cursor = doc.view.len() - 1;
    }
    scroll_to_cursor(doc);
}

/// Move the scroll window the minimum needed to contain the cursor.
pub fn scroll_to_cursor(doc: &mut Document) {
    let height = doc.page_height.max(1);
    if doc.cursor >= doc.scroll + height {
        doc.scroll = doc.cursor + 1 - height;
    }
    if doc.cursor < doc.scroll {
        doc.scroll = doc.cursor;
    }
}

pub fn cursor_down(doc: &mut Document) {
    if doc.cursor + 1 < doc.view.len() {
        doc.cursor += 1;
        scroll_to_cursor(doc);
    }
}

pub fn cursor_up(doc: &mut Document) {
    if doc.cursor > 0 {
        doc.cursor -= 1;
        scroll_to_cursor(doc);
    }
}

pub fn page_down(doc: &mut Document) {
    let step = doc.page_height.saturating_sub(1).max(1);
    let last = doc.view.len().saturating_sub(1);
    doc.cursor = (doc.cursor + step).min(last);
    scroll_to_cursor(doc);
}

pub fn page_up(doc: &mut Document) {
    let step = doc.page_height.saturating_sub(1).max(1);
    doc.cursor = doc.cursor.saturating_sub(step);
    scroll_to_cursor(doc);
}

/// Put the cursor on the view entry for line `index`, if it is visible.
pub fn cursor_to_line(doc: &mut Document, index: usize) -> bool {
    match doc.view.iter().position(|&i| i == index) {
        Some(pos) => {
            doc.cursor = pos;
            scroll_to_cursor(doc);
            true
        }
        None => false,
    }
}

/// Row of the cursor inside the visible page
pub fn cursor_to_page(doc: &Document) -> usize {
    doc.cursor - doc.scroll
}

/// Switch filter; cursor and scroll go back to the top.
pub fn set_filter(doc: &mut Document, filter: Filter) {
    doc.cursor = 0;
    doc.scroll = 0;
    doc.filter = filter;
    recompute(doc);
}

pub fn next_filter(doc: &mut Document) {
    set_filter(doc, doc.filter.next());
}

pub fn set_mode(doc: &mut Document, mode: Mode) {
    let switches_view = (doc.mode == Mode::Archive) != (mode == Mode::Archive);
    doc.mode = mode;
    if switches_view {
        doc.cursor = 0;
        doc.scroll = 0;
    }
    recompute(doc);
}
