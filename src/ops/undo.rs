use tracing::debug;

use crate::model::document::Document;
use crate::model::history::Change;

use super::view;

/// Revert the most recent applied chain. Returns false when there is nothing
/// to undo.
///
/// The history is detached from the document while the chain is replayed, so
/// the replay itself is never recorded.
pub fn undo(doc: &mut Document) -> bool {
    let Some(mut history) = doc.take_history() else {
        return false;
    };
    let reverted = match history.step_back() {
        Some(chain) => {
            chain.redo_state = Some(doc.cursor_state());
            for recorded in chain.changes.iter().rev() {
                apply_inverse(doc, &recorded.change);
            }
            if let Some(before) = chain.before() {
                doc.restore_cursor_state(before);
            }
            debug!(changes = chain.changes.len(), "undo");
            true
        }
        None => false,
    };
    doc.restore_history(history);
    if reverted {
        view::recompute(doc);
    }
    reverted
}

/// Reapply the chain most recently undone. Returns false when there is
/// nothing to redo.
pub fn redo(doc: &mut Document) -> bool {
    let Some(mut history) = doc.take_history() else {
        return false;
    };
    let reapplied = match history.step_forward() {
        Some(chain) => {
            for recorded in &chain.changes {
                apply_forward(doc, &recorded.change);
            }
            if let Some(state) = chain.redo_state.or_else(|| chain.before()) {
                doc.restore_cursor_state(state);
            }
            debug!(changes = chain.changes.len(), "redo");
            true
        }
        None => false,
    };
    doc.restore_history(history);
    if reapplied {
        view::recompute(doc);
    }
    reapplied
}

/// Apply the inverse of a change (for undo)
fn apply_inverse(doc: &mut Document, change: &Change) {
    match change {
        Change::Insert { index, .. } => {
            doc.raw_delete(*index);
        }
        Change::Delete { index, line } => doc.raw_insert(*index, line.clone()),
        Change::Update {
            index, old_line, ..
        } => {
            doc.raw_update(*index, old_line.clone());
        }
        // Swap is its own inverse
        Change::Swap { a, b } => doc.raw_swap(*a, *b),
    }
}

/// Apply a change again (for redo)
fn apply_forward(doc: &mut Document, change: &Change) {
    match change {
        Change::Insert { index, line } => doc.raw_insert(*index, line.clone()),
        Change::Delete { index, .. } => {
            doc.raw_delete(*index);
        }
        Change::Update {
            index, new_line, ..
        } => {
            doc.raw_update(*index, new_line.clone());
        }
        Change::Swap { a, b } => doc.raw_swap(*a, *b),
    }
}
