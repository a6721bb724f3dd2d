use crate::model::line::LineKind;

use super::comment_codec::is_comment_line;
use super::task_codec::is_task_line;

/// Classify a raw line. Total and pure: every string has exactly one kind.
pub fn classify(line: &str) -> LineKind {
    if is_task_line(line) {
        LineKind::Task
    } else if is_comment_line(line) {
        LineKind::Comment
    } else {
        LineKind::Normal
    }
}
