//! The archive block transform.
//!
//! On disk, archived lines sit raw inside one multi-line comment at the end of
//! the file:
//!
//! ```text
//! - [ ] still open
//! <!--
//! - [x] shipped last week
//! -->
//! ```
//!
//! In memory each archived line is its own single-line comment
//! (`<!-- - [x] shipped last week -->`) so it can be filtered and edited like
//! any other line.

use crate::model::line::LineKind;

use super::comment_codec::{COMMENT_CLOSE, COMMENT_OPEN, make_comment, parse_comment};
use super::line_classifier::classify;

/// Line that opens the archive block on disk
pub const ARCHIVE_OPEN: &str = COMMENT_OPEN;
/// Line that closes the archive block on disk
pub const ARCHIVE_CLOSE: &str = COMMENT_CLOSE;

/// Turn file lines into in-memory lines.
///
/// Delimiter lines are dropped; they only toggle whether the following lines
/// are archived. An unterminated block archives everything up to end of file.
pub fn expand_archive<'a, I>(raw_lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut lines = Vec::new();
    let mut in_block = false;
    for raw in raw_lines {
        if raw == ARCHIVE_OPEN {
            in_block = true;
        } else if raw == ARCHIVE_CLOSE {
            in_block = false;
        } else if in_block {
            lines.push(make_comment(raw));
        } else {
            lines.push(raw.to_string());
        }
    }
    lines
}

/// Turn in-memory lines into file lines: comment lines are pulled out of the
/// body and written raw inside a single trailing archive block.
pub fn collapse_archive(lines: &[String]) -> Vec<String> {
    let mut body = Vec::with_capacity(lines.len() + 2);
    let mut archived = Vec::new();
    for line in lines {
        match classify(line) {
            LineKind::Comment => archived.push(parse_comment(line)),
            LineKind::Task | LineKind::Normal => body.push(line.clone()),
        }
    }
    if !archived.is_empty() {
        body.push(ARCHIVE_OPEN.to_string());
        body.extend(archived);
        body.push(ARCHIVE_CLOSE.to_string());
    }
    body
}

/// Indices of lines that will be written as a bare block delimiter: body
/// lines that are literally `<!--` or `-->`, and archived lines whose payload
/// is.
///
/// Such lines are written as-is but read back as delimiters, so they do not
/// survive a save/load cycle.
pub fn delimiter_collisions(lines: &[String]) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            let written = match classify(line) {
                LineKind::Comment => parse_comment(line),
                LineKind::Task | LineKind::Normal => line.to_string(),
            };
            is_delimiter(&written)
        })
        .map(|(i, _)| i)
        .collect()
}

fn is_delimiter(line: &str) -> bool {
    line == ARCHIVE_OPEN || line == ARCHIVE_CLOSE
}
