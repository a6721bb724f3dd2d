/// Opening comment delimiter
pub const COMMENT_OPEN: &str = "<!--";
/// Closing comment delimiter
pub const COMMENT_CLOSE: &str = "-->";

/// A comment line starts with `<!--` and ends with `-->` without the two
/// delimiters overlapping (`<!-->` is not a comment).
pub fn is_comment_line(line: &str) -> bool {
    line.len() >= COMMENT_OPEN.len() + COMMENT_CLOSE.len()
        && line.starts_with(COMMENT_OPEN)
        && line.ends_with(COMMENT_CLOSE)
}

/// Strip the delimiters and surrounding whitespace from a comment line.
///
/// Panics when the line is not a comment.
pub fn parse_comment(line: &str) -> String {
    if !is_comment_line(line) {
        panic!("not a comment: {}", line);
    }
    line[COMMENT_OPEN.len()..line.len() - COMMENT_CLOSE.len()]
        .trim()
        .to_string()
}

/// Wrap a payload as `<!-- payload -->`.
pub fn make_comment(payload: &str) -> String {
    format!("{} {} {}", COMMENT_OPEN, payload, COMMENT_CLOSE)
}
