use std::sync::LazyLock;

use regex::Regex;

use crate::model::task::{Status, Task};

/// `- [X]` followed by either end of line or one space and the description.
static TASK_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- \[([ x])\](?: (.*))?$").expect("task line pattern"));

/// Length in chars of a rendered task prefix (`- [ ] `)
pub const TASK_PREFIX_LEN: usize = 6;

/// The prefix a new task line with `status` starts with, including the space.
pub fn task_prefix(status: Status) -> String {
    format!("- [{}] ", status.checkbox_char())
}

pub fn is_task_line(line: &str) -> bool {
    TASK_LINE_RE.is_match(line)
}

/// Parse a task line, or `None` if the line is not a task.
pub fn try_parse_task(line: &str) -> Option<Task> {
    let caps = TASK_LINE_RE.captures(line)?;
    let status = caps
        .get(1)
        .and_then(|m| m.as_str().chars().next())
        .and_then(Status::from_checkbox_char)?;
    let description = caps.get(2).map_or("", |m| m.as_str());
    Some(Task::new(status, description))
}

/// Parse a line already classified as a task.
///
/// Panics when the line is not a task: callers classify first, so reaching
/// this with anything else means the view bookkeeping is broken.
pub fn parse_task(line: &str) -> Task {
    match try_parse_task(line) {
        Some(task) => task,
        None => panic!("not a task: {}", line),
    }
}

/// Render a task as a line. The result always classifies as a task.
pub fn render_task(task: &Task) -> String {
    format!("{}{}", task_prefix(task.status), task.description)
}
