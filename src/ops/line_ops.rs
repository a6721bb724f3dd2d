//! User-level edits on the selected line. Each function is one logical edit
//! (one undo step) and leaves the view recomputed.

use crate::model::document::Document;
use crate::model::line::LineKind;
use crate::parse::{classify, make_comment, parse_comment, render_task, try_parse_task};

use super::view;

/// Flip open/closed on the selected task. Non-task lines are left alone.
pub fn toggle_task(doc: &mut Document) -> bool {
    let Some((i, line)) = doc.selected_line() else {
        return false;
    };
    let Some(mut task) = try_parse_task(line) else {
        return false;
    };
    task.status = task.status.toggled();
    doc.update_line(i, render_task(&task));
    view::recompute(doc);
    true
}

/// Archive the selected line (wrap it in a comment), or restore it when it
/// is already archived.
pub fn toggle_archive(doc: &mut Document) -> bool {
    let Some((i, line)) = doc.selected_line() else {
        return false;
    };
    let toggled = match classify(line) {
        LineKind::Comment => parse_comment(line),
        LineKind::Task | LineKind::Normal => make_comment(line),
    };
    doc.update_line(i, toggled);
    view::recompute(doc);
    true
}

pub fn move_line_down(doc: &mut Document) -> bool {
    if doc.cursor + 1 >= doc.view.len() {
        return false;
    }
    let (a, b) = (doc.view[doc.cursor], doc.view[doc.cursor + 1]);
    doc.swap_lines(a, b);
    view::recompute(doc);
    view::cursor_down(doc);
    true
}

pub fn move_line_up(doc: &mut Document) -> bool {
    if doc.cursor == 0 || doc.view.is_empty() {
        return false;
    }
    let (a, b) = (doc.view[doc.cursor], doc.view[doc.cursor - 1]);
    doc.swap_lines(a, b);
    view::recompute(doc);
    view::cursor_up(doc);
    true
}

/// Send the selected line to the end of the document.
pub fn move_line_to_bottom(doc: &mut Document) -> bool {
    let Some((i, _)) = doc.selected_line() else {
        return false;
    };
    let last = doc.len() - 1;
    if i == last {
        return false;
    }
    doc.move_line_to_end(i);
    view::recompute(doc);
    view::cursor_to_line(doc, last);
    true
}

pub fn delete_selected(doc: &mut Document) -> Option<String> {
    let (i, _) = doc.selected_line()?;
    let removed = doc.delete_line(i);
    view::recompute(doc);
    Some(removed)
}

/// Insert a line above the selection and select it. Above a task the new
/// line starts as an empty task; otherwise it is blank.
pub fn insert_above_selected(doc: &mut Document) -> usize {
    let (index, text) = match doc.selected_line() {
        Some((i, line)) if classify(line) == LineKind::Task => (i, doc.task_filter_prefix()),
        Some((i, _)) => (i, String::new()),
        None => (0, doc.task_filter_prefix()),
    };
    doc.insert_line(index, text);
    view::recompute(doc);
    view::cursor_to_line(doc, index);
    index
}

/// Make sure there is a selected line to edit, creating an empty task when
/// the view is empty.
pub fn ensure_line_for_edit(doc: &mut Document) {
    if doc.selected_line().is_none() {
        let prefix = doc.task_filter_prefix();
        doc.insert_line(0, prefix);
        view::recompute(doc);
        view::cursor_to_line(doc, 0);
    }
}

/// Write edited text back to the selected line.
pub fn commit_edit(doc: &mut Document, text: &str) {
    if let Some((i, _)) = doc.selected_line() {
        doc.update_line(i, text);
        view::recompute(doc);
    }
}

/// Drop the selected line if it is a task that was left without a
/// description. Returns true when a line was removed.
pub fn finish_edit(doc: &mut Document) -> bool {
    let Some((i, line)) = doc.selected_line() else {
        return false;
    };
    if try_parse_task(line).is_some_and(|t| t.description.is_empty()) {
        doc.delete_line(i);
        view::recompute(doc);
        return true;
    }
    false
}

/// Commit `text` to the selected line and split it at char offset `caret`.
/// The new line below becomes the selection; its index is returned.
pub fn split_selected(doc: &mut Document, text: &str, caret: usize) -> Option<usize> {
    let (i, _) = doc.selected_line()?;
    let new_index = doc.chain(|doc| {
        doc.update_line(i, text);
        doc.split_line(i, caret)
    });
    view::recompute(doc);
    view::cursor_to_line(doc, new_index);
    Some(new_index)
}

/// Append `text` (the selected line as edited) to the previous visible line
/// and remove the selected line. Returns the caret position where the two
/// parts meet, or `None` at the top of the view.
pub fn join_with_previous(doc: &mut Document, text: &str) -> Option<usize> {
    if doc.cursor == 0 || doc.view.is_empty() {
        return None;
    }
    let (prev, current) = (doc.view[doc.cursor - 1], doc.view[doc.cursor]);
    let prev_text = doc.line(prev).to_string();
    let caret = prev_text.chars().count();
    doc.chain(|doc| {
        doc.update_line(prev, format!("{}{}", prev_text, text));
        doc.delete_line(current);
    });
    view::recompute(doc);
    view::cursor_to_line(doc, prev);
    Some(caret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::Mode;
    use crate::model::task::Filter;
    use crate::ops::undo::undo;
    use pretty_assertions::assert_eq;

    fn doc(lines: &[&str]) -> Document {
        let mut d = Document::from_lines(lines.iter().map(|s| s.to_string()).collect());
        d.set_page_height(100);
        d
    }

    /// Visible lines, cursor row marked with `>`
    fn screen(d: &Document) -> String {
        let mut out = String::new();
        for (row, &i) in d.view().iter().enumerate() {
            let marker = if row == d.cursor() { '>' } else { ' ' };
            let line = d.line(i);
            let shown = if d.mode() == Mode::Archive {
                parse_comment(line)
            } else {
                line.to_string()
            };
            out.push_str(&format!("{} {}\n", marker, shown));
        }
        out
    }

    #[test]
    fn toggle_task_flips_status() {
        let mut d = doc(&["- [ ] Foo", "Bar"]);
        assert!(toggle_task(&mut d));
        assert_eq!(d.line(0), "- [x] Foo");
        assert!(toggle_task(&mut d));
        assert_eq!(d.line(0), "- [ ] Foo");
        view::cursor_down(&mut d);
        assert!(!toggle_task(&mut d));
    }

    #[test]
    fn toggled_task_leaves_filtered_view() {
        let mut d = doc(&["- [ ] Foo", "- [ ] Bar"]);
        view::set_filter(&mut d, Filter::Open);
        toggle_task(&mut d);
        assert_eq!(d.view(), [1]);
        assert_eq!(d.selected_line(), Some((1, "- [ ] Bar")));
    }

    #[test]
    fn archive_and_restore() {
        let mut d = doc(&[
            "## Foo",
            "- [ ] Foo",
            "",
            "## Bar",
            "- [ ] Bar",
            "<!-- - [ ] Bar -->",
            "## Baz",
            "- [x] Baz",
            "<!-- - [ ] Baz -->",
        ]);
        assert_eq!(
            screen(&d),
            "> ## Foo\n  - [ ] Foo\n  \n  ## Bar\n  - [ ] Bar\n  ## Baz\n  - [x] Baz\n"
        );
        d.cursor = 2;
        toggle_archive(&mut d);
        d.cursor = 3;
        toggle_archive(&mut d);
        d.cursor = 2;
        toggle_archive(&mut d);
        assert_eq!(screen(&d), "  ## Foo\n  - [ ] Foo\n> ## Baz\n  - [x] Baz\n");

        view::set_mode(&mut d, Mode::Archive);
        assert_eq!(
            screen(&d),
            "> \n  ## Bar\n  - [ ] Bar\n  - [ ] Bar\n  - [ ] Baz\n"
        );
        assert_eq!(
            d.inner_string(),
            "## Foo\n- [ ] Foo\n<!--  -->\n<!-- ## Bar -->\n<!-- - [ ] Bar -->\n\
             <!-- - [ ] Bar -->\n## Baz\n- [x] Baz\n<!-- - [ ] Baz -->\n"
        );

        undo(&mut d);
        undo(&mut d);
        assert_eq!(
            d.inner_string(),
            "## Foo\n- [ ] Foo\n<!--  -->\n## Bar\n- [ ] Bar\n<!-- - [ ] Bar -->\n\
             ## Baz\n- [x] Baz\n<!-- - [ ] Baz -->\n"
        );
    }

    #[test]
    fn restore_from_archive_view() {
        let mut d = doc(&["a", "<!-- - [x] done -->"]);
        view::set_mode(&mut d, Mode::Archive);
        assert!(toggle_archive(&mut d));
        assert_eq!(d.line(1), "- [x] done");
        assert!(d.view().is_empty());
    }

    #[test]
    fn moving_lines_keeps_cursor_on_the_line() {
        let mut d = doc(&["a", "b", "c"]);
        assert!(move_line_down(&mut d));
        assert_eq!(d.lines(), ["b", "a", "c"]);
        assert_eq!(d.selected_line(), Some((1, "a")));
        assert!(move_line_down(&mut d));
        assert!(!move_line_down(&mut d));
        assert_eq!(d.lines(), ["b", "c", "a"]);
        assert!(move_line_up(&mut d));
        assert_eq!(d.lines(), ["b", "a", "c"]);
        assert_eq!(d.selected_line(), Some((1, "a")));
    }

    #[test]
    fn moving_skips_hidden_lines() {
        let mut d = doc(&["- [ ] a", "- [x] hidden", "- [ ] b"]);
        view::set_filter(&mut d, Filter::Open);
        move_line_down(&mut d);
        assert_eq!(d.lines(), ["- [ ] b", "- [x] hidden", "- [ ] a"]);
        assert_eq!(d.selected_line(), Some((2, "- [ ] a")));
    }

    #[test]
    fn move_to_bottom_follows_line() {
        let mut d = doc(&["a", "b", "c"]);
        assert!(move_line_to_bottom(&mut d));
        assert_eq!(d.lines(), ["b", "c", "a"]);
        assert_eq!(d.selected_line(), Some((2, "a")));
        assert!(!move_line_to_bottom(&mut d));
        assert_eq!(d.history().unwrap().len(), 1);
    }

    #[test]
    fn delete_selected_clamps_cursor() {
        let mut d = doc(&["a", "b"]);
        view::cursor_down(&mut d);
        assert_eq!(delete_selected(&mut d), Some("b".to_string()));
        assert_eq!(d.cursor(), 0);
        assert_eq!(delete_selected(&mut d), Some("a".to_string()));
        assert_eq!(delete_selected(&mut d), None);
    }

    #[test]
    fn insert_above_task_uses_filter_prefix() {
        let mut d = doc(&["Note", "- [x] done"]);
        view::set_filter(&mut d, Filter::Closed);
        view::cursor_down(&mut d);
        let index = insert_above_selected(&mut d);
        assert_eq!(index, 1);
        assert_eq!(d.lines(), ["Note", "- [x] ", "- [x] done"]);
        assert_eq!(d.selected_line(), Some((1, "- [x] ")));
    }

    #[test]
    fn insert_above_normal_line_is_blank() {
        let mut d = doc(&["Note"]);
        insert_above_selected(&mut d);
        assert_eq!(d.lines(), ["", "Note"]);
    }

    #[test]
    fn insert_into_empty_view_creates_task() {
        let mut d = doc(&[]);
        insert_above_selected(&mut d);
        assert_eq!(d.lines(), ["- [ ] "]);
        assert_eq!(d.selected_line(), Some((0, "- [ ] ")));
    }

    #[test]
    fn ensure_line_only_inserts_when_empty() {
        let mut d = doc(&["<!-- archived -->"]);
        ensure_line_for_edit(&mut d);
        assert_eq!(d.lines(), ["- [ ] ", "<!-- archived -->"]);
        ensure_line_for_edit(&mut d);
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn finish_edit_drops_empty_task() {
        let mut d = doc(&["- [ ] ", "- [ ] keep"]);
        assert!(finish_edit(&mut d));
        assert_eq!(d.lines(), ["- [ ] keep"]);
        assert!(!finish_edit(&mut d));
    }

    #[test]
    fn split_selected_commits_and_splits_as_one_step() {
        let mut d = doc(&["- [ ] Foo"]);
        let new_index = split_selected(&mut d, "- [ ] FooBar", 9);
        assert_eq!(new_index, Some(1));
        assert_eq!(d.lines(), ["- [ ] Foo", "- [ ] Bar"]);
        assert_eq!(d.selected_line(), Some((1, "- [ ] Bar")));
        undo(&mut d);
        assert_eq!(d.lines(), ["- [ ] Foo"]);
    }

    #[test]
    fn join_with_previous_merges_lines() {
        let mut d = doc(&["- [ ] Foo", "- [x] hidden", "Bar"]);
        view::set_filter(&mut d, Filter::Open);
        view::cursor_down(&mut d);
        let caret = join_with_previous(&mut d, "Bar!");
        assert_eq!(caret, Some(9));
        assert_eq!(d.lines(), ["- [ ] FooBar!", "- [x] hidden"]);
        assert_eq!(d.selected_line(), Some((0, "- [ ] FooBar!")));
        undo(&mut d);
        assert_eq!(d.lines(), ["- [ ] Foo", "- [x] hidden", "Bar"]);
    }

    #[test]
    fn join_at_top_does_nothing() {
        let mut d = doc(&["a"]);
        assert_eq!(join_with_previous(&mut d, "a"), None);
        assert!(d.history().unwrap().is_empty());
    }
}
