use std::fmt;

use super::history::{Change, CursorState, History};
use super::line::LineKind;
use super::task::Filter;
use crate::parse::{classify, task_prefix};
use crate::util::unicode::{char_count, char_to_byte};

/// Current interaction mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Browsing the task list
    #[default]
    Task,
    /// Editing the selected line in place
    Edit,
    /// Browsing archived (commented-out) lines
    Archive,
    /// Quit requested
    Exit,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Task => "Task",
            Mode::Edit => "Edit",
            Mode::Archive => "Archive",
            Mode::Exit => "Exit",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The task list being edited.
///
/// Lines change only through the mutators below, each of which reports a
/// [`Change`] to the attached [`History`]. Positions are the only identity a
/// line has.
#[derive(Debug)]
pub struct Document {
    lines: Vec<String>,
    /// Indices into `lines` currently visible, in order
    pub(crate) view: Vec<usize>,
    /// Index into `view`
    pub(crate) cursor: usize,
    /// First visible index into `view`
    pub(crate) scroll: usize,
    /// Rows available to the list; set by the renderer
    pub(crate) page_height: usize,
    pub(crate) mode: Mode,
    pub(crate) filter: Filter,
    modified: bool,
    history: Option<History>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document with undo history attached
    pub fn new() -> Self {
        Document {
            lines: Vec::new(),
            view: Vec::new(),
            cursor: 0,
            scroll: 0,
            page_height: 1,
            mode: Mode::Task,
            filter: Filter::All,
            modified: false,
            history: Some(History::new()),
        }
    }

    /// A document holding `lines`, unmodified, with empty history and the
    /// view already computed.
    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut doc = Document {
            lines,
            ..Document::new()
        };
        crate::ops::view::recompute(&mut doc);
        doc
    }

    /// Same as [`Document::from_lines`] but with no history: mutations are
    /// not recorded and cannot be undone.
    pub fn without_history(lines: Vec<String>) -> Self {
        let mut doc = Self::from_lines(lines);
        doc.history = None;
        doc
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, i: usize) -> &str {
        &self.lines[i]
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn view(&self) -> &[usize] {
        &self.view
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn page_height(&self) -> usize {
        self.page_height
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn history(&self) -> Option<&History> {
        self.history.as_ref()
    }

    pub fn cursor_state(&self) -> CursorState {
        CursorState {
            cursor: self.cursor,
            filter: self.filter,
        }
    }

    /// The line under the cursor as `(index into lines, text)`
    pub fn selected_line(&self) -> Option<(usize, &str)> {
        let index = *self.view.get(self.cursor)?;
        Some((index, self.lines[index].as_str()))
    }

    /// Prefix given to task lines created under the current filter
    pub fn task_filter_prefix(&self) -> String {
        task_prefix(self.filter.new_task_status())
    }

    /// The whole document as it is held in memory (archived lines inline)
    pub fn inner_string(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    // -----------------------------------------------------------------------
    // State flags
    // -----------------------------------------------------------------------

    /// Clear the modified flag after a confirmed save
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    pub fn set_page_height(&mut self, height: usize) {
        self.page_height = height.max(1);
    }

    pub(crate) fn take_history(&mut self) -> Option<History> {
        self.history.take()
    }

    pub(crate) fn restore_history(&mut self, history: History) {
        self.history = Some(history);
    }

    pub(crate) fn restore_cursor_state(&mut self, state: CursorState) {
        self.cursor = state.cursor;
        self.filter = state.filter;
    }

    // -----------------------------------------------------------------------
    // Chains
    // -----------------------------------------------------------------------

    /// Group the following mutations into one undoable chain
    pub fn start_chain(&mut self) {
        if let Some(history) = self.history.as_mut() {
            history.start_chain();
        }
    }

    pub fn commit_chain(&mut self) {
        if let Some(history) = self.history.as_mut() {
            history.commit_chain();
        }
    }

    /// Run `f` inside a chain so that everything it mutates undoes at once
    pub fn chain<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.start_chain();
        let result = f(self);
        self.commit_chain();
        result
    }

    fn record(&mut self, change: Change, before: CursorState) {
        if let Some(history) = self.history.as_mut() {
            history.record(change, before);
        }
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Insert `text` at `i`, shifting later lines down. `i` may equal `len()`.
    pub fn insert_line(&mut self, i: usize, text: impl Into<String>) {
        let line = text.into();
        let before = self.cursor_state();
        self.raw_insert(i, line.clone());
        self.record(Change::Insert { index: i, line }, before);
    }

    pub fn append_line(&mut self, text: impl Into<String>) {
        self.insert_line(self.lines.len(), text);
    }

    /// Replace line `i`. Writing identical text is a no-op and records
    /// nothing.
    pub fn update_line(&mut self, i: usize, text: impl Into<String>) {
        let new_line = text.into();
        if self.line(i) == new_line {
            return;
        }
        let before = self.cursor_state();
        let old_line = self.raw_update(i, new_line.clone());
        self.record(
            Change::Update {
                index: i,
                old_line,
                new_line,
            },
            before,
        );
    }

    /// Remove line `i` and return its text
    pub fn delete_line(&mut self, i: usize) -> String {
        let before = self.cursor_state();
        let line = self.raw_delete(i);
        self.record(
            Change::Delete {
                index: i,
                line: line.clone(),
            },
            before,
        );
        line
    }

    pub fn swap_lines(&mut self, i: usize, j: usize) {
        let before = self.cursor_state();
        self.raw_swap(i, j);
        self.record(Change::Swap { a: i, b: j }, before);
    }

    /// Split line `i` at char offset `pos`; the right part goes to a new line
    /// below. When the left part is a task, the new line starts with the
    /// current filter's task prefix. Returns the index of the new line.
    pub fn split_line(&mut self, i: usize, pos: usize) -> usize {
        let len = char_count(self.line(i));
        assert!(pos <= len, "split offset {} out of range (len {})", pos, len);
        self.chain(|doc| {
            let line = doc.line(i);
            let (left, right) = line.split_at(char_to_byte(line, pos));
            let (left, mut right) = (left.to_string(), right.to_string());
            doc.update_line(i, left);
            if classify(doc.line(i)) == LineKind::Task {
                right.insert_str(0, &doc.task_filter_prefix());
            }
            doc.insert_line(i + 1, right);
            i + 1
        })
    }

    /// Move line `i` to the end of the document
    pub fn move_line_to_end(&mut self, i: usize) {
        self.chain(|doc| {
            let line = doc.delete_line(i);
            doc.append_line(line);
        });
    }

    // -----------------------------------------------------------------------
    // Unrecorded primitives, shared with undo/redo replay
    // -----------------------------------------------------------------------

    pub(crate) fn raw_insert(&mut self, i: usize, line: String) {
        assert!(
            i <= self.lines.len(),
            "insert index {} out of range (len {})",
            i,
            self.lines.len()
        );
        self.lines.insert(i, line);
        self.modified = true;
    }

    pub(crate) fn raw_update(&mut self, i: usize, line: String) -> String {
        self.assert_index(i);
        self.modified = true;
        std::mem::replace(&mut self.lines[i], line)
    }

    pub(crate) fn raw_delete(&mut self, i: usize) -> String {
        self.assert_index(i);
        self.modified = true;
        self.lines.remove(i)
    }

    pub(crate) fn raw_swap(&mut self, i: usize, j: usize) {
        self.assert_index(i);
        self.assert_index(j);
        self.lines.swap(i, j);
        self.modified = true;
    }

    fn assert_index(&self, i: usize) {
        assert!(
            i < self.lines.len(),
            "line index {} out of range (len {})",
            i,
            self.lines.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Filter;
    use crate::ops::view;
    use pretty_assertions::assert_eq;

    fn doc(lines: &[&str]) -> Document {
        Document::from_lines(lines.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn new_document_is_empty() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.cursor(), 0);
        assert!(doc.selected_line().is_none());
        assert_eq!(doc.filter(), Filter::All);
        assert_eq!(doc.mode(), Mode::Task);
        assert!(!doc.is_modified());
    }

    #[test]
    fn inner_string_joins_lines() {
        assert_eq!(Document::new().inner_string(), "");
        assert_eq!(
            doc(&["Foo", "- [ ] Bar", "- [x] Baz"]).inner_string(),
            "Foo\n- [ ] Bar\n- [x] Baz\n"
        );
    }

    #[test]
    fn append_line() {
        let mut d = Document::new();
        d.append_line("- [ ] Foo");
        d.append_line("- [x] Bar");
        d.append_line("      Baz");
        assert_eq!(d.inner_string(), "- [ ] Foo\n- [x] Bar\n      Baz\n");
        assert!(d.is_modified());
    }

    #[test]
    fn insert_line() {
        let mut d = doc(&["- [ ] Foo", "- [ ] Bar", "- [x] Baz"]);
        d.insert_line(2, "- [x] Qux");
        d.insert_line(1, "## Xyz");
        assert_eq!(
            d.inner_string(),
            "- [ ] Foo\n## Xyz\n- [ ] Bar\n- [x] Qux\n- [x] Baz\n"
        );
    }

    #[test]
    fn delete_line_returns_content() {
        let mut d = doc(&["- [ ] Foo", "- [ ] Bar", "- [x] Baz"]);
        assert_eq!(d.delete_line(1), "- [ ] Bar");
        assert_eq!(d.inner_string(), "- [ ] Foo\n- [x] Baz\n");
    }

    #[test]
    fn swap_lines() {
        let mut d = doc(&["- [ ] Foo", "- [ ] Bar", "- [x] Baz"]);
        d.swap_lines(0, 2);
        assert_eq!(d.inner_string(), "- [x] Baz\n- [ ] Bar\n- [ ] Foo\n");
        d.swap_lines(1, 0);
        assert_eq!(d.inner_string(), "- [ ] Bar\n- [x] Baz\n- [ ] Foo\n");
    }

    #[test]
    fn update_with_same_text_records_nothing() {
        let mut d = doc(&["- [ ] Foo"]);
        d.update_line(0, "- [ ] Foo");
        assert!(!d.is_modified());
        assert_eq!(d.history().unwrap().len(), 0);

        d.update_line(0, "- [x] Foo");
        assert_eq!(d.history().unwrap().boundary(), 1);
        d.update_line(0, "- [x] Foo");
        assert_eq!(d.history().unwrap().boundary(), 1);
    }

    #[test]
    fn split_lines_by_char_offset() {
        let mut d = doc(&["- [ ] FooBar", "- [@] ФууБар"]);
        d.split_line(0, 9);
        assert_eq!(d.inner_string(), "- [ ] Foo\n- [ ] Bar\n- [@] ФууБар\n");
        d.split_line(2, 9);
        assert_eq!(d.inner_string(), "- [ ] Foo\n- [ ] Bar\n- [@] Фуу\nБар\n");
        d.split_line(3, 3);
        assert_eq!(d.inner_string(), "- [ ] Foo\n- [ ] Bar\n- [@] Фуу\nБар\n\n");
    }

    #[test]
    fn split_continues_with_filter_status() {
        let mut d = doc(&["- [x] FooBar", "- [ ] FooBaz"]);
        view::set_filter(&mut d, Filter::Closed);
        d.split_line(0, 9);
        assert_eq!(d.inner_string(), "- [x] Foo\n- [x] Bar\n- [ ] FooBaz\n");
        d.split_line(2, 9);
        assert_eq!(
            d.inner_string(),
            "- [x] Foo\n- [x] Bar\n- [ ] Foo\n- [x] Baz\n"
        );
    }

    #[test]
    fn split_is_one_chain() {
        let mut d = doc(&["- [ ] FooBar"]);
        let new_index = d.split_line(0, 9);
        assert_eq!(new_index, 1);
        let history = d.history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.last_applied().unwrap().changes.len(), 2);
    }

    #[test]
    fn split_at_end_of_line_is_an_insert_only() {
        let mut d = doc(&["Foo"]);
        d.split_line(0, 3);
        assert_eq!(d.lines(), ["Foo", ""]);
        let chain = d.history().unwrap().last_applied().unwrap();
        assert_eq!(chain.changes.len(), 1);
    }

    #[test]
    fn move_line_to_end() {
        let mut d = doc(&["- [ ] Foo", "- [ ] Bar", "- [x] Baz", "- [ ] Qux"]);
        d.move_line_to_end(1);
        assert_eq!(d.inner_string(), "- [ ] Foo\n- [x] Baz\n- [ ] Qux\n- [ ] Bar\n");
        d.move_line_to_end(3);
        assert_eq!(d.inner_string(), "- [ ] Foo\n- [x] Baz\n- [ ] Qux\n- [ ] Bar\n");
        assert_eq!(d.history().unwrap().len(), 2);
    }

    #[test]
    fn changes_capture_cursor_before_mutation() {
        let mut d = doc(&["a", "b", "c"]);
        d.cursor = 2;
        d.delete_line(0);
        let chain = d.history().unwrap().last_applied().unwrap();
        assert_eq!(chain.before().unwrap().cursor, 2);
    }

    #[test]
    fn without_history_records_nothing() {
        let mut d = Document::without_history(vec!["a".into()]);
        d.append_line("b");
        assert!(d.history().is_none());
        assert_eq!(d.lines(), ["a", "b"]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn delete_out_of_range_panics() {
        let mut d = doc(&["a"]);
        d.delete_line(1);
    }

    #[test]
    #[should_panic(expected = "split offset 4 out of range")]
    fn split_past_end_panics() {
        let mut d = doc(&["Foo"]);
        d.split_line(0, 4);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn insert_past_end_panics() {
        let mut d = doc(&["a"]);
        d.insert_line(2, "b");
    }
}
