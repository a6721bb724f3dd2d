use crate::util::unicode::{char_count, char_to_byte};

/// Single-line text input. The caret is a char index in `0..=len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEditor {
    text: String,
    caret: usize,
}

impl LineEditor {
    /// Editor over `text` with the caret clamped into range
    pub fn new(text: impl Into<String>, caret: usize) -> Self {
        let text = text.into();
        let caret = caret.min(char_count(&text));
        LineEditor { text, caret }
    }

    /// Editor with the caret after the last char
    pub fn at_end(text: impl Into<String>) -> Self {
        Self::new(text, usize::MAX)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn len(&self) -> usize {
        char_count(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.len());
    }

    /// Replace the text; the caret is clamped to the new length
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.set_caret(self.caret);
    }

    pub fn insert_char(&mut self, c: char) {
        let at = char_to_byte(&self.text, self.caret);
        self.text.insert(at, c);
        self.caret += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        let at = char_to_byte(&self.text, self.caret);
        self.text.insert_str(at, s);
        self.caret += char_count(s);
    }

    /// Delete the char before the caret. False at column 0.
    pub fn backspace(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        self.caret -= 1;
        let at = char_to_byte(&self.text, self.caret);
        self.text.remove(at);
        true
    }

    /// Delete `n` chars before the caret
    pub fn backspace_n(&mut self, n: usize) {
        let n = n.min(self.caret);
        let end = char_to_byte(&self.text, self.caret);
        let start = char_to_byte(&self.text, self.caret - n);
        self.text.replace_range(start..end, "");
        self.caret -= n;
    }

    /// Delete the char under the caret
    pub fn delete(&mut self) -> bool {
        if self.caret >= self.len() {
            return false;
        }
        let at = char_to_byte(&self.text, self.caret);
        self.text.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.set_caret(self.caret + 1);
    }

    pub fn home(&mut self) {
        self.caret = 0;
    }

    pub fn end(&mut self) {
        self.caret = self.len();
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
