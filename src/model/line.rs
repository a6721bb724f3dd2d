/// What a raw line is. Derived from the text every time, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `- [ ] description`
    Task,
    /// `<!-- payload -->`, used for archived lines
    Comment,
    /// Anything else: headings, notes, blank lines
    Normal,
}
