use super::task::Filter;

/// Maximum number of chains kept in history
pub const HISTORY_LIMIT: usize = 500;

/// Interactive state captured around an edit so undo/redo can put the user
/// back where they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    pub cursor: usize,
    pub filter: Filter,
}

/// A single primitive line mutation, with enough data to invert it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// `line` was inserted at `index`
    Insert { index: usize, line: String },
    /// `line` was removed from `index`
    Delete { index: usize, line: String },
    /// Line `index` went from `old_line` to `new_line`
    Update {
        index: usize,
        old_line: String,
        new_line: String,
    },
    /// Lines `a` and `b` traded places
    Swap { a: usize, b: usize },
}

/// A change plus the cursor/filter just before it was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedChange {
    pub change: Change,
    pub before: CursorState,
}

/// One user-visible edit: every change it made, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    pub changes: Vec<RecordedChange>,
    /// Cursor/filter at the moment this chain was last undone
    pub redo_state: Option<CursorState>,
}

impl Chain {
    /// State before the first change of the chain
    pub fn before(&self) -> Option<CursorState> {
        self.changes.first().map(|rc| rc.before)
    }
}

/// Linear undo history.
///
/// `boundary` counts the chains currently applied: chains before it can be
/// undone, chains from it onwards can be redone. Recording anything while
/// redo chains exist throws them away.
#[derive(Debug, Default)]
pub struct History {
    chains: Vec<Chain>,
    boundary: usize,
    open: Option<Chain>,
    depth: usize,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// Record a change into the open chain, or as a chain of its own.
    pub fn record(&mut self, change: Change, before: CursorState) {
        self.chains.truncate(self.boundary);
        let recorded = RecordedChange { change, before };
        match self.open.as_mut() {
            Some(chain) => chain.changes.push(recorded),
            None => self.push_chain(Chain {
                changes: vec![recorded],
                redo_state: None,
            }),
        }
    }

    /// Open a chain. Calls nest; only the outermost commit closes the chain.
    pub fn start_chain(&mut self) {
        if self.depth == 0 {
            self.open = Some(Chain::default());
        }
        self.depth += 1;
    }

    /// Close the chain opened by the matching `start_chain`.
    pub fn commit_chain(&mut self) {
        assert!(self.depth > 0, "commit_chain without start_chain");
        self.depth -= 1;
        if self.depth == 0
            && let Some(chain) = self.open.take()
            && !chain.changes.is_empty()
        {
            self.push_chain(chain);
        }
    }

    pub fn is_chain_open(&self) -> bool {
        self.depth > 0
    }

    fn push_chain(&mut self, chain: Chain) {
        self.chains.truncate(self.boundary);
        self.chains.push(chain);
        if self.chains.len() > HISTORY_LIMIT {
            self.chains.drain(..self.chains.len() - HISTORY_LIMIT);
        }
        self.boundary = self.chains.len();
    }

    /// Move the boundary back one chain and hand out the chain to revert.
    pub fn step_back(&mut self) -> Option<&mut Chain> {
        assert!(!self.is_chain_open(), "undo while a chain is open");
        if self.boundary == 0 {
            return None;
        }
        self.boundary -= 1;
        self.chains.get_mut(self.boundary)
    }

    /// Move the boundary forward one chain and hand out the chain to reapply.
    pub fn step_forward(&mut self) -> Option<&mut Chain> {
        assert!(!self.is_chain_open(), "redo while a chain is open");
        if self.boundary == self.chains.len() {
            return None;
        }
        self.boundary += 1;
        self.chains.get_mut(self.boundary - 1)
    }

    pub fn can_undo(&self) -> bool {
        self.boundary > 0
    }

    pub fn can_redo(&self) -> bool {
        self.boundary < self.chains.len()
    }

    /// Number of chains currently applied
    pub fn boundary(&self) -> usize {
        self.boundary
    }

    /// Number of chains stored (applied and undone)
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Peek at the most recently applied chain
    pub fn last_applied(&self) -> Option<&Chain> {
        self.boundary.checked_sub(1).and_then(|i| self.chains.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(cursor: usize) -> CursorState {
        CursorState {
            cursor,
            filter: Filter::All,
        }
    }

    fn insert(index: usize, line: &str) -> Change {
        Change::Insert {
            index,
            line: line.into(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.last_applied().is_none());
    }

    #[test]
    fn record_outside_chain_makes_single_change_chains() {
        let mut history = History::new();
        history.record(insert(0, "a"), state(0));
        history.record(insert(1, "b"), state(0));
        assert_eq!(history.len(), 2);
        assert_eq!(history.boundary(), 2);
    }

    #[test]
    fn chain_groups_changes() {
        let mut history = History::new();
        history.start_chain();
        history.record(insert(0, "a"), state(3));
        history.record(insert(1, "b"), state(4));
        assert_eq!(history.len(), 0);
        history.commit_chain();
        assert_eq!(history.len(), 1);
        let chain = history.last_applied().unwrap();
        assert_eq!(chain.changes.len(), 2);
        assert_eq!(chain.before(), Some(state(3)));
    }

    #[test]
    fn nested_chains_close_at_outermost_commit() {
        let mut history = History::new();
        history.start_chain();
        history.record(insert(0, "a"), state(0));
        history.start_chain();
        history.record(insert(1, "b"), state(0));
        history.commit_chain();
        assert!(history.is_chain_open());
        history.commit_chain();
        assert!(!history.is_chain_open());
        assert_eq!(history.len(), 1);
        assert_eq!(history.last_applied().unwrap().changes.len(), 2);
    }

    #[test]
    fn empty_chain_is_discarded() {
        let mut history = History::new();
        history.start_chain();
        history.commit_chain();
        assert!(history.is_empty());
    }

    #[test]
    fn stepping_moves_the_boundary() {
        let mut history = History::new();
        history.record(insert(0, "a"), state(0));
        history.record(insert(1, "b"), state(1));
        assert!(history.step_back().is_some());
        assert_eq!(history.boundary(), 1);
        assert!(history.step_back().is_some());
        assert!(history.step_back().is_none());
        assert_eq!(history.boundary(), 0);
        assert!(history.step_forward().is_some());
        assert!(history.step_forward().is_some());
        assert!(history.step_forward().is_none());
        assert_eq!(history.boundary(), 2);
    }

    #[test]
    fn recording_after_undo_discards_redo() {
        let mut history = History::new();
        history.record(insert(0, "a"), state(0));
        history.record(insert(1, "b"), state(1));
        history.step_back();
        assert!(history.can_redo());
        history.record(insert(1, "c"), state(1));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(
            history.last_applied().unwrap().changes[0].change,
            insert(1, "c")
        );
    }

    #[test]
    fn history_is_capped() {
        let mut history = History::new();
        for i in 0..HISTORY_LIMIT + 10 {
            history.record(insert(i, "x"), state(0));
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.boundary(), HISTORY_LIMIT);
        assert_eq!(
            history.last_applied().unwrap().changes[0].change,
            insert(HISTORY_LIMIT + 9, "x")
        );
    }
}
