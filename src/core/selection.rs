/// Which catalog entry has focus

/// A move from one entry to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
}

/// Current and previous index into the catalog.
///
/// `current` is always in `0..len`. Moves to the same index or out of range
/// are not transitions and leave the state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    current: usize,
    previous: usize,
    len: usize,
}

impl SelectionState {
    /// Starts on the first entry. `len` must be non-zero.
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0, "selection over an empty catalog");
        Self {
            current: 0,
            previous: 0,
            len,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Entry whose persistent description was restored last
    pub fn previous(&self) -> usize {
        self.previous
    }

    pub fn select(&mut self, index: usize) -> Option<Transition> {
        if index >= self.len || index == self.current {
            return None;
        }
        self.previous = self.current;
        self.current = index;
        Some(Transition {
            from: self.previous,
            to: self.current,
        })
    }

    pub fn next(&mut self) -> Option<Transition> {
        self.select(self.current + 1)
    }

    pub fn prev(&mut self) -> Option<Transition> {
        self.current.checked_sub(1).and_then(|index| self.select(index))
    }

    pub fn first(&mut self) -> Option<Transition> {
        self.select(0)
    }

    pub fn last(&mut self) -> Option<Transition> {
        self.select(self.len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_between_neighbours() {
        let mut selection = SelectionState::new(4);

        assert_eq!(selection.next(), Some(Transition { from: 0, to: 1 }));
        assert_eq!(selection.next(), Some(Transition { from: 1, to: 2 }));
        assert_eq!(selection.prev(), Some(Transition { from: 2, to: 1 }));
        assert_eq!(selection.previous(), 2);
        assert_eq!(selection.current(), 1);
    }

    #[test]
    fn test_clamps_at_edges() {
        let mut selection = SelectionState::new(4);
        assert_eq!(selection.prev(), None);

        assert_eq!(selection.last(), Some(Transition { from: 0, to: 3 }));
        assert_eq!(selection.next(), None);
        assert_eq!(selection.current(), 3);
    }

    #[test]
    fn test_same_or_out_of_range_index_is_ignored() {
        let mut selection = SelectionState::new(4);
        selection.select(2);

        assert_eq!(selection.select(2), None);
        assert_eq!(selection.select(9), None);
        assert_eq!(selection.current(), 2);
        assert_eq!(selection.previous(), 0);
    }
}
