//! Current-match pointer with cyclic navigation.

/// Position of the emphasized match within a match list.
///
/// Either `Empty` (no matches, sentinel index) or positioned at an index in
/// `0..match_count`. Navigation wraps at both ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationCursor {
    current: Option<usize>,
    match_count: usize,
}

impl NavigationCursor {
    /// Create a cursor in the `Empty` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the previous position and point at the first of `match_count` matches.
    ///
    /// Returns the new index, or `None` when there are no matches.
    pub fn reset(&mut self, match_count: usize) -> Option<usize> {
        self.match_count = match_count;
        self.current = (match_count > 0).then_some(0);
        self.current
    }

    /// Move to the next match, wrapping from last to first.
    ///
    /// No-op returning `None` in the `Empty` state.
    pub fn next(&mut self) -> Option<usize> {
        let current = self.current?;
        let next = (current + 1) % self.match_count;
        self.current = Some(next);
        Some(next)
    }

    /// Move to the previous match, wrapping from first to last.
    ///
    /// No-op returning `None` in the `Empty` state.
    pub fn previous(&mut self) -> Option<usize> {
        let current = self.current?;
        let previous = if current == 0 {
            self.match_count - 1
        } else {
            current - 1
        };
        self.current = Some(previous);
        Some(previous)
    }

    /// Index of the current match, `None` when empty.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Current index with `-1` as the empty sentinel.
    pub fn current_or_sentinel(&self) -> isize {
        self.current.map_or(-1, |i| i as isize)
    }

    pub fn match_count(&self) -> usize {
        self.match_count
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cursor_ignores_navigation() {
        let mut cursor = NavigationCursor::new();
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.previous(), None);
        assert_eq!(cursor.current_or_sentinel(), -1);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_next_wraps_to_first() {
        let mut cursor = NavigationCursor::new();
        assert_eq!(cursor.reset(3), Some(0));
        assert_eq!(cursor.next(), Some(1));
        assert_eq!(cursor.next(), Some(2));
        assert_eq!(cursor.next(), Some(0));
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut cursor = NavigationCursor::new();
        cursor.reset(3);
        assert_eq!(cursor.previous(), Some(2));
        assert_eq!(cursor.previous(), Some(1));
    }

    #[test]
    fn test_single_match_stays_put() {
        let mut cursor = NavigationCursor::new();
        cursor.reset(1);
        assert_eq!(cursor.next(), Some(0));
        assert_eq!(cursor.previous(), Some(0));
    }

    #[test]
    fn test_reset_discards_position() {
        let mut cursor = NavigationCursor::new();
        cursor.reset(5);
        cursor.next();
        cursor.next();
        assert_eq!(cursor.reset(4), Some(0));
        assert_eq!(cursor.reset(0), None);
        assert_eq!(cursor.match_count(), 0);
        assert_eq!(cursor.next(), None);
    }
}
