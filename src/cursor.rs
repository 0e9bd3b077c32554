//! Wraparound selection cursor over the window list.
//!
//! The cursor is independent of how the selection changes (key events,
//! forwarded IPC commands, or the initial CLI cue) and lives for the
//! process lifetime.

/// Cyclic cursor over a sequence of fixed length.
///
/// When the sequence is empty every operation is a no-op and
/// [`index`](CycleCursor::index) reports `None`; otherwise the index always
/// stays in `[0, count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleCursor {
    index: usize,
    count: usize,
}

impl CycleCursor {
    pub fn new(count: usize) -> Self {
        CycleCursor { index: 0, count }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current selection index, or `None` when there is nothing to select.
    pub fn index(&self) -> Option<usize> {
        (self.count > 0).then_some(self.index)
    }

    /// Move the selection by `step` (+1 or -1) with wraparound: past the
    /// end wraps to 0, before the start wraps to `count - 1`.
    ///
    /// Returns the new index.
    pub fn advance(&mut self, step: i64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }

        let mut next = self.index as i64 + step;
        if next >= self.count as i64 {
            next = 0;
        } else if next < 0 {
            next = self.count as i64 - 1;
        }
        self.index = next as usize;

        Some(self.index)
    }

    /// Set the selection directly. An out-of-range index resets to 0
    /// rather than clamping to the last entry; this matches the behavior
    /// the rest of the tool was built against.
    pub fn set_to(&mut self, index: usize) -> Option<usize> {
        if self.count == 0 {
            return None;
        }

        self.index = if index >= self.count { 0 } else { index };

        Some(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cursor_is_inert() {
        let mut cursor = CycleCursor::new(0);
        assert!(cursor.is_empty());
        assert_eq!(cursor.index(), None);
        assert_eq!(cursor.advance(1), None);
        assert_eq!(cursor.advance(-1), None);
        assert_eq!(cursor.set_to(0), None);
    }

    #[test]
    fn test_starts_at_zero() {
        let cursor = CycleCursor::new(3);
        assert_eq!(cursor.index(), Some(0));
    }

    #[test]
    fn test_wrap_forward() {
        // Index 2 of count 3, advance(+1) wraps to 0.
        let mut cursor = CycleCursor::new(3);
        cursor.set_to(2);
        assert_eq!(cursor.advance(1), Some(0));
    }

    #[test]
    fn test_wrap_backward() {
        // Index 0 of count 3, advance(-1) wraps to 2.
        let mut cursor = CycleCursor::new(3);
        assert_eq!(cursor.advance(-1), Some(2));
    }

    #[test]
    fn test_advance_stays_in_range() {
        let mut cursor = CycleCursor::new(4);
        let steps = [1, 1, -1, 1, 1, 1, 1, -1, -1, -1, -1, -1, 1];
        for step in steps {
            let index = cursor.advance(step).unwrap();
            assert!(index < 4);
            assert_eq!(cursor.index(), Some(index));
        }
    }

    #[test]
    fn test_single_entry_always_zero() {
        let mut cursor = CycleCursor::new(1);
        for step in [1, 1, -1, -1, 1] {
            assert_eq!(cursor.advance(step), Some(0));
        }
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut cursor = CycleCursor::new(3);
        cursor.advance(1);
        cursor.advance(1);
        cursor.advance(1);
        assert_eq!(cursor.index(), Some(0));
    }

    #[test]
    fn test_set_to_in_range() {
        let mut cursor = CycleCursor::new(3);
        assert_eq!(cursor.set_to(2), Some(2));
    }

    #[test]
    fn test_set_to_overflow_resets_to_zero() {
        // Out-of-range set resets to 0, not count - 1.
        let mut cursor = CycleCursor::new(3);
        cursor.set_to(1);
        assert_eq!(cursor.set_to(3), Some(0));
        cursor.set_to(1);
        assert_eq!(cursor.set_to(100), Some(0));
    }
}
