//! Cyclic selection: which one of N items is active.
//!
//! `CycleState` is pure index bookkeeping shared by the slideshow, the
//! lightbox and the calendar month pointer. It never renders anything;
//! callers translate the active index into visible UI state.

use serde::{Deserialize, Serialize};

/// The active position among a fixed number of items.
///
/// The item count is fixed when the state is created. An empty state
/// (`count == 0`) has no active index and ignores every navigation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleState {
    count: usize,
    index: usize,
}

impl CycleState {
    /// Bind to `count` items, starting at the first one.
    pub fn new(count: usize) -> Self {
        CycleState { count, index: 0 }
    }

    /// Bind to `count` items, starting at `index` (wrapped into range).
    pub fn starting_at(count: usize, index: usize) -> Self {
        let index = if count == 0 { 0 } else { index % count };
        CycleState { count, index }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The active 0-based index, or `None` when there are no items.
    pub fn current(&self) -> Option<usize> {
        (self.count > 0).then_some(self.index)
    }

    /// The active 1-based position, matching what `goto` accepts.
    pub fn position(&self) -> Option<usize> {
        self.current().map(|i| i + 1)
    }

    /// Advance by one, wrapping from the last item to the first.
    pub fn next(&mut self) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        self.index = (self.index + 1) % self.count;
        Some(self.index)
    }

    /// Step back by one, wrapping from the first item to the last.
    pub fn previous(&mut self) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        self.index = (self.index + self.count - 1) % self.count;
        Some(self.index)
    }

    /// Jump to a 1-based position.
    ///
    /// Out-of-range targets are renormalized instead of rejected: anything
    /// above `count` lands on 1, anything below 1 lands on `count`.
    /// Returns the resulting 1-based position.
    pub fn goto(&mut self, target: i64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let count = self.count as i64;
        let position = if target > count {
            1
        } else if target < 1 {
            count
        } else {
            target
        };
        self.index = (position - 1) as usize;
        Some(position as usize)
    }

    /// Step by a signed offset, as a dot strip's "plus slides" does.
    /// A step of +1/-1 wraps exactly like `next`/`previous`.
    pub fn step(&mut self, delta: i64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let count = self.count as i64;
        self.index = (self.index as i64 + delta.rem_euclid(count)).rem_euclid(count) as usize;
        Some(self.index)
    }

    /// Whether `index` is the active item.
    pub fn is_active(&self, index: usize) -> bool {
        self.current() == Some(index)
    }

    /// Whether the last navigation wrapped back to the first item.
    pub(crate) fn at_start(&self) -> bool {
        self.count > 0 && self.index == 0
    }

    /// Whether the active item is the last one.
    pub(crate) fn at_end(&self) -> bool {
        self.count > 0 && self.index == self.count - 1
    }
}
