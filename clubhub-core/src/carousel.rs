//! A fixed list of items with one active item.

use crate::cycle::CycleState;

/// Items bound together with their cyclic selection.
///
/// The item list is fixed at bind time. To change it, bind a new carousel.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    state: CycleState,
}

impl<T> Carousel<T> {
    pub fn bind(items: Vec<T>) -> Self {
        let state = CycleState::new(items.len());
        Carousel { items, state }
    }

    pub fn bind_at(items: Vec<T>, index: usize) -> Self {
        let state = CycleState::starting_at(items.len(), index);
        Carousel { items, state }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current()
    }

    pub fn current(&self) -> Option<&T> {
        self.state.current().and_then(|i| self.items.get(i))
    }

    pub fn next(&mut self) -> Option<&T> {
        self.state.next();
        self.current()
    }

    pub fn previous(&mut self) -> Option<&T> {
        self.state.previous();
        self.current()
    }

    /// Jump to a 1-based position, renormalizing out-of-range targets.
    pub fn goto(&mut self, target: i64) -> Option<&T> {
        self.state.goto(target);
        self.current()
    }

    pub fn step(&mut self, delta: i64) -> Option<&T> {
        self.state.step(delta);
        self.current()
    }

    /// Every item paired with whether it is the active one.
    /// Exactly one item is active unless the carousel is empty.
    pub fn marked(&self) -> impl Iterator<Item = (&T, bool)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (item, self.state.is_active(i)))
    }
}
