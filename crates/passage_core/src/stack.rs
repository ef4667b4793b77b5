//! Navigation stack
//!
//! Ordered history of routes. The first entry is always [`Route::Sentinel`]
//! and can never be removed, so the stack is never truly empty: "empty" means
//! nothing but the sentinel remains.

use crate::route::{Route, Screen};

/// Ordered navigation history with a permanent sentinel root
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationStack<S> {
    entries: Vec<Route<S>>,
}

impl<S: Screen> NavigationStack<S> {
    pub fn new() -> Self {
        Self {
            entries: vec![Route::Sentinel],
        }
    }

    /// Push `screen` on top unless it already is the current entry
    ///
    /// Returns `true` if the stack changed. Pushing a screen that sits lower in
    /// the stack adds a second entry for it.
    pub fn push(&mut self, screen: S) -> bool {
        if *self.current() == screen {
            return false;
        }
        self.entries.push(Route::Screen(screen));
        true
    }

    /// Remove the top entry unless only the sentinel remains
    pub fn pop(&mut self) -> Option<Route<S>> {
        if self.is_empty() {
            return None;
        }
        self.entries.pop()
    }

    /// The top entry
    pub fn current(&self) -> &Route<S> {
        // The sentinel is never removed, so the last entry always exists
        &self.entries[self.entries.len() - 1]
    }

    /// The entry directly below the top, if any
    pub fn previous(&self) -> Option<&Route<S>> {
        self.entries
            .len()
            .checked_sub(2)
            .and_then(|index| self.entries.get(index))
    }

    /// Number of entries including the sentinel
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when only the sentinel remains
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }

    /// True when at least one application screen is stacked
    pub fn is_not_empty(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn contains(&self, route: &Route<S>) -> bool {
        self.entries.contains(route)
    }

    /// Entries from the sentinel (bottom) to the current screen (top)
    pub fn iter(&self) -> impl Iterator<Item = &Route<S>> + '_ {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Route<S>] {
        &self.entries
    }
}

impl<S: Screen> Default for NavigationStack<S> {
    fn default() -> Self {
        Self::new()
    }
}
