//! Per-screen undo/redo history.
//!
//! One [`HistoryStore`] serves all three screens. Each screen keeps its own
//! current layout plus bounded `past`/`future` stacks; switching the active
//! screen never clears or merges another screen's history.
//!
//! Callers must route only genuine edits through [`HistoryStore::commit`]:
//! editor output caused by an undo or redo must not re-enter history. All
//! transitions are synchronous and snapshot `past`/`future` together with
//! the value swap, so a commit can never interleave with another transition
//! on the same store.

use std::collections::{HashMap, VecDeque};

use crate::constants::HISTORY_DEPTH;
use crate::models::{Layout, Screen};

/// Undo/redo state for a single screen.
#[derive(Debug, Clone, Default)]
struct ScreenHistory {
    /// Layout currently on the canvas. `None` before the first edit.
    current: Layout,
    /// Previous snapshots, oldest first. Bounded by [`HISTORY_DEPTH`].
    past: VecDeque<Layout>,
    /// Undone snapshots, next-redo first. Bounded by [`HISTORY_DEPTH`].
    future: VecDeque<Layout>,
}

impl ScreenHistory {
    fn commit(&mut self, new_layout: String) {
        self.past.push_back(self.current.take());
        while self.past.len() > HISTORY_DEPTH {
            self.past.pop_front();
        }
        self.future.clear();
        self.current = Some(new_layout);
    }

    fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        self.future.push_front(self.current.take());
        while self.future.len() > HISTORY_DEPTH {
            self.future.pop_back();
        }
        self.current = previous;
        true
    }

    fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        self.past.push_back(self.current.take());
        self.current = next;
        true
    }
}

/// Independent undo/redo stacks for every screen, keyed by screen id.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    screens: HashMap<Screen, ScreenHistory>,
}

impl HistoryStore {
    /// Creates an empty store; every screen starts with no layout and no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn screen(&self, screen: Screen) -> Option<&ScreenHistory> {
        self.screens.get(&screen)
    }

    fn screen_mut(&mut self, screen: Screen) -> &mut ScreenHistory {
        self.screens.entry(screen).or_default()
    }

    /// Current layout of a screen.
    #[must_use]
    pub fn current(&self, screen: Screen) -> &Layout {
        const EMPTY: &Layout = &None;
        self.screen(screen).map_or(EMPTY, |h| &h.current)
    }

    /// Records an edit: pushes the current layout onto `past` (evicting the
    /// oldest beyond the cap), clears `future`, and makes `new_layout` current.
    ///
    /// Must not be called for layouts produced by [`Self::undo`] or
    /// [`Self::redo`] themselves.
    pub fn commit(&mut self, screen: Screen, new_layout: String) {
        self.screen_mut(screen).commit(new_layout);
    }

    /// Steps a screen back one edit. Returns `false` (and changes nothing)
    /// when there is nothing to undo.
    pub fn undo(&mut self, screen: Screen) -> bool {
        self.screen_mut(screen).undo()
    }

    /// Steps a screen forward one undone edit. Returns `false` (and changes
    /// nothing) when there is nothing to redo.
    pub fn redo(&mut self, screen: Screen) -> bool {
        self.screen_mut(screen).redo()
    }

    /// Whether an undo would change the screen. Side-effect free.
    #[must_use]
    pub fn can_undo(&self, screen: Screen) -> bool {
        self.screen(screen).is_some_and(|h| !h.past.is_empty())
    }

    /// Whether a redo would change the screen. Side-effect free.
    #[must_use]
    pub fn can_redo(&self, screen: Screen) -> bool {
        self.screen(screen).is_some_and(|h| !h.future.is_empty())
    }
}
