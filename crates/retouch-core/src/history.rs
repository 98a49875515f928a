//! Undo/redo history of buffer snapshots.
//!
//! The manager keeps two stacks of deep-copied [`PixelBuffer`]s, newest at
//! the back. It never holds the current image; callers pass it in on
//! `undo`/`redo` and get the buffer to display back.
//!
//! ```text
//! save(A), save(B)        undo: [A, B]   redo: []
//! undo(C) -> B            undo: [A]      redo: [C]
//! save(B')                undo: [A, B']  redo: []   <- new edit drops redo
//! ```
//!
//! # Invariants
//!
//! 1. `save` always clears the redo stack
//! 2. With a capacity, `undo_len() <= capacity` after every call
//! 3. `memory_usage` equals the byte size of every held snapshot

use std::collections::VecDeque;
use std::fmt;

use log::trace;

use crate::buffer::PixelBuffer;

/// Which of the two stacks currently hold entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    Empty,
    HasUndo,
    HasRedo,
    Both,
}

/// Undo and redo stacks of buffer snapshots.
#[derive(Clone, Default)]
pub struct HistoryManager {
    undo_stack: VecDeque<PixelBuffer>,
    redo_stack: VecDeque<PixelBuffer>,
    /// Maximum undo depth; `None` is unbounded.
    capacity: Option<usize>,
}

impl fmt::Debug for HistoryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryManager")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("memory_usage", &self.memory_usage())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl HistoryManager {
    /// Create an unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `capacity` undo steps, evicting
    /// the oldest when full. A capacity of 0 keeps nothing.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Record a snapshot of `buffer` as the newest undo step.
    ///
    /// This clears the redo stack.
    pub fn save(&mut self, buffer: &PixelBuffer) {
        self.redo_stack.clear();
        self.undo_stack.push_back(buffer.clone());

        if let Some(capacity) = self.capacity {
            while self.undo_stack.len() > capacity {
                self.undo_stack.pop_front();
                trace!("History full, evicted oldest snapshot");
            }
        }
    }

    /// Step back one edit.
    ///
    /// Pops the newest undo snapshot and returns it, pushing `current` onto
    /// the redo stack. With nothing to undo, `current` is returned unchanged.
    #[must_use = "the returned buffer replaces the current image"]
    pub fn undo(&mut self, current: PixelBuffer) -> PixelBuffer {
        match self.undo_stack.pop_back() {
            Some(previous) => {
                self.redo_stack.push_back(current);
                previous
            }
            None => current,
        }
    }

    /// Re-apply the most recently undone edit. Mirror image of [`undo`].
    ///
    /// [`undo`]: HistoryManager::undo
    #[must_use = "the returned buffer replaces the current image"]
    pub fn redo(&mut self, current: PixelBuffer) -> PixelBuffer {
        match self.redo_stack.pop_back() {
            Some(next) => {
                self.undo_stack.push_back(current);
                next
            }
            None => current,
        }
    }

    /// Drop every snapshot on both stacks.
    pub fn reset(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Total pixel bytes held across both stacks.
    pub fn memory_usage(&self) -> usize {
        self.undo_stack
            .iter()
            .chain(self.redo_stack.iter())
            .map(PixelBuffer::byte_size)
            .sum()
    }

    pub fn state(&self) -> HistoryState {
        match (self.can_undo(), self.can_redo()) {
            (false, false) => HistoryState::Empty,
            (true, false) => HistoryState::HasUndo,
            (false, true) => HistoryState::HasRedo,
            (true, true) => HistoryState::Both,
        }
    }
}
