// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Play queue management.
//!
//! This module provides state for the play queue: an ordered list of track
//! identifiers and a pointer to the entry that is currently playing.
//!
//! The pointer is `Some` exactly when the queue has entries, and every
//! mutation keeps it addressing the same logical entry. Duplicate identifiers
//! are kept as given.

use rand::{rngs::StdRng, seq::SliceRandom};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayQueue {
    items: Vec<String>,
    pointer: Option<usize>,
}

impl PlayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the current contents and starts again from `items`.
    ///
    /// An empty `items` leaves the queue untouched.
    pub fn replace(&mut self, items: Vec<String>) {
        if items.is_empty() {
            return;
        }

        self.items = items;
        self.pointer = Some(0);
    }

    /// Splices `items` in as one block directly after the current entry.
    ///
    /// The current entry keeps its index, so the pointer does not move.
    pub fn insert_next(&mut self, items: Vec<String>) {
        if items.is_empty() {
            return;
        }

        match self.pointer {
            Some(pointer) => {
                let tail = self.items.split_off(pointer + 1);
                self.items.extend(items);
                self.items.extend(tail);
            }
            None => self.replace(items),
        }
    }

    /// Adds `items` after the last entry.
    pub fn append_last(&mut self, items: Vec<String>) {
        if items.is_empty() {
            return;
        }

        if self.items.is_empty() {
            self.replace(items);
        } else {
            self.items.extend(items);
        }
    }

    /// Same as [`PlayQueue::replace`], with `items` permuted by `rng` first.
    pub fn shuffle_replace(&mut self, mut items: Vec<String>, rng: &mut StdRng) {
        items.shuffle(rng);
        self.replace(items);
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.pointer = None;
    }

    /// The queue in playback order.
    pub fn queue(&self) -> &[String] {
        &self.items
    }

    pub fn pointer(&self) -> Option<usize> {
        self.pointer
    }

    /// The identifier of the entry the pointer addresses.
    pub fn current(&self) -> Option<&str> {
        self.pointer
            .and_then(|pointer| self.items.get(pointer))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
