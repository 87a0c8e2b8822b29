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

//! Play queue control.
//!
//! The [`QueueController`] turns the current selection of a view into a new
//! play queue and keeps the `nowplaying` table in step with it.
//!
//! Every operation is a pair of an [`Expansion`] (which tracks the selection
//! stands for) and a [`Placement`] (where those tracks go in the queue). The
//! nine combinations offered to the user are named by [`QueueCommand`].
//!
//! # Consistency
//!
//! After every call the multiset of `file_id`s in the `nowplaying` table
//! equals the multiset in the queue. A call that fails leaves both exactly as
//! they were: the new queue is built on a copy and only kept once the table
//! has been written.

use std::{collections::HashSet, fmt, str::FromStr};

use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use thiserror::Error;

use crate::{
    db::LibraryStore,
    error::Result,
    model::{ColumnSpec, Field, PlayQueue, Table, TrackRow},
    selection::SelectionSource,
};

/// Which tracks a selection stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// The selected rows themselves.
    Direct,
    /// Every library track sharing a value of the field with a selected row.
    GroupBy(Field),
}

/// Where expanded tracks are put in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Replace the queue.
    Now,
    /// Insert directly after the current entry.
    Next,
    /// Append after the last entry.
    Last,
    /// Replace the queue, in random order.
    Shuffle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueCommand {
    PlayNow,
    QueueNext,
    QueueLast,
    PlayAllShuffled,
    PlayArtist,
    PlayAlbumNow,
    QueueAlbumNext,
    QueueAlbumLast,
    PlayGenre,
}

impl QueueCommand {
    pub const ALL: [QueueCommand; 9] = [
        QueueCommand::PlayNow,
        QueueCommand::QueueNext,
        QueueCommand::QueueLast,
        QueueCommand::PlayAllShuffled,
        QueueCommand::PlayArtist,
        QueueCommand::PlayAlbumNow,
        QueueCommand::QueueAlbumNext,
        QueueCommand::QueueAlbumLast,
        QueueCommand::PlayGenre,
    ];

    pub fn expansion(self) -> Expansion {
        match self {
            QueueCommand::PlayNow
            | QueueCommand::QueueNext
            | QueueCommand::QueueLast
            | QueueCommand::PlayAllShuffled => Expansion::Direct,
            QueueCommand::PlayArtist => Expansion::GroupBy(Field::Artist),
            QueueCommand::PlayAlbumNow
            | QueueCommand::QueueAlbumNext
            | QueueCommand::QueueAlbumLast => Expansion::GroupBy(Field::Album),
            QueueCommand::PlayGenre => Expansion::GroupBy(Field::Genre),
        }
    }

    pub fn placement(self) -> Placement {
        match self {
            QueueCommand::PlayNow
            | QueueCommand::PlayArtist
            | QueueCommand::PlayAlbumNow
            | QueueCommand::PlayGenre => Placement::Now,
            QueueCommand::QueueNext | QueueCommand::QueueAlbumNext => Placement::Next,
            QueueCommand::QueueLast | QueueCommand::QueueAlbumLast => Placement::Last,
            QueueCommand::PlayAllShuffled => Placement::Shuffle,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QueueCommand::PlayNow => "play-now",
            QueueCommand::QueueNext => "queue-next",
            QueueCommand::QueueLast => "queue-last",
            QueueCommand::PlayAllShuffled => "play-all-shuffled",
            QueueCommand::PlayArtist => "play-artist",
            QueueCommand::PlayAlbumNow => "play-album-now",
            QueueCommand::QueueAlbumNext => "queue-album-next",
            QueueCommand::QueueAlbumLast => "queue-album-last",
            QueueCommand::PlayGenre => "play-genre",
        }
    }
}

impl fmt::Display for QueueCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown queue command '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for QueueCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        QueueCommand::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// Owns one session's play queue and drives its `nowplaying` mirror.
///
/// Callers serialize access; nothing here locks.
pub struct QueueController<S, V> {
    store: S,
    selection: V,
    queue: PlayQueue,
    rng: StdRng,
}

impl<S: LibraryStore, V: SelectionSource> QueueController<S, V> {
    /// Starts a session with an empty queue, shuffling from a random seed.
    pub fn new(store: S, selection: V) -> Result<Self> {
        Self::with_rng(store, selection, StdRng::from_rng(&mut rand::rng()))
    }

    /// Starts a session with an empty queue, shuffling with `rng`.
    ///
    /// Any rows left in the mirror by an earlier session are removed.
    pub fn with_rng(mut store: S, selection: V, rng: StdRng) -> Result<Self> {
        store.clear_table(Table::NowPlaying)?;

        Ok(Self {
            store,
            selection,
            queue: PlayQueue::new(),
            rng,
        })
    }

    /// Replaces the queue with the selected tracks.
    pub fn play_now(&mut self) -> Result<Vec<String>> {
        self.execute(QueueCommand::PlayNow)
    }

    /// Inserts the selected tracks after the current entry.
    pub fn queue_next(&mut self) -> Result<Vec<String>> {
        self.execute(QueueCommand::QueueNext)
    }

    /// Appends the selected tracks to the queue.
    pub fn queue_last(&mut self) -> Result<Vec<String>> {
        self.execute(QueueCommand::QueueLast)
    }

    /// Replaces the queue with the selected tracks in random order.
    pub fn play_all_shuffled(&mut self) -> Result<Vec<String>> {
        self.execute(QueueCommand::PlayAllShuffled)
    }

    /// Replaces the queue with every track by the selected artists.
    pub fn play_artist(&mut self) -> Result<Vec<String>> {
        self.execute(QueueCommand::PlayArtist)
    }

    /// Replaces the queue with every track on the selected albums.
    pub fn play_album_now(&mut self) -> Result<Vec<String>> {
        self.execute(QueueCommand::PlayAlbumNow)
    }

    /// Inserts every track on the selected albums after the current entry.
    pub fn queue_album_next(&mut self) -> Result<Vec<String>> {
        self.execute(QueueCommand::QueueAlbumNext)
    }

    /// Appends every track on the selected albums to the queue.
    pub fn queue_album_last(&mut self) -> Result<Vec<String>> {
        self.execute(QueueCommand::QueueAlbumLast)
    }

    /// Replaces the queue with every track in the selected genres.
    pub fn play_genre(&mut self) -> Result<Vec<String>> {
        self.execute(QueueCommand::PlayGenre)
    }

    /// Applies `command` to the current selection and returns the new queue.
    ///
    /// An empty selection, or an expansion that matches nothing, leaves the
    /// queue and the mirror unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Store`] if the store cannot be read during
    /// expansion or written during the mirror update. Neither the queue nor
    /// the mirror is changed in that case.
    pub fn execute(&mut self, command: QueueCommand) -> Result<Vec<String>> {
        let selected = self.selection.selected_rows();
        if selected.is_empty() {
            debug!("{command}: empty selection");
            return Ok(self.queue().to_vec());
        }

        let tracks = match command.expansion() {
            Expansion::Direct => selected,
            Expansion::GroupBy(field) => self.expand_group(field)?,
        };
        if tracks.is_empty() {
            debug!("{command}: selection matched no library tracks");
            return Ok(self.queue().to_vec());
        }

        let file_ids: Vec<String> = tracks.iter().map(|row| row.file_id.clone()).collect();

        let mut queue = self.queue.clone();
        let placement = command.placement();
        match placement {
            Placement::Now => queue.replace(file_ids),
            Placement::Next => queue.insert_next(file_ids),
            Placement::Last => queue.append_last(file_ids),
            Placement::Shuffle => queue.shuffle_replace(file_ids, &mut self.rng),
        }

        match placement {
            Placement::Now | Placement::Shuffle => {
                self.store.replace_table(Table::NowPlaying, &tracks)?
            }
            Placement::Next | Placement::Last => {
                self.store.batch_insert(Table::NowPlaying, &tracks)?
            }
        }

        self.queue = queue;

        info!(
            "{command}: {} tracks, queue length {}",
            tracks.len(),
            self.queue.len()
        );

        Ok(self.queue().to_vec())
    }

    /// Empties the queue and the mirror.
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear_table(Table::NowPlaying)?;
        self.queue.clear();

        Ok(())
    }

    /// The queue in playback order.
    pub fn queue(&self) -> &[String] {
        self.queue.queue()
    }

    /// The `file_id` at the queue pointer.
    pub fn current(&self) -> Option<&str> {
        self.queue.current()
    }

    pub fn pointer(&self) -> Option<usize> {
        self.queue.pointer()
    }

    /// Values of `field` for every row in the mirror.
    ///
    /// Row order is unrelated to queue order.
    pub fn mirror_field(&self, field: Field) -> Result<Vec<String>> {
        self.store.select_field(Table::NowPlaying, field)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn selection(&self) -> &V {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut V {
        &mut self.selection
    }

    /// Every library track whose `field` matches a selected row.
    ///
    /// Distinct values are taken in order of first appearance in the
    /// selection; tracks for each value keep the store's order.
    fn expand_group(&self, field: Field) -> Result<Vec<TrackRow>> {
        let schema = self.store.field_schema();
        let Some(values) = self
            .selection
            .column_selection(schema, &ColumnSpec::from(field))
        else {
            warn!("Field {} is not in the library schema", field.name());
            return Ok(vec![]);
        };

        let mut seen = HashSet::new();
        let mut tracks = Vec::new();
        for value in values {
            if !seen.insert(value.clone()) {
                continue;
            }

            let matches = self.store.select_rows_where(field, &value)?;
            if matches.is_empty() {
                debug!("No library tracks with {} = {value:?}", field.name());
            }
            tracks.extend(matches);
        }

        Ok(tracks)
    }
}
