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

//! # Now-playing queue manager.
//!
//! The core of a desktop music library: it turns the rows selected in a
//! table view into an ordered play queue, keeps the queue's current entry
//! stable while the queue is edited, and mirrors the queue's metadata into a
//! `nowplaying` table for per-field lookups.
//!
//! ## Architecture
//!
//! * [`selection`] exposes the selected rows and columns of a view.
//! * [`db`] is the SQLite metadata store and library scanner.
//! * [`model`] holds the metadata row, field schema and [`PlayQueue`].
//! * [`controller`] composes these into the nine queue operations.
//!
//! Everything runs synchronously on the caller's thread.

pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod model;
pub mod selection;

pub use controller::{Expansion, Placement, QueueCommand, QueueController};
pub use db::{LibraryStore, SqliteLibrary};
pub use error::{Error, Result};
pub use model::{ColumnSpec, Field, PlayQueue, Table, TrackRow};
pub use selection::{SelectionSource, TableView};
