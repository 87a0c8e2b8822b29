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

//! Database row mapping for metadata rows.

use rusqlite::Row;

use crate::model::TrackRow;

impl TrackRow {
    /// Maps an SQLite row selected with the full column list to a
    /// [`TrackRow`].
    ///
    /// This is a helper function designed to be used with
    /// [`rusqlite::Statement::query_map`].
    ///
    /// # Errors
    ///
    /// Returns a [`rusqlite::Error`] if the row does not contain enough
    /// columns or a column is not text.
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            file_id: row.get(0)?,
            file_path: row.get(1)?,
            file_name: row.get(2)?,
            title: row.get(3)?,
            artist: row.get(4)?,
            album: row.get(5)?,
            albumartist: row.get(6)?,
            genre: row.get(7)?,
            date: row.get(8)?,
            tracknumber: row.get(9)?,
            length: row.get(10)?,
        })
    }
}
