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

//! Domain models and core data structures.
//!
//! This module defines the metadata row shared by the library and the
//! now-playing mirror, the fixed field schema that gives every column a
//! stable position, and the way callers address a column of a table view.

pub(crate) mod queue;

pub use queue::PlayQueue;

/// A named metadata field.
///
/// The declaration order is the canonical column order of every metadata
/// table and of every table view built from metadata rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FileId,
    FilePath,
    FileName,
    Title,
    Artist,
    Album,
    AlbumArtist,
    Genre,
    Date,
    TrackNumber,
    Length,
}

impl Field {
    /// Every field, in schema order.
    pub const ALL: [Field; 11] = [
        Field::FileId,
        Field::FilePath,
        Field::FileName,
        Field::Title,
        Field::Artist,
        Field::Album,
        Field::AlbumArtist,
        Field::Genre,
        Field::Date,
        Field::TrackNumber,
        Field::Length,
    ];

    /// The column name used both in SQL and when addressing a view column by
    /// name.
    pub fn name(self) -> &'static str {
        match self {
            Field::FileId => "file_id",
            Field::FilePath => "file_path",
            Field::FileName => "file_name",
            Field::Title => "title",
            Field::Artist => "artist",
            Field::Album => "album",
            Field::AlbumArtist => "albumartist",
            Field::Genre => "genre",
            Field::Date => "date",
            Field::TrackNumber => "tracknumber",
            Field::Length => "length",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }

    pub fn position(self) -> usize {
        self as usize
    }
}

/// The metadata tables kept by a library store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// Every known track, keyed by `file_id`.
    Library,
    /// Mirror of the play queue's contents.
    NowPlaying,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Library => "library",
            Table::NowPlaying => "nowplaying",
        }
    }
}

/// One track's metadata.
///
/// Values are addressable by [`Field`] or by schema position, so a row read
/// from a table view and a row read from the database are interchangeable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackRow {
    pub file_id: String,
    pub file_path: String,
    pub file_name: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub albumartist: String,
    pub genre: String,
    pub date: String,
    pub tracknumber: String,
    pub length: String,
}

impl TrackRow {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FileId => &self.file_id,
            Field::FilePath => &self.file_path,
            Field::FileName => &self.file_name,
            Field::Title => &self.title,
            Field::Artist => &self.artist,
            Field::Album => &self.album,
            Field::AlbumArtist => &self.albumartist,
            Field::Genre => &self.genre,
            Field::Date => &self.date,
            Field::TrackNumber => &self.tracknumber,
            Field::Length => &self.length,
        }
    }

    /// Returns the value in column `index`, or `None` past the last column.
    pub fn value_at(&self, index: usize) -> Option<&str> {
        Field::ALL.get(index).map(|field| self.get(*field))
    }

    /// All values in schema order.
    pub fn values(&self) -> Vec<&str> {
        Field::ALL.iter().map(|field| self.get(*field)).collect()
    }
}

/// Addresses a single column of a table view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSpec {
    /// Zero-based column position.
    Index(usize),
    /// Field name, translated to a position through the store's schema.
    Name(String),
}

impl From<usize> for ColumnSpec {
    fn from(index: usize) -> Self {
        ColumnSpec::Index(index)
    }
}

impl From<&str> for ColumnSpec {
    fn from(name: &str) -> Self {
        ColumnSpec::Name(name.to_string())
    }
}

impl From<Field> for ColumnSpec {
    fn from(field: Field) -> Self {
        ColumnSpec::Name(field.name().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip_in_schema_order() {
        for (position, field) in Field::ALL.into_iter().enumerate() {
            assert_eq!(field.position(), position);
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("composer"), None);
    }

    #[test]
    fn row_values_are_addressable_by_position() {
        let row = TrackRow {
            file_id: "id".into(),
            artist: "someone".into(),
            ..TrackRow::default()
        };

        assert_eq!(row.value_at(0), Some("id"));
        assert_eq!(row.value_at(Field::Artist.position()), Some("someone"));
        assert_eq!(row.value_at(Field::ALL.len()), None);
        assert_eq!(row.values().len(), Field::ALL.len());
    }
}
