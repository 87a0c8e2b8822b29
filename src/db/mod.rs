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

//! Data access layer.
//!
//! This module defines the narrow [`LibraryStore`] contract the queue
//! controller depends on, and its SQLite implementation. It uses cached
//! statements for the queries the controller issues on every call.
//!
//! # Tables
//!
//! * `library` - Every known track, unique by `file_id`.
//! * `nowplaying` - Metadata for every entry in the play queue. Duplicate
//!   `file_id`s are allowed because the queue may hold duplicates.
//!
//! Both tables share the column order of [`Field::ALL`].

mod model;
pub mod scan;

use log::{debug, warn};
use rusqlite::{Connection, params_from_iter};

use crate::{
    error::Result,
    model::{Field, Table, TrackRow},
};

const COLUMNS: &str = "file_id, file_path, file_name, title, artist, album, albumartist, \
                       genre, date, tracknumber, length";

const PLACEHOLDERS: &str = "?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11";

/// The persistent, field-indexed metadata store consumed by the controller.
pub trait LibraryStore {
    /// The ordered field names that define column positions.
    fn field_schema(&self) -> &[Field];

    fn batch_insert(&mut self, table: Table, rows: &[TrackRow]) -> Result<()>;

    fn clear_table(&mut self, table: Table) -> Result<()>;

    /// Replaces the whole content of `table` with `rows`.
    ///
    /// Must be atomic: on error `table` keeps its previous content. The queue
    /// controller relies on this to leave the mirror untouched when a sync
    /// fails.
    fn replace_table(&mut self, table: Table, rows: &[TrackRow]) -> Result<()>;

    /// Values of `field` for every row in `table`, in table order.
    fn select_field(&self, table: Table, field: Field) -> Result<Vec<String>>;

    /// Library rows whose `field` equals `value`, in table order.
    fn select_rows_where(&self, field: Field, value: &str) -> Result<Vec<TrackRow>>;
}

/// A [`LibraryStore`] backed by SQLite.
pub struct SqliteLibrary {
    conn: Connection,
}

impl SqliteLibrary {
    /// Opens the database file at `path` and configures performance settings.
    ///
    /// This enables Write-Ahead Logging, relaxes `synchronous` to `NORMAL`,
    /// raises the page cache and then creates any missing tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, a PRAGMA fails, or the
    /// schema cannot be created.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;

        let journal_mode: String =
            conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
        if journal_mode != "wal" {
            warn!("Failed to switch {path} to WAL mode, using {journal_mode}");
        }

        conn.execute_batch(
            "
            PRAGMA synchronous = NORMAL;
            PRAGMA cache_size = -64000; -- Use 64MB of RAM for cache
        ",
        )?;

        Self::with_connection(conn)
    }

    /// Opens a private in-memory database, discarded on drop.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.set_prepared_statement_cache_capacity(100);

        create_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Number of rows in `table`.
    pub fn track_count(&self, table: Table) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;

        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Every row of `table`, in table order.
    pub fn all_rows(&self, table: Table) -> Result<Vec<TrackRow>> {
        let sql = format!("SELECT {COLUMNS} FROM {} ORDER BY rowid", table.name());

        let mut stmt = self.conn.prepare_cached(&sql)?;
        let results = stmt
            .query_map([], TrackRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(results)
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Create the database schema.
///
/// Column order of both tables follows [`Field::ALL`]; row mapping in
/// [`TrackRow::from_row`] depends on it.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS library (
            file_id TEXT PRIMARY KEY,
            file_path TEXT NOT NULL DEFAULT '',
            file_name TEXT NOT NULL DEFAULT '',
            title TEXT NOT NULL DEFAULT '',
            artist TEXT NOT NULL DEFAULT '',
            album TEXT NOT NULL DEFAULT '',
            albumartist TEXT NOT NULL DEFAULT '',
            genre TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL DEFAULT '',
            tracknumber TEXT NOT NULL DEFAULT '',
            length TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_library_artist ON library (artist);
        CREATE INDEX IF NOT EXISTS idx_library_album ON library (album);
        CREATE INDEX IF NOT EXISTS idx_library_genre ON library (genre);

        CREATE TABLE IF NOT EXISTS nowplaying (
            file_id TEXT NOT NULL,
            file_path TEXT NOT NULL DEFAULT '',
            file_name TEXT NOT NULL DEFAULT '',
            title TEXT NOT NULL DEFAULT '',
            artist TEXT NOT NULL DEFAULT '',
            album TEXT NOT NULL DEFAULT '',
            albumartist TEXT NOT NULL DEFAULT '',
            genre TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL DEFAULT '',
            tracknumber TEXT NOT NULL DEFAULT '',
            length TEXT NOT NULL DEFAULT ''
        );

        COMMIT;",
    )?;

    Ok(())
}

fn insert_sql(table: Table) -> String {
    let insert = format!("INSERT INTO {} ({COLUMNS}) VALUES ({PLACEHOLDERS})", table.name());

    match table {
        // Update in place so a re-imported track keeps its rowid
        Table::Library => format!(
            "{insert}
            ON CONFLICT (file_id) DO UPDATE SET
                file_path = excluded.file_path,
                file_name = excluded.file_name,
                title = excluded.title,
                artist = excluded.artist,
                album = excluded.album,
                albumartist = excluded.albumartist,
                genre = excluded.genre,
                date = excluded.date,
                tracknumber = excluded.tracknumber,
                length = excluded.length"
        ),
        Table::NowPlaying => insert,
    }
}

fn insert_rows(conn: &Connection, table: Table, rows: &[TrackRow]) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare_cached(&insert_sql(table))?;
    for row in rows {
        stmt.execute(params_from_iter(row.values()))?;
    }

    Ok(())
}

impl LibraryStore for SqliteLibrary {
    fn field_schema(&self) -> &[Field] {
        &Field::ALL
    }

    /// Inserts all `rows` in one transaction.
    ///
    /// Rows inserted into `library` update any existing row with the same
    /// `file_id` in place, keeping its position in table order.
    fn batch_insert(&mut self, table: Table, rows: &[TrackRow]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        insert_rows(&tx, table, rows)?;
        tx.commit()?;

        debug!("Inserted {} rows into {}", rows.len(), table.name());

        Ok(())
    }

    fn clear_table(&mut self, table: Table) -> Result<()> {
        self.conn.execute(&format!("DELETE FROM {}", table.name()), [])?;

        Ok(())
    }

    fn replace_table(&mut self, table: Table, rows: &[TrackRow]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(&format!("DELETE FROM {}", table.name()), [])?;
        insert_rows(&tx, table, rows)?;
        tx.commit()?;

        debug!("Replaced {} with {} rows", table.name(), rows.len());

        Ok(())
    }

    fn select_field(&self, table: Table, field: Field) -> Result<Vec<String>> {
        let sql = format!("SELECT {} FROM {} ORDER BY rowid", field.name(), table.name());

        let mut stmt = self.conn.prepare_cached(&sql)?;
        let results = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(results)
    }

    fn select_rows_where(&self, field: Field, value: &str) -> Result<Vec<TrackRow>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM library WHERE {} = ? ORDER BY rowid",
            field.name()
        );

        let mut stmt = self.conn.prepare_cached(&sql)?;
        let results = stmt
            .query_map([value], TrackRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(results)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Ten library rows `X0..X9`, every grouping field distinct per row.
    pub(crate) fn sample_rows(count: usize) -> Vec<TrackRow> {
        (0..count)
            .map(|i| TrackRow {
                file_id: format!("file_idX{i}"),
                file_path: format!("/music/X{i}.mp3"),
                file_name: format!("X{i}.mp3"),
                title: format!("titleX{i}"),
                artist: format!("artistX{i}"),
                album: format!("albumX{i}"),
                albumartist: format!("albumartistX{i}"),
                genre: format!("genreX{i}"),
                date: "2020".to_string(),
                tracknumber: (i + 1).to_string(),
                length: "180".to_string(),
            })
            .collect()
    }

    pub(crate) fn sample_library() -> SqliteLibrary {
        let mut store = SqliteLibrary::open_in_memory().expect("failed to open in-memory db");
        store
            .batch_insert(Table::Library, &sample_rows(10))
            .expect("failed to seed library");
        store
    }

    #[test]
    fn batch_insert_then_select_field_keeps_insert_order() {
        let store = sample_library();

        let ids = store.select_field(Table::Library, Field::FileId).unwrap();

        let expected: Vec<String> = (0..10).map(|i| format!("file_idX{i}")).collect();
        assert_eq!(ids, expected);
        assert_eq!(store.track_count(Table::Library).unwrap(), 10);
        assert_eq!(store.all_rows(Table::Library).unwrap(), sample_rows(10));
    }

    #[test]
    fn library_upserts_on_file_id() {
        let mut store = sample_library();
        let mut row = sample_rows(1).remove(0);
        row.title = "renamed".into();

        store.batch_insert(Table::Library, &[row]).unwrap();

        assert_eq!(store.track_count(Table::Library).unwrap(), 10);
        let rows = store.select_rows_where(Field::FileId, "file_idX0").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "renamed");
    }

    #[test]
    fn library_upsert_keeps_table_order() {
        let mut store = SqliteLibrary::open_in_memory().unwrap();
        let mut rows = sample_rows(2);
        rows[1].album = "albumX0".into();
        store.batch_insert(Table::Library, &rows).unwrap();

        let mut first = rows[0].clone();
        first.title = "retagged".into();
        store.batch_insert(Table::Library, &[first]).unwrap();

        let album = store.select_rows_where(Field::Album, "albumX0").unwrap();
        let ids: Vec<&str> = album.iter().map(|row| row.file_id.as_str()).collect();
        assert_eq!(ids, ["file_idX0", "file_idX1"]);
        assert_eq!(album[0].title, "retagged");
    }

    #[test]
    fn failed_writes_roll_back_the_whole_batch() {
        let mut store = sample_library();
        store.batch_insert(Table::NowPlaying, &sample_rows(2)).unwrap();
        store
            .connection()
            .execute_batch(
                "CREATE TRIGGER reject_x3 BEFORE INSERT ON nowplaying
                 WHEN NEW.file_id = 'file_idX3'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        assert!(store.batch_insert(Table::NowPlaying, &sample_rows(5)).is_err());
        assert!(store.replace_table(Table::NowPlaying, &sample_rows(5)).is_err());

        let ids = store.select_field(Table::NowPlaying, Field::FileId).unwrap();
        assert_eq!(ids, ["file_idX0", "file_idX1"]);
    }

    #[test]
    fn nowplaying_keeps_duplicates() {
        let mut store = sample_library();
        let rows = sample_rows(2);

        store.batch_insert(Table::NowPlaying, &rows).unwrap();
        store.batch_insert(Table::NowPlaying, &rows).unwrap();

        assert_eq!(store.track_count(Table::NowPlaying).unwrap(), 4);
    }

    #[test]
    fn select_rows_where_returns_full_rows() {
        let store = sample_library();

        let rows = store.select_rows_where(Field::Album, "albumX3").unwrap();

        assert_eq!(rows, vec![sample_rows(4).remove(3)]);
        assert!(store.select_rows_where(Field::Album, "missing").unwrap().is_empty());
    }

    #[test]
    fn replace_and_clear_table() {
        let mut store = sample_library();
        store.batch_insert(Table::NowPlaying, &sample_rows(5)).unwrap();

        store.replace_table(Table::NowPlaying, &sample_rows(2)).unwrap();
        assert_eq!(store.track_count(Table::NowPlaying).unwrap(), 2);

        store.clear_table(Table::NowPlaying).unwrap();
        assert_eq!(store.track_count(Table::NowPlaying).unwrap(), 0);
        assert_eq!(store.track_count(Table::Library).unwrap(), 10);
    }

    #[test]
    fn reopening_a_file_keeps_its_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.db");
        let path = path.to_str().unwrap();

        {
            let mut store = SqliteLibrary::open(path).unwrap();
            store.batch_insert(Table::Library, &sample_rows(3)).unwrap();
        }

        let store = SqliteLibrary::open(path).unwrap();
        assert_eq!(store.track_count(Table::Library).unwrap(), 3);
    }
}
