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

//! Media library indexing.
//!
//! This module discovers audio files on the local filesystem and turns their
//! tags into metadata rows for the `library` table.
//!
//! It utilizes `WalkDir` for directory traversal and `Lofty` for metadata
//! extraction. Each track's `file_id` is the `xxh3` digest of its path, so
//! rescanning the same directories yields the same identifiers.

use std::path::Path;

use anyhow::Context;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::ItemKey;
use log::{info, warn};
use walkdir::WalkDir;
use xxhash_rust::xxh3::xxh3_64;

use crate::{
    db::LibraryStore,
    error::{Error, Result},
    model::{Table, TrackRow},
};

const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "flac", "ogg", "opus", "m4a", "wav"];

/// Recursively scans each directory and reads the tags of every audio file.
///
/// Files whose tags cannot be read are skipped with a warning.
///
/// # Errors
///
/// Returns [`Error::Scan`] if one of `dirs` is not a readable directory.
pub fn scan_media_dirs<P: AsRef<Path>>(dirs: &[P]) -> Result<Vec<TrackRow>> {
    let mut rows = Vec::new();

    for dir in dirs {
        let root = dir.as_ref();
        if !root.is_dir() {
            return Err(Error::Scan {
                dir: root.display().to_string(),
                message: "not a directory".to_string(),
            });
        }

        let before = rows.len();

        for entry in WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_audio_file(e.path()))
        {
            let path = entry.path();
            match read_track_row(path) {
                Ok(row) => rows.push(row),
                Err(e) => warn!("Skipping {}: {:#}", path.display(), e),
            }
        }

        info!("Found {} tracks in {}", rows.len() - before, root.display());
    }

    Ok(rows)
}

/// Scans `dirs` and upserts every track found into the `library` table.
///
/// Returns the number of tracks imported.
pub fn import_media_dirs<S, P>(store: &mut S, dirs: &[P]) -> Result<usize>
where
    S: LibraryStore + ?Sized,
    P: AsRef<Path>,
{
    let rows = scan_media_dirs(dirs)?;
    store.batch_insert(Table::Library, &rows)?;

    Ok(rows.len())
}

/// The stable identifier for the file at `path`.
pub fn file_id_for(path: &Path) -> String {
    format!("{:016x}", xxh3_64(path.to_string_lossy().as_bytes()))
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn read_track_row(path: &Path) -> anyhow::Result<TrackRow> {
    let tagged_file = Probe::open(path)
        .and_then(|p| p.read())
        .context("Failed to read tags")?;

    let file_path = path.to_str().context("Path contains invalid UTF-8")?.to_string();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let length = tagged_file.properties().duration().as_secs().to_string();

    let mut row = TrackRow {
        file_id: file_id_for(path),
        file_path,
        title: file_name.clone(),
        file_name,
        length,
        ..TrackRow::default()
    };

    // Untagged files are still indexed, named after the file
    let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) else {
        return Ok(row);
    };

    let text = |key: ItemKey| {
        tag.get(&key)
            .and_then(|item| item.value().text())
            .map(|s| s.to_string())
            .unwrap_or_default()
    };

    if let Some(title) = tag.title() {
        row.title = title.to_string();
    }
    row.artist = tag.artist().map(|s| s.to_string()).unwrap_or_default();
    row.album = tag.album().map(|s| s.to_string()).unwrap_or_default();
    row.genre = tag.genre().map(|s| s.to_string()).unwrap_or_default();
    row.albumartist = text(ItemKey::AlbumArtist);
    row.date = text(ItemKey::RecordingDate);
    row.tracknumber = tag.track().map(|n| n.to_string()).unwrap_or_default();

    Ok(row)
}
