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
//! Command line front end for the queue core.
//!
//! Loads the configuration, imports the configured media directories into the
//! library database and, when given a queue command and row numbers, applies
//! that command to those rows of the library and prints the resulting queue.
//!
//! ```text
//! nowplaying [<command> <row>...]
//! ```

use anyhow::{Context, Result};
use log::info;

use nowplaying::{
    Field, LibraryStore, QueueCommand, QueueController, SqliteLibrary, Table, TableView,
    config::{self, AppConfig},
    db::scan,
};

fn main() -> Result<()> {
    let config = config::load_config();

    let mut clog = colog::default_builder();
    clog.filter(None, config.log_level_filter());
    clog.init();

    let mut store = SqliteLibrary::open(&config.database_file)
        .with_context(|| format!("Failed to open library {}", config.database_file))?;

    if !config.media_dirs.is_empty() {
        let count = scan::import_media_dirs(&mut store, config.media_dirs.as_slice())
            .context("Failed to import media directories")?;
        info!("Imported {count} tracks");
    }

    info!("Library holds {} tracks", store.track_count(Table::Library)?);

    let mut args = std::env::args().skip(1);
    let Some(command) = args.next() else {
        return Ok(());
    };

    let command: QueueCommand = command.parse()?;
    let rows = args
        .map(|arg| {
            arg.parse::<usize>()
                .with_context(|| format!("Invalid row number '{arg}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    run_command(&config, store, command, rows)
}

/// Runs one queue command against the whole library shown as a table.
fn run_command(
    config: &AppConfig,
    store: SqliteLibrary,
    command: QueueCommand,
    rows: Vec<usize>,
) -> Result<()> {
    let view = TableView::new(store.all_rows(Table::Library)?);

    let mut controller = QueueController::with_rng(store, view, config.shuffle_rng())
        .context("Failed to start queue session")?;
    controller.selection_mut().select_rows(rows);

    let queue = controller
        .execute(command)
        .with_context(|| format!("Failed to run {command}"))?;

    for file_id in queue {
        let title = controller
            .store()
            .select_rows_where(Field::FileId, &file_id)?
            .first()
            .map(|row| row.title.clone())
            .unwrap_or_default();
        println!("{file_id}\t{title}");
    }

    Ok(())
}
