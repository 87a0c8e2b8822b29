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

//! Library error type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A read or write against the metadata store failed.
    #[error("Library store failure: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Failed to scan media directory {dir}: {message}")]
    Scan { dir: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
