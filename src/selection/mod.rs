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

//! Row and column selection from a table-like view.
//!
//! The controller only sees a view through [`SelectionSource`]: the selected
//! rows in ascending row order, and single columns of them. [`TableView`] is
//! an in-memory view that keeps its rows and its selection separately.

use std::collections::BTreeSet;

use crate::model::{ColumnSpec, Field, TrackRow};

pub trait SelectionSource {
    /// The full rows currently selected, in ascending row-index order.
    fn selected_rows(&self) -> Vec<TrackRow>;

    /// One column of the selected rows, in ascending row-index order.
    ///
    /// A [`ColumnSpec::Name`] is translated to its position in `schema`.
    /// Returns `None` when the name is unknown or the position is past the
    /// last column.
    fn column_selection(&self, schema: &[Field], column: &ColumnSpec) -> Option<Vec<String>> {
        let index = match column {
            ColumnSpec::Index(index) => *index,
            ColumnSpec::Name(name) => schema.iter().position(|field| field.name() == name)?,
        };
        let field = *schema.get(index)?;

        Some(
            self.selected_rows()
                .iter()
                .map(|row| row.get(field).to_string())
                .collect(),
        )
    }
}

/// An in-memory table of metadata rows with a multi-row selection.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    rows: Vec<TrackRow>,
    selection: BTreeSet<usize>,
}

impl TableView {
    pub fn new(rows: Vec<TrackRow>) -> Self {
        Self {
            rows,
            selection: BTreeSet::new(),
        }
    }

    pub fn rows(&self) -> &[TrackRow] {
        &self.rows
    }

    /// Adds row `index` to the selection. Indexes past the end are ignored.
    pub fn select_row(&mut self, index: usize) {
        if index < self.rows.len() {
            self.selection.insert(index);
        }
    }

    pub fn select_rows<I: IntoIterator<Item = usize>>(&mut self, indexes: I) {
        for index in indexes {
            self.select_row(index);
        }
    }

    pub fn select_all(&mut self) {
        self.selection.extend(0..self.rows.len());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

impl SelectionSource for TableView {
    fn selected_rows(&self) -> Vec<TrackRow> {
        self.selection
            .iter()
            .filter_map(|&index| self.rows.get(index))
            .cloned()
            .collect()
    }
}
