// Dweve Seedbed - Fixture data loading for behaviour-driven test suites
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Header to field mapping and identifier rewriting.

use seedbed_core::xmlid::{is_identifier_field, namespace_identifier};
use std::collections::BTreeSet;

/// Column to field mapping built from a header row.
///
/// Non-empty header cells become mapped columns, in header order. Empty
/// header cells mark columns that are skipped in every row.
///
/// # Examples
///
/// ```
/// use seedbed_csv::ColumnMapping;
///
/// let mapping = ColumnMapping::from_header(["name", "", "partner_id/id"]);
/// assert_eq!(mapping.field_names(), vec!["name", "partner_id/id"]);
/// assert!(mapping.skipped().contains(&1));
///
/// let row = vec!["Alice".to_string(), "x".to_string(), "42".to_string()];
/// assert_eq!(mapping.project(&row), vec!["Alice", "42"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: Vec<(usize, String)>,
    skip: BTreeSet<usize>,
}

impl ColumnMapping {
    /// Build the mapping from header cells.
    pub fn from_header<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mapping = Self::default();
        for (index, cell) in header.into_iter().enumerate() {
            let cell = cell.as_ref();
            if cell.is_empty() {
                mapping.skip.insert(index);
            } else {
                mapping.columns.push((index, cell.to_string()));
            }
        }
        mapping
    }

    /// Field names in submission order.
    pub fn field_names(&self) -> Vec<String> {
        self.columns.iter().map(|(_, name)| name.clone()).collect()
    }

    /// Source indices of columns with an empty header.
    pub fn skipped(&self) -> &BTreeSet<usize> {
        &self.skip
    }

    /// Number of mapped columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no column is mapped.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Values of `row` at mapped indices, in mapping order.
    ///
    /// Cells missing from a short row are left out; the store reports the
    /// resulting width mismatch.
    pub fn project(&self, row: &[String]) -> Vec<String> {
        self.columns
            .iter()
            .filter_map(|(index, _)| row.get(*index).cloned())
            .collect()
    }

    /// Positions, within projected rows, of `id` and `*/id` fields.
    pub fn identifier_positions(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, (_, name))| is_identifier_field(name))
            .map(|(pos, _)| pos)
            .collect()
    }
}

/// Move bare identifiers at `positions` into `namespace`.
pub fn rewrite_identifiers(rows: &mut [Vec<String>], positions: &[usize], namespace: &str) {
    if positions.is_empty() {
        return;
    }
    for row in rows.iter_mut() {
        for &pos in positions {
            if let Some(cell) = row.get_mut(pos) {
                *cell = namespace_identifier(namespace, cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_identifier_positions_follow_projection() {
        let mapping = ColumnMapping::from_header(["", "id", "name", "", "country_id/id"]);
        assert_eq!(mapping.identifier_positions(), vec![0, 2]);
    }

    #[test]
    fn test_rewrite_only_bare_values() {
        let mut rows = vec![row(&["p1", "Alice", "base.be"]), row(&["base.p2", "Bob", "fr"])];
        rewrite_identifiers(&mut rows, &[0, 2], "scenario");
        assert_eq!(rows[0], row(&["scenario.p1", "Alice", "base.be"]));
        assert_eq!(rows[1], row(&["base.p2", "Bob", "scenario.fr"]));
    }

    #[test]
    fn test_short_row_is_not_padded() {
        let mapping = ColumnMapping::from_header(["name", "email", "ref"]);
        assert_eq!(mapping.project(&row(&["Alice"])), row(&["Alice"]));
    }

    #[test]
    fn test_extra_cells_are_dropped() {
        let mapping = ColumnMapping::from_header(["name"]);
        assert_eq!(mapping.project(&row(&["Alice", "stray"])), row(&["Alice"]));
    }

    proptest! {
        #[test]
        fn prop_projection_keeps_named_columns_in_order(
            header in proptest::collection::vec(prop_oneof!["", "[a-z]{1,6}"], 1..8),
        ) {
            let mapping = ColumnMapping::from_header(&header);
            let source: Vec<String> = (0..header.len()).map(|i| format!("v{}", i)).collect();
            let expected: Vec<String> = header
                .iter()
                .enumerate()
                .filter(|(_, name)| !name.is_empty())
                .map(|(i, _)| format!("v{}", i))
                .collect();
            prop_assert_eq!(mapping.project(&source), expected);
            prop_assert_eq!(mapping.len() + mapping.skipped().len(), header.len());
        }
    }
}
