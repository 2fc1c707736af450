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

//! Error types for tabular fixture imports.

use seedbed_core::{FixtureError, StoreError};
use thiserror::Error;

fn details(messages: &[String]) -> String {
    messages
        .iter()
        .map(|msg| format!("- {}", msg))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tabular import error types.
#[derive(Debug, Error)]
pub enum CsvError {
    /// File resolution or store failure.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Error from underlying CSV library.
    #[error("CSV library error: {0}")]
    CsvLib(#[from] csv::Error),

    /// The file has no header row.
    #[error("CSV file '{file}' has no header row")]
    EmptyFile {
        /// Fixture-relative file name.
        file: String,
    },

    /// A cell is not valid UTF-8 text.
    ///
    /// # Examples
    ///
    /// ```
    /// use seedbed_csv::CsvError;
    ///
    /// let err = CsvError::InvalidUtf8 { row: 3, column: 1 };
    /// assert_eq!(err.to_string(), "Invalid UTF-8 in row 3, column 1");
    /// ```
    #[error("Invalid UTF-8 in row {row}, column {column}")]
    InvalidUtf8 {
        /// Record number (1-based, header is row 1).
        row: usize,
        /// Column index (0-based).
        column: usize,
    },

    /// The store created no record; carries every message it reported.
    ///
    /// # Examples
    ///
    /// ```
    /// use seedbed_csv::CsvError;
    ///
    /// let err = CsvError::Import {
    ///     file: "partners.csv".to_string(),
    ///     model: "res.partner".to_string(),
    ///     messages: vec!["line 2: invalid code".to_string()],
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Failed to load file 'partners.csv' in 'res.partner'. Details:\n- line 2: invalid code"
    /// );
    /// ```
    #[error("Failed to load file '{file}' in '{model}'. Details:\n{}", details(.messages))]
    Import {
        /// Fixture-relative file name.
        file: String,
        /// Target model.
        model: String,
        /// Messages reported by the store.
        messages: Vec<String>,
    },
}

impl From<StoreError> for CsvError {
    fn from(err: StoreError) -> Self {
        CsvError::Fixture(FixtureError::Store(err))
    }
}

/// Result type for tabular imports.
pub type Result<T> = std::result::Result<T, CsvError>;
