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

//! Error types shared by every Seedbed loader.

use std::path::PathBuf;
use thiserror::Error;

/// A failure reported by the record store.
///
/// Store failures (constraint violations, invalid searches, rejected rows)
/// are carried verbatim: the loader never interprets or rewrites the
/// message.
///
/// # Examples
///
/// ```
/// use seedbed_core::StoreError;
///
/// let err = StoreError::new("null value in column \"name\" violates not-null constraint");
/// assert_eq!(
///     err.to_string(),
///     "null value in column \"name\" violates not-null constraint"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    /// The store's own message.
    pub message: String,
}

impl StoreError {
    /// Create a store error from the store's message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised while resolving fixtures against the store and file system.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The referenced data file does not exist under the data directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use seedbed_core::FixtureError;
    ///
    /// let err = FixtureError::NotFound {
    ///     path: "/srv/project/data/partners.csv".into(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Fixture file not found: /srv/project/data/partners.csv"
    /// );
    /// ```
    #[error("Fixture file not found: {}", path.display())]
    NotFound {
        /// Absolute path that was checked.
        path: PathBuf,
    },

    /// The relative name would leave the data directory.
    #[error("Fixture name '{name}' escapes the data directory")]
    PathEscape {
        /// The offending relative name.
        name: String,
    },

    /// The feature file has no ancestor directory to anchor the data directory on.
    #[error("Feature path {} has no '{anchor}' ancestor", path.display())]
    MissingAnchor {
        /// Feature file path.
        path: PathBuf,
        /// Directory name that was searched for.
        anchor: String,
    },

    /// The field is absent from both the direct and the inherited field tables.
    ///
    /// # Examples
    ///
    /// ```
    /// use seedbed_core::FixtureError;
    ///
    /// let err = FixtureError::Schema {
    ///     model: "res.partner".to_string(),
    ///     field: "nickname".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Object 'res.partner' does not contain field 'nickname'"
    /// );
    /// ```
    #[error("Object '{model}' does not contain field '{field}'")]
    Schema {
        /// Model that was inspected.
        model: String,
        /// Missing field name.
        field: String,
    },

    /// A symbolic identifier could not be resolved to a record.
    #[error("No record found for external identifier '{xml_id}'")]
    UnresolvedReference {
        /// Namespaced identifier that was looked up.
        xml_id: String,
    },

    /// Failure surfaced by the store, propagated as-is.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// I/O error while reading a fixture file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type for fixture resolution.
pub type Result<T> = std::result::Result<T, FixtureError>;
