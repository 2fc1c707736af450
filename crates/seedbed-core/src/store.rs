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

//! Contracts for the external record store and import job service.
//!
//! Seedbed delegates all data residency to these collaborators. A [`Database`]
//! hands out connections implementing [`Store`]; each fixture step owns one
//! connection for its own duration, wrapped in a [`ConnectionGuard`] that
//! closes it on every exit path.

use crate::error::StoreResult;
use crate::schema::ModelSchema;
use crate::value::{FieldValue, RecordId, Values};
use std::ops::{Deref, DerefMut};

/// One equality constraint of a search domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Field the constraint applies to.
    pub field: String,
    /// Comparison operator; loaders only emit `=`.
    pub operator: String,
    /// Value compared against.
    pub value: FieldValue,
}

impl Condition {
    /// `(field, "=", value)`.
    pub fn eq(field: impl Into<String>, value: FieldValue) -> Self {
        Self {
            field: field.into(),
            operator: "=".to_string(),
            value,
        }
    }
}

/// A conjunction of conditions.
pub type Domain = Vec<Condition>;

/// Options passed to [`Store::bulk_load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Language the store uses to interpret translatable values.
    pub lang: Option<String>,
}

impl LoadOptions {
    /// Options carrying a locale.
    pub fn with_lang(lang: impl Into<String>) -> Self {
        Self {
            lang: Some(lang.into()),
        }
    }
}

/// Outcome of a bulk load as reported by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadResult {
    /// Identifiers of the created or updated records.
    pub ids: Vec<RecordId>,
    /// Messages the store reported for rejected rows.
    pub messages: Vec<String>,
}

/// A connection to the record store.
pub trait Store {
    /// Schema of `model`, with direct and inherited field tables.
    fn schema(&mut self, model: &str) -> StoreResult<ModelSchema>;

    /// Identifiers of the `model` records matching every condition of `domain`.
    fn search(&mut self, model: &str, domain: &Domain) -> StoreResult<Vec<RecordId>>;

    /// Create one record and return its identifier.
    fn create(&mut self, model: &str, values: &Values) -> StoreResult<RecordId>;

    /// Update an existing record.
    fn write(&mut self, model: &str, id: RecordId, values: &Values) -> StoreResult<()>;

    /// Load many rows at once. `fields` names the columns of every row.
    fn bulk_load(
        &mut self,
        model: &str,
        fields: &[String],
        rows: &[Vec<String>],
        options: &LoadOptions,
    ) -> StoreResult<LoadResult>;

    /// Resolve a namespaced external identifier to a record.
    fn lookup_external_id(&mut self, xml_id: &str) -> StoreResult<Option<RecordId>>;

    /// Bind a namespaced external identifier to a record.
    fn bind_external_id(&mut self, xml_id: &str, model: &str, id: RecordId) -> StoreResult<()>;

    /// Default values the store applies to new `model` records.
    fn default_values(&mut self, _model: &str) -> StoreResult<Values> {
        Ok(Values::new())
    }

    /// Switch auto-commit on or off for this connection.
    fn set_autocommit(&mut self, _enabled: bool) -> StoreResult<()> {
        Ok(())
    }

    /// Release the connection.
    fn close(&mut self) {}
}

/// Source of store connections.
pub trait Database {
    /// Open a new connection.
    fn cursor(&self) -> StoreResult<Box<dyn Store>>;
}

/// Scoped store connection, closed when dropped.
///
/// # Examples
///
/// ```ignore
/// let mut conn = ConnectionGuard::open(&database)?;
/// conn.set_autocommit(true)?;
/// conn.create("res.partner", &values)?;
/// // connection closed here, even on early return
/// ```
pub struct ConnectionGuard {
    conn: Box<dyn Store>,
}

impl ConnectionGuard {
    /// Open a connection on `db`.
    pub fn open(db: &dyn Database) -> StoreResult<Self> {
        Ok(Self { conn: db.cursor()? })
    }
}

impl Deref for ConnectionGuard {
    type Target = dyn Store;

    fn deref(&self) -> &Self::Target {
        self.conn.as_ref()
    }
}

impl DerefMut for ConnectionGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.conn.as_mut()
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        tracing::debug!("Closing store connection");
        self.conn.close();
    }
}

/// Identifier of a background import job.
pub type ImportJobId = i64;

/// File submitted to the background import service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    /// Target model.
    pub res_model: String,
    /// Raw file content.
    pub file: Vec<u8>,
    /// Fixture-relative file name.
    pub file_name: String,
    /// File format, always `csv` for tabular fixtures.
    pub file_type: String,
}

/// Parsing options handed to the background import service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// First line holds column headers.
    pub headers: bool,
    /// Quote character.
    pub quoting: char,
    /// Column separator.
    pub separator: char,
    /// File encoding.
    pub encoding: String,
    /// Split the import into queued jobs.
    pub use_connector: bool,
    /// Starting priority of the queued jobs.
    pub priority: u32,
}

impl ImportOptions {
    /// The fixed option set used for CSV fixtures.
    pub fn csv(separator: char, priority: u32) -> Self {
        Self {
            headers: true,
            quoting: '"',
            separator,
            encoding: "utf-8".to_string(),
            use_connector: true,
            priority,
        }
    }
}

/// Background import job service.
///
/// Fire-and-forget from the loader's perspective: jobs are created and
/// triggered, never awaited, polled or cancelled.
pub trait ImportQueue {
    /// Register an import and return its job identifier.
    fn create_import(&self, request: ImportRequest) -> StoreResult<ImportJobId>;

    /// Trigger the import with the given column mapping.
    fn run_import(
        &self,
        job: ImportJobId,
        fields: &[String],
        options: &ImportOptions,
    ) -> StoreResult<()>;
}
