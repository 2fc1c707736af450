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

//! Tabular (CSV) fixture importer.
//!
//! Reads a CSV fixture from the data directory, maps its header to store
//! fields and submits every row to the store's bulk loader in one call.
//!
//! # Column mapping
//!
//! - Non-empty header cells name the fields, in header order.
//! - Columns with an empty header are dropped from every row.
//! - Values of `id` and `*/id` columns without a `.` are moved into the
//!   fixture namespace: `42` becomes `scenario.42`, `base.be` is kept.
//!
//! # Entry points
//!
//! - [`import_file`]: plain load, store messages are logged.
//! - [`import_file_with_locale`]: strict UTF-8, passes a language to the
//!   store and fails with [`CsvError::Import`] when nothing was created.
//! - [`import_async`]: hands the raw file to the background import service.
//!
//! # Examples
//!
//! ```no_run
//! use seedbed_core::{AssetResolver, FeatureContext, LoaderConfig, Store};
//! use seedbed_csv::{import_file, CsvImportConfig};
//!
//! # fn run(store: &mut dyn Store) -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = FeatureContext::new("/srv/project/features/partners.feature");
//! let assets = AssetResolver::new(&ctx, &LoaderConfig::default())?;
//! import_file(store, &assets, "res.partner", "partners.csv", &CsvImportConfig::default())?;
//! # Ok(())
//! # }
//! ```

mod error;
mod import;
mod mapping;
mod queue;

pub use error::{CsvError, Result};
pub use import::{import_file, import_file_with_locale, read_table, CsvImportConfig, Table};
pub use mapping::{rewrite_identifiers, ColumnMapping};
pub use queue::{import_async, DEFAULT_PRIORITY};
