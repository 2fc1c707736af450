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

//! # Seedbed - fixture data loading for behaviour-driven test suites
//!
//! Seedbed populates a record store with the fixture data a scenario needs.
//! Fixtures live in a `data/` directory next to the `features/` directory
//! of the running feature file and come in two formats:
//!
//! - **CSV**: the header names the fields, every row becomes one record.
//!   Rows are submitted to the store's bulk loader in a single call.
//! - **Structured YAML**: a list of record nodes whose field values may
//!   search for related records or embed files from the data directory.
//!
//! ## Quick Start
//!
//! ```no_run
//! use seedbed::{FeatureContext, StepContext, StepRegistry};
//! # fn run(db: &dyn seedbed::Database) -> seedbed::Result<()> {
//!
//! let ctx = StepContext::new(FeatureContext::new("/srv/project/features/invoicing.feature"), db);
//! let steps = StepRegistry::standard()?;
//!
//! steps.dispatch(&ctx, r#"I load the data file "partners.csv" into the model "res.partner""#)?;
//! steps.dispatch(&ctx, r#"I load the data file "invoices.yml""#)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`csv`]: CSV importer
//! - [`yaml`]: structured fixture interpreter
//! - [`xmlid`]: external identifier helpers

mod error;
mod loader;
mod steps;

pub use error::{Error, Result};
pub use loader::load_structured_fixture;
pub use steps::{
    import_csv_async, import_csv_with_locale, load_csv, load_yaml, StepArgs, StepContext,
    StepHandler, StepRegistry,
};

// Re-export core types
pub use seedbed_core::{
    // Files
    AssetResolver,
    // Store contracts
    Condition,
    ConnectionGuard,
    Database,
    Domain,
    FeatureContext,
    // Schema
    FieldLookup,
    FieldType,
    // Values
    FieldValue,
    FileSystem,
    // Errors
    FixtureError,
    IdRef,
    ImportJobId,
    ImportOptions,
    ImportQueue,
    ImportRequest,
    LoadOptions,
    LoadResult,
    // Configuration
    LoaderConfig,
    LoaderConfigBuilder,
    Mode,
    ModelSchema,
    OsFileSystem,
    RecordId,
    Relation,
    SchemaField,
    Store,
    StoreError,
    Values,
};

pub mod xmlid {
    //! External identifier helpers
    pub use seedbed_core::xmlid::{
        is_identifier_field, namespace_identifier, IdRef, NAMESPACE_SEPARATOR,
    };
}

pub mod csv {
    //! CSV fixture importer
    pub use seedbed_csv::{
        import_async, import_file, import_file_with_locale, read_table, rewrite_identifiers,
        ColumnMapping, CsvError, CsvImportConfig, Table, DEFAULT_PRIORITY,
    };
}

pub mod yaml {
    //! Structured fixture interpreter
    pub use seedbed_yaml::{
        parse_fixture, AssetReference, EvalContext, Expression, FixtureNode, FixtureRecordNode,
        Interpreter, InterpreterConfig, NodeKind, ParentContext, TagConstructor, TagRegistry,
        YamlError,
    };
}
