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

//! Core contracts and data model for Seedbed fixture loading.
//!
//! Seedbed turns declarative test-data files into records committed to a
//! target data store. This crate holds everything the format-specific
//! loaders share:
//!
//! - **Store contracts**: [`Store`], [`Database`] and [`ImportQueue`] describe
//!   the external record store, its connections and the background import
//!   job service. Seedbed never stores or queries data itself.
//! - **Schema model**: [`ModelSchema`] with a two-tier field lookup
//!   ([`ModelSchema::lookup`]) over direct and inherited fields.
//! - **Values**: [`FieldValue`] and the ordered [`Values`] set submitted to
//!   the store.
//! - **Identifier namespace**: [`xmlid`] rewrites bare identifiers into the
//!   private fixture namespace so fixture records never alias existing ones.
//! - **Asset resolution**: [`AssetResolver`] maps fixture-relative names to
//!   files under the `data` directory next to the feature tree.
//! - **Configuration**: [`LoaderConfig`] and its builder.
//!
//! # Examples
//!
//! ```
//! use seedbed_core::xmlid::namespace_identifier;
//!
//! assert_eq!(namespace_identifier("scenario", "partner_1"), "scenario.partner_1");
//! assert_eq!(namespace_identifier("scenario", "base.main_company"), "base.main_company");
//! ```
//!
//! ```
//! use seedbed_core::{FieldLookup, FieldType, ModelSchema, SchemaField};
//!
//! let schema = ModelSchema::new("res.users")
//!     .field(SchemaField::new("login", FieldType::Char))
//!     .inherited(SchemaField::new("name", FieldType::Char));
//!
//! assert!(matches!(schema.lookup("login"), FieldLookup::Direct(_)));
//! assert!(matches!(schema.lookup("name"), FieldLookup::Inherited(_)));
//! assert!(matches!(schema.lookup("email"), FieldLookup::NotFound));
//! ```

mod asset;
mod config;
mod error;
mod schema;
mod store;
mod value;
pub mod xmlid;

pub use asset::{AssetResolver, FeatureContext, FileSystem, OsFileSystem};
pub use config::{LoaderConfig, LoaderConfigBuilder, Mode, DEFAULT_MAX_DOCUMENT_SIZE};
pub use error::{FixtureError, Result, StoreError, StoreResult};
pub use schema::{FieldLookup, FieldType, ModelSchema, SchemaField};
pub use store::{
    Condition, ConnectionGuard, Database, Domain, ImportJobId, ImportOptions, ImportQueue,
    ImportRequest, LoadOptions, LoadResult, Store,
};
pub use value::{FieldValue, RecordId, Relation, Values};
pub use xmlid::IdRef;
