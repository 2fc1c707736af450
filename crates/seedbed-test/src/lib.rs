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

//! Shared test doubles and fixtures for Seedbed loaders.
//!
//! # Quick Start
//!
//! ```rust
//! use seedbed_test::{schemas, FeatureTree, MemoryDatabase};
//!
//! let db = MemoryDatabase::new().with_schema(schemas::partner());
//! let tree = FeatureTree::new();
//! tree.write_data("partners.csv", "name,email\nAlice,alice@example.com\n");
//! let ctx = tree.context("partners.feature");
//! # let _ = (db, ctx);
//! ```

mod memory;
pub mod schemas;
mod tree;

pub use memory::{BulkLoad, MemoryDatabase, SubmittedImport};
pub use tree::FeatureTree;

/// Install a `tracing` subscriber honouring `RUST_LOG`, once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
