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

//! Structured (YAML) fixture interpreter.
//!
//! A structured fixture lists record nodes to create, update or look up:
//!
//! ```yaml
//! - Partners used by the invoicing scenarios
//! - !record {model: res.partner, id: partner_acme}:
//!     name: Acme
//!     image: !image "img/acme.png"
//! - !record {model: res.users, id: user_alice}:
//!     login: alice
//!     name: Alice
//!     partner_id: {name: Acme}
//! ```
//!
//! # Field resolution
//!
//! Every assignment is checked against the model's fields, then the fields
//! it inherits; unknown fields fail with `FixtureError::Schema`. Values are
//! then resolved by the first matching rule:
//!
//! - a mapping on a reference-to-one field is a search on the referenced
//!   model, stored as the list of matching ids;
//! - `!image "path"` becomes the base64 encoding of the file's bytes, read
//!   from the data directory;
//! - anything else is a literal, an external identifier or nested records.
//!
//! # Scalar tags
//!
//! `!image` and `!ref` are built in. More tags can be added through
//! [`TagRegistry::register`] without touching the interpreter.

mod error;
mod expr;
mod interpreter;
mod resolve;
mod tags;
mod tree;

pub use error::{Result, YamlError};
pub use expr::{AssetReference, Expression};
pub use interpreter::{EvalContext, Interpreter, InterpreterConfig, ParentContext};
pub use tags::{TagConstructor, TagRegistry};
pub use tree::{parse_fixture, FixtureNode, FixtureRecordNode, NodeKind};
