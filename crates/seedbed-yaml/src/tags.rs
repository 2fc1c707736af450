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

//! Scalar tag registry.
//!
//! A scalar tag marks a literal with a custom meaning, e.g.
//! `image: !image "img/logo.png"`. Each interpreter owns a [`TagRegistry`]
//! mapping tag names to constructors; the parser consults it for every tagged
//! field value, so registering a tag never leaks into other interpreters.

use crate::expr::{AssetReference, Expression};
use std::collections::BTreeMap;

/// Turns the scalar payload of a tag into an expression.
pub type TagConstructor = fn(&str) -> std::result::Result<Expression, String>;

/// Tag name to constructor table.
///
/// # Examples
///
/// ```
/// use seedbed_yaml::{Expression, TagRegistry};
///
/// let mut tags = TagRegistry::with_builtins();
/// assert!(tags.contains("image"));
/// assert!(tags.contains("ref"));
///
/// tags.register("upper", |payload| Ok(Expression::Str(payload.to_uppercase())));
/// assert_eq!(
///     tags.construct("upper", "acme").unwrap(),
///     Some(Expression::Str("ACME".to_string()))
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    constructors: BTreeMap<String, TagConstructor>,
}

impl TagRegistry {
    /// Registry with no tags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `!image` and `!ref`.
    pub fn with_builtins() -> Self {
        let mut tags = Self::new();
        tags.register("image", image_tag);
        tags.register("ref", ref_tag);
        tags
    }

    /// Register `constructor` for `!name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, constructor: TagConstructor) {
        let name = name.into();
        let name = name.trim_start_matches('!').to_string();
        self.constructors.insert(name, constructor);
    }

    /// Returns true if `!name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name.trim_start_matches('!'))
    }

    /// Run the constructor of `!name`; `None` when the tag is unknown.
    pub fn construct(
        &self,
        name: &str,
        payload: &str,
    ) -> std::result::Result<Option<Expression>, String> {
        match self.constructors.get(name.trim_start_matches('!')) {
            Some(constructor) => constructor(payload).map(Some),
            None => Ok(None),
        }
    }
}

/// `!image "path"`: embed a file from the data directory.
fn image_tag(payload: &str) -> std::result::Result<Expression, String> {
    if payload.trim().is_empty() {
        return Err("expected a fixture-relative file path".to_string());
    }
    Ok(Expression::Asset(AssetReference::new(payload)))
}

/// `!ref name`: the record bound to an external identifier.
fn ref_tag(payload: &str) -> std::result::Result<Expression, String> {
    if payload.trim().is_empty() {
        return Err("expected an external identifier".to_string());
    }
    Ok(Expression::Ref(payload.to_string()))
}
