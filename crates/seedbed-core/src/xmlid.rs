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

//! External identifier namespace rules.
//!
//! Fixture records get external identifiers in a private namespace
//! (`scenario` by default). Any identifier written without a namespace
//! separator is prefixed with it, so a fixture can never silently alias a
//! pre-existing identifier of the same literal name.

use crate::value::RecordId;
use std::collections::HashMap;

/// Separator between namespace and local name.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Returns true for columns holding external identifiers: `id` and `*/id`.
pub fn is_identifier_field(name: &str) -> bool {
    name == "id" || name.ends_with("/id")
}

/// Prefix `value` with `namespace` unless it already carries one.
pub fn namespace_identifier(namespace: &str, value: &str) -> String {
    if value.contains(NAMESPACE_SEPARATOR) {
        value.to_string()
    } else {
        format!("{}{}{}", namespace, NAMESPACE_SEPARATOR, value)
    }
}

/// Symbolic name to record identifier table, local to one fixture load.
#[derive(Debug, Clone, Default)]
pub struct IdRef {
    refs: HashMap<String, RecordId>,
}

impl IdRef {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record identifier bound to a namespaced name.
    pub fn get(&self, xml_id: &str) -> Option<RecordId> {
        self.refs.get(xml_id).copied()
    }

    /// Bind a namespaced name.
    pub fn insert(&mut self, xml_id: impl Into<String>, id: RecordId) {
        self.refs.insert(xml_id.into(), id);
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identifier_fields() {
        assert!(is_identifier_field("id"));
        assert!(is_identifier_field("partner_id/id"));
        assert!(is_identifier_field("child_ids/id"));
        assert!(!is_identifier_field("partner_id"));
        assert!(!is_identifier_field("id/name"));
        assert!(!is_identifier_field("uid"));
    }

    #[test]
    fn test_namespace_identifier() {
        assert_eq!(namespace_identifier("scenario", "42"), "scenario.42");
        assert_eq!(namespace_identifier("scenario", "base.be"), "base.be");
        assert_eq!(namespace_identifier("scenario", ""), "scenario.");
    }

    #[test]
    fn test_idref() {
        let mut idref = IdRef::new();
        assert!(idref.is_empty());
        idref.insert("scenario.alice", 12);
        assert_eq!(idref.get("scenario.alice"), Some(12));
        assert_eq!(idref.get("alice"), None);
        assert_eq!(idref.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_bare_values_are_prefixed(value in "[a-zA-Z0-9_]{0,24}") {
            prop_assert_eq!(
                namespace_identifier("scenario", &value),
                format!("scenario.{}", value)
            );
        }

        #[test]
        fn prop_qualified_values_are_unchanged(
            module in "[a-z_]{1,12}",
            name in "[a-z0-9_.]{0,12}",
        ) {
            let value = format!("{}.{}", module, name);
            prop_assert_eq!(namespace_identifier("scenario", &value), value);
        }
    }
}
