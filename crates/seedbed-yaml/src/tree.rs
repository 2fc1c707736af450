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

//! Structured fixture tree.
//!
//! A fixture is a YAML sequence of nodes:
//!
//! ```yaml
//! - Partners used by the invoicing scenarios
//! - !record {model: res.partner, id: partner_acme}:
//!     name: Acme
//!     image: !image "img/acme.png"
//! - !record {model: res.partner, id: partner_alice}:
//!     name: Alice
//!     parent_id: {name: Acme}
//! - !search {model: res.company, id: main_company}:
//!     name: YourCompany
//! ```
//!
//! Plain strings are comments. Every other node is a single-entry mapping
//! whose key is a tagged header (`!record` or `!search`) carrying the target
//! model and an optional external identifier.

use crate::error::{Result, YamlError};
use crate::expr::{scalar_text, Expression};
use crate::tags::TagRegistry;
use serde_yaml::{Mapping, Value as YamlValue};
use tracing::warn;

/// What a record node asks the store to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `!record`: create the record, or update it when it already exists.
    Record,
    /// `!search`: find an existing record and bind it.
    Search,
}

/// One record operation of a fixture.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureRecordNode {
    pub kind: NodeKind,
    /// Target model name.
    pub model: String,
    /// External identifier, as written in the fixture.
    pub id: Option<String>,
    /// Field assignments (or search criteria), in fixture order.
    pub fields: Vec<(String, Expression)>,
}

/// A top-level fixture node.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureNode {
    /// Free text, echoed to the log.
    Comment(String),
    Record(FixtureRecordNode),
}

/// Parse fixture text into nodes.
///
/// # Examples
///
/// ```
/// use seedbed_yaml::{parse_fixture, FixtureNode, NodeKind, TagRegistry};
///
/// let yaml = r#"
/// - Partners
/// - !record {model: res.partner, id: alice}:
///     name: Alice
/// "#;
/// let nodes = parse_fixture(yaml, &TagRegistry::with_builtins()).unwrap();
/// assert_eq!(nodes.len(), 2);
/// match &nodes[1] {
///     FixtureNode::Record(node) => {
///         assert_eq!(node.kind, NodeKind::Record);
///         assert_eq!(node.model, "res.partner");
///         assert_eq!(node.id.as_deref(), Some("alice"));
///     }
///     other => panic!("unexpected node {:?}", other),
/// }
/// ```
pub fn parse_fixture(text: &str, tags: &TagRegistry) -> Result<Vec<FixtureNode>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let root: YamlValue = serde_yaml::from_str(text)?;
    let items = match root {
        YamlValue::Sequence(items) => items,
        YamlValue::Null => return Ok(Vec::new()),
        other => {
            return Err(YamlError::InvalidRoot {
                found: type_name(&other).to_string(),
            })
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_node(index, item, tags))
        .collect()
}

fn type_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "boolean",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged value",
    }
}

fn invalid(index: usize, reason: impl Into<String>) -> YamlError {
    YamlError::InvalidNode {
        index,
        reason: reason.into(),
    }
}

fn parse_node(index: usize, item: &YamlValue, tags: &TagRegistry) -> Result<FixtureNode> {
    let map = match item {
        YamlValue::String(text) => return Ok(FixtureNode::Comment(text.clone())),
        YamlValue::Mapping(map) => map,
        other => return Err(invalid(index, format!("unexpected {}", type_name(other)))),
    };
    if map.len() != 1 {
        return Err(invalid(
            index,
            format!("expected a single tagged header, found {} entries", map.len()),
        ));
    }
    let (header, body) = match map.iter().next() {
        Some(entry) => entry,
        None => return Err(invalid(index, "empty node")),
    };

    let tagged = match header {
        YamlValue::Tagged(tagged) => tagged,
        other => return Err(invalid(index, format!("untagged header {:?}", other))),
    };
    let tag = tagged.tag.to_string();
    let kind = match tag.trim_start_matches('!') {
        "record" => NodeKind::Record,
        "search" => NodeKind::Search,
        other => return Err(invalid(index, format!("unsupported node !{}", other))),
    };

    let args = match &tagged.value {
        YamlValue::Mapping(args) => args,
        other => {
            return Err(invalid(
                index,
                format!("{} arguments must be a mapping, found {}", tag, type_name(other)),
            ))
        }
    };
    let (model, id) = header_args(index, &tag, args)?;

    let fields = match body {
        YamlValue::Null => Vec::new(),
        YamlValue::Mapping(fields) => {
            let mut assignments = Vec::with_capacity(fields.len());
            for (name, value) in fields {
                let name = name
                    .as_str()
                    .ok_or_else(|| invalid(index, format!("non-string field name {:?}", name)))?;
                assignments.push((name.to_string(), Expression::from_yaml(value, tags)?));
            }
            assignments
        }
        other => {
            return Err(invalid(
                index,
                format!("field assignments must be a mapping, found {}", type_name(other)),
            ))
        }
    };

    Ok(FixtureNode::Record(FixtureRecordNode {
        kind,
        model,
        id,
        fields,
    }))
}

fn header_args(index: usize, tag: &str, args: &Mapping) -> Result<(String, Option<String>)> {
    let mut model = None;
    let mut id = None;
    for (key, value) in args {
        match key.as_str() {
            Some("model") => model = value.as_str().map(str::to_string),
            Some("id") => id = scalar_text(value),
            Some(other) => warn!(node = index, "Ignoring {} argument '{}'", tag, other),
            None => return Err(invalid(index, format!("non-string {} argument", tag))),
        }
    }
    let model = model.ok_or_else(|| invalid(index, format!("{} requires a model", tag)))?;
    Ok((model, id))
}
