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

//! Field expressions of structured fixtures.

use crate::error::{Result, YamlError};
use crate::tags::TagRegistry;
use serde_yaml::Value as YamlValue;

/// A fixture-relative file path produced by the `!image` tag.
///
/// Lives only between parsing and the evaluation of the field it is assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    /// Path relative to the data directory.
    pub path: String,
}

impl AssetReference {
    /// Reference to `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl std::fmt::Display for AssetReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "!image '{}'", self.path)
    }
}

/// The raw value assigned to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Key/value pairs: search criteria on a reference field, or a nested record.
    Mapping(Vec<(String, Expression)>),
    Sequence(Vec<Expression>),
    /// File to embed, from `!image`.
    Asset(AssetReference),
    /// External identifier, from `!ref`.
    Ref(String),
}

impl Expression {
    /// Returns true for a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// Short description used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
            Self::Asset(_) => "asset",
            Self::Ref(_) => "reference",
        }
    }

    /// Convert a YAML value, running tagged scalars through `tags`.
    pub fn from_yaml(value: &YamlValue, tags: &TagRegistry) -> Result<Self> {
        match value {
            YamlValue::Null => Ok(Self::Null),
            YamlValue::Bool(b) => Ok(Self::Bool(*b)),
            YamlValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(YamlError::ParseError(format!("Invalid number: {:?}", n)))
                }
            }
            YamlValue::String(s) => Ok(Self::Str(s.clone())),
            YamlValue::Sequence(seq) => seq
                .iter()
                .map(|item| Self::from_yaml(item, tags))
                .collect::<Result<Vec<_>>>()
                .map(Self::Sequence),
            YamlValue::Mapping(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (key, item) in map {
                    let key = scalar_text(key).ok_or_else(|| {
                        YamlError::ParseError(format!("Non-scalar mapping key: {:?}", key))
                    })?;
                    entries.push((key, Self::from_yaml(item, tags)?));
                }
                Ok(Self::Mapping(entries))
            }
            YamlValue::Tagged(tagged) => {
                let tag = tagged.tag.to_string();
                let tag = tag.trim_start_matches('!');
                let payload =
                    scalar_text(&tagged.value).ok_or_else(|| YamlError::InvalidTagPayload {
                        tag: tag.to_string(),
                        reason: "expected a scalar".to_string(),
                    })?;
                tags.construct(tag, &payload)
                    .map_err(|reason| YamlError::InvalidTagPayload {
                        tag: tag.to_string(),
                        reason,
                    })?
                    .ok_or_else(|| YamlError::UnknownTag {
                        tag: tag.to_string(),
                    })
            }
        }
    }
}

/// Text of a string, number or boolean scalar.
pub(crate) fn scalar_text(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<Expression> {
        let value: YamlValue = serde_yaml::from_str(yaml).unwrap();
        Expression::from_yaml(&value, &TagRegistry::with_builtins())
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parse("~").unwrap(), Expression::Null);
        assert_eq!(parse("true").unwrap(), Expression::Bool(true));
        assert_eq!(parse("42").unwrap(), Expression::Int(42));
        assert_eq!(parse("2.5").unwrap(), Expression::Float(2.5));
        assert_eq!(parse("Alice").unwrap(), Expression::Str("Alice".to_string()));
    }

    #[test]
    fn test_tagged_asset() {
        assert_eq!(
            parse("!image \"img/logo.png\"").unwrap(),
            Expression::Asset(AssetReference::new("img/logo.png"))
        );
    }

    #[test]
    fn test_tagged_ref() {
        assert_eq!(
            parse("!ref partner_acme").unwrap(),
            Expression::Ref("partner_acme".to_string())
        );
    }

    #[test]
    fn test_mapping_keeps_order() {
        let expr = parse("{name: Alice, ref: A1}").unwrap();
        assert_eq!(
            expr,
            Expression::Mapping(vec![
                ("name".to_string(), Expression::Str("Alice".to_string())),
                ("ref".to_string(), Expression::Str("A1".to_string())),
            ])
        );
    }

    #[test]
    fn test_tags_inside_sequences() {
        let expr = parse("[!ref a, !ref b]").unwrap();
        assert_eq!(
            expr,
            Expression::Sequence(vec![
                Expression::Ref("a".to_string()),
                Expression::Ref("b".to_string()),
            ])
        );
    }

    #[test]
    fn test_unknown_tag() {
        assert!(matches!(
            parse("!python \"1 + 1\""),
            Err(YamlError::UnknownTag { tag }) if tag == "python"
        ));
    }

    #[test]
    fn test_non_scalar_payload() {
        assert!(matches!(
            parse("!image [a, b]"),
            Err(YamlError::InvalidTagPayload { .. })
        ));
    }
}
