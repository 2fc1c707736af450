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

//! Values submitted to the record store.

/// Identifier of a stored record.
pub type RecordId = i64;

/// A resolved field value, ready to be sent to the store.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    /// Empty value (also an empty reference).
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value, including base64-encoded binary content.
    Text(String),
    /// A single record identifier.
    Id(RecordId),
    /// Identifiers exactly as returned by a store search or listed in a fixture.
    Ids(Vec<RecordId>),
    /// Nested record values for a to-many field.
    Records(Vec<Values>),
    /// A to-many assignment mixing links to existing records and new ones.
    Relations(Vec<Relation>),
}

/// One element of a to-many assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    /// Link an existing record.
    Link(RecordId),
    /// Create a related record from these values.
    Create(Values),
}

impl FieldValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get the value as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a single record identifier.
    ///
    /// Reference-to-one assignments resolve to this form.
    ///
    /// ```
    /// use seedbed_core::FieldValue;
    ///
    /// assert_eq!(FieldValue::Id(7).as_id(), Some(7));
    /// assert_eq!(FieldValue::Null.as_id(), None);
    /// ```
    pub fn as_id(&self) -> Option<RecordId> {
        match self {
            Self::Id(id) => Some(*id),
            _ => None,
        }
    }

    /// Try to get the value as a list of identifiers.
    ///
    /// Search-criteria references and to-many reference lists resolve to
    /// this form.
    ///
    /// ```
    /// use seedbed_core::FieldValue;
    ///
    /// assert_eq!(FieldValue::Ids(vec![3, 4]).as_ids(), Some(&[3, 4][..]));
    /// assert_eq!(FieldValue::Id(3).as_ids(), None);
    /// ```
    pub fn as_ids(&self) -> Option<&[RecordId]> {
        match self {
            Self::Ids(ids) => Some(ids),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "false"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
            Self::Id(id) => write!(f, "{}", id),
            Self::Ids(ids) => write!(f, "{:?}", ids),
            Self::Records(rows) => write!(f, "[{} records]", rows.len()),
            Self::Relations(items) => write!(f, "[{} relations]", items.len()),
        }
    }
}

/// Ordered field assignments for one record.
///
/// Assigning a field twice replaces the earlier value in place, so store
/// defaults can be overridden by fixture assignments without reordering.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Values {
    entries: Vec<(String, FieldValue)>,
}

impl Values {
    /// Create an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to `field`, replacing any previous assignment.
    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        let field = field.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Builder-style [`Values::set`].
    pub fn with(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.set(field, value);
        self
    }

    /// Look up the value assigned to `field`.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Iterate over assignments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of assigned fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no field is assigned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay `other` on top of these values.
    pub fn extend(&mut self, other: Values) {
        for (field, value) in other.entries {
            self.set(field, value);
        }
    }
}

impl FromIterator<(String, FieldValue)> for Values {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut values = Values::new();
        for (field, value) in iter {
            values.set(field, value);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut values = Values::new()
            .with("name", "Draft".into())
            .with("active", true.into());
        values.set("name", "Final".into());

        let names: Vec<&str> = values.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["name", "active"]);
        assert_eq!(values.get("name"), Some(&FieldValue::Text("Final".to_string())));
    }

    #[test]
    fn test_extend_overrides_defaults() {
        let mut values = Values::new()
            .with("lang", "en_US".into())
            .with("active", true.into());
        values.extend(Values::new().with("lang", "fr_FR".into()));

        assert_eq!(values.len(), 2);
        assert_eq!(values.get("lang").and_then(FieldValue::as_text), Some("fr_FR"));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(FieldValue::Id(7).as_id(), Some(7));
        assert_eq!(FieldValue::Ids(vec![1, 2]).as_ids(), Some(&[1, 2][..]));
        assert!(FieldValue::Null.is_null());
        assert_eq!(FieldValue::Int(3).as_id(), None);
    }

    #[test]
    fn test_relations_display() {
        let value = FieldValue::Relations(vec![
            Relation::Create(Values::new().with("name", "Kid".into())),
            Relation::Link(4),
        ]);
        assert_eq!(value.to_string(), "[2 relations]");
    }
}
