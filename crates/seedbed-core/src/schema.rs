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

//! Model schema metadata and the two-tier field lookup.

use std::collections::BTreeMap;

/// Declared type of a model field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldType {
    Char,
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    Datetime,
    Binary,
    Selection,
    /// Reference to one record of the named model.
    ManyToOne(String),
    /// Inverse side of a reference, pointing at the named model.
    OneToMany(String),
    /// Reference to any number of records of the named model.
    ManyToMany(String),
}

impl FieldType {
    /// Returns true for a reference-to-one-record field.
    pub fn is_many2one(&self) -> bool {
        matches!(self, Self::ManyToOne(_))
    }

    /// Returns true for one-to-many and many-to-many fields.
    pub fn is_to_many(&self) -> bool {
        matches!(self, Self::OneToMany(_) | Self::ManyToMany(_))
    }

    /// Name of the referenced model for relational fields.
    pub fn relation(&self) -> Option<&str> {
        match self {
            Self::ManyToOne(model) | Self::OneToMany(model) | Self::ManyToMany(model) => {
                Some(model)
            }
            _ => None,
        }
    }
}

/// Metadata for one field of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemaField {
    /// Field name.
    pub name: String,
    /// Declared type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub field_type: FieldType,
}

impl SchemaField {
    /// Create field metadata.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Result of looking a field up in a [`ModelSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLookup<'a> {
    /// Declared directly on the model.
    Direct(&'a SchemaField),
    /// Inherited from a parent schema.
    Inherited(&'a SchemaField),
    /// Present in neither table.
    NotFound,
}

impl<'a> FieldLookup<'a> {
    /// The field metadata, wherever it was found.
    pub fn field(self) -> Option<&'a SchemaField> {
        match self {
            Self::Direct(field) | Self::Inherited(field) => Some(field),
            Self::NotFound => None,
        }
    }
}

/// Schema of one model as reported by the store.
///
/// The store owns this metadata. Loaders query it per evaluation and never
/// keep it across calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelSchema {
    /// Model name, e.g. `res.partner`.
    pub model: String,
    /// Fields declared on the model itself.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fields: BTreeMap<String, SchemaField>,
    /// Fields inherited from parent models.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inherited_fields: BTreeMap<String, SchemaField>,
}

impl ModelSchema {
    /// Create an empty schema for `model`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a direct field.
    pub fn field(mut self, field: SchemaField) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Add an inherited field.
    pub fn inherited(mut self, field: SchemaField) -> Self {
        self.inherited_fields.insert(field.name.clone(), field);
        self
    }

    /// Find `name` in the direct table first, then in the inherited table.
    pub fn lookup(&self, name: &str) -> FieldLookup<'_> {
        if let Some(field) = self.fields.get(name) {
            FieldLookup::Direct(field)
        } else if let Some(field) = self.inherited_fields.get(name) {
            FieldLookup::Inherited(field)
        } else {
            FieldLookup::NotFound
        }
    }
}
