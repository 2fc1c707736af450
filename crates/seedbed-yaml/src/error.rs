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

//! Error types for structured fixture interpretation.

use seedbed_core::{FixtureError, StoreError};
use thiserror::Error;

/// Errors that can occur while interpreting a structured fixture.
#[derive(Debug, Error)]
pub enum YamlError {
    /// File resolution, schema or store failure.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// YAML parsing failed
    #[error("YAML parse error: {0}")]
    ParseError(String),

    /// Root element must be a sequence of nodes
    #[error("Fixture root must be a YAML sequence, found {found}")]
    InvalidRoot { found: String },

    /// A top-level node is neither a comment nor a tagged record header
    #[error("Invalid fixture node #{index}: {reason}")]
    InvalidNode { index: usize, reason: String },

    /// No constructor is registered for a scalar tag
    #[error("Unknown tag !{tag}")]
    UnknownTag { tag: String },

    /// The tagged value is not a usable scalar
    #[error("Invalid payload for !{tag}: {reason}")]
    InvalidTagPayload { tag: String, reason: String },

    /// The expression cannot be assigned to the field
    #[error("Invalid value for field '{field}' of '{model}': {reason}")]
    InvalidExpression {
        model: String,
        field: String,
        reason: String,
    },

    /// Document too large
    #[error("Document size {size} bytes exceeds maximum of {max_size} bytes")]
    DocumentTooLarge { size: usize, max_size: usize },
}

impl From<serde_yaml::Error> for YamlError {
    fn from(err: serde_yaml::Error) -> Self {
        YamlError::ParseError(err.to_string())
    }
}

impl From<StoreError> for YamlError {
    fn from(err: StoreError) -> Self {
        YamlError::Fixture(FixtureError::Store(err))
    }
}

/// Result type for structured fixtures.
pub type Result<T> = std::result::Result<T, YamlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag_display() {
        let err = YamlError::UnknownTag {
            tag: "python".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown tag !python");
    }

    #[test]
    fn test_invalid_expression_display() {
        let err = YamlError::InvalidExpression {
            model: "res.partner".to_string(),
            field: "name".to_string(),
            reason: "mappings are only accepted on relational fields".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for field 'name' of 'res.partner': mappings are only accepted on relational fields"
        );
    }

    #[test]
    fn test_schema_error_passes_through() {
        let err = YamlError::from(FixtureError::Schema {
            model: "res.users".to_string(),
            field: "nickname".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Object 'res.users' does not contain field 'nickname'"
        );
    }

    #[test]
    fn test_from_serde_yaml() {
        let err = serde_yaml::from_str::<serde_yaml::Value>("- [unclosed").unwrap_err();
        assert!(matches!(YamlError::from(err), YamlError::ParseError(_)));
    }
}
