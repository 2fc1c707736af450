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

//! Unified error type for fixture steps.

use seedbed_core::{FixtureError, StoreError};
use seedbed_csv::CsvError;
use seedbed_yaml::YamlError;
use thiserror::Error;

/// Any failure of a fixture step.
///
/// Messages of the wrapped errors are shown unchanged, so a failed step
/// reports the originating error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error(transparent)]
    Yaml(#[from] YamlError),

    /// No registered step matches the phrase
    #[error("Undefined step: {0}")]
    UnknownStep(String),

    /// The step needs the background import service, which was not provided
    #[error("Step '{step}' requires an import queue")]
    MissingImportQueue { step: String },

    /// A step argument could not be converted
    #[error("Invalid value '{value}' for {name}: {reason}")]
    InvalidArgument {
        name: String,
        value: String,
        reason: String,
    },

    /// A step phrase template did not compile
    #[error("Invalid step pattern: {0}")]
    InvalidStepPattern(#[from] regex::Error),
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Fixture(FixtureError::Store(err))
    }
}

/// Result type for fixture steps.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_messages_are_unchanged() {
        let err = Error::from(CsvError::Import {
            file: "partners.csv".to_string(),
            model: "res.partner".to_string(),
            messages: vec!["line 2: invalid code".to_string()],
        });
        assert_eq!(
            err.to_string(),
            "Failed to load file 'partners.csv' in 'res.partner'. Details:\n- line 2: invalid code"
        );
    }

    #[test]
    fn test_store_error() {
        let err = Error::from(StoreError::new("connection refused"));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_unknown_step() {
        let err = Error::UnknownStep("I dance".to_string());
        assert_eq!(err.to_string(), "Undefined step: I dance");
    }
}
