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

//! Loader configuration.

/// Default maximum structured fixture size: 64 MB
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 64 * 1024 * 1024;

/// How structured fixtures treat records whose external identifier already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Always create new records.
    Init,
    /// Write to the existing record when its identifier resolves.
    #[default]
    Update,
}

impl Mode {
    /// Lower-case mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Update => "update",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "init" => Ok(Self::Init),
            "update" => Ok(Self::Update),
            other => Err(format!("Unknown load mode: {}", other)),
        }
    }
}

/// Configuration shared by every fixture loader.
///
/// # Examples
///
/// ```rust
/// use seedbed_core::{LoaderConfig, Mode};
///
/// let config = LoaderConfig::default();
/// assert_eq!(config.namespace, "scenario");
/// assert_eq!(config.data_dir, "data");
/// assert_eq!(config.features_dir, "features");
/// assert_eq!(config.delimiter, b',');
/// assert_eq!(config.mode, Mode::Update);
///
/// let config = LoaderConfig::builder()
///     .namespace("smoke")
///     .delimiter(b';')
///     .mode(Mode::Init)
///     .build();
/// assert_eq!(config.namespace, "smoke");
/// ```
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Namespace token prefixed to bare external identifiers.
    pub namespace: String,
    /// Ancestor directory of feature files the data directory is anchored on.
    pub features_dir: String,
    /// Name of the data directory next to `features_dir`.
    pub data_dir: String,
    /// Default CSV delimiter.
    pub delimiter: u8,
    /// Structured fixture load mode.
    pub mode: Mode,
    /// Maximum structured fixture size in bytes.
    pub max_document_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            namespace: "scenario".to_string(),
            features_dir: "features".to_string(),
            data_dir: "data".to_string(),
            delimiter: b',',
            mode: Mode::Update,
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
        }
    }
}

impl LoaderConfig {
    /// Creates a new builder for `LoaderConfig`.
    pub fn builder() -> LoaderConfigBuilder {
        LoaderConfigBuilder::new()
    }
}

/// Builder for [`LoaderConfig`].
#[derive(Debug, Clone, Default)]
pub struct LoaderConfigBuilder {
    config: LoaderConfig,
}

impl LoaderConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the identifier namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Sets the anchor directory name.
    pub fn features_dir(mut self, name: impl Into<String>) -> Self {
        self.config.features_dir = name.into();
        self
    }

    /// Sets the data directory name.
    pub fn data_dir(mut self, name: impl Into<String>) -> Self {
        self.config.data_dir = name.into();
        self
    }

    /// Sets the default CSV delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Sets the structured fixture mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Sets the maximum structured fixture size.
    pub fn max_document_size(mut self, size: usize) -> Self {
        self.config.max_document_size = size;
        self
    }

    /// Builds the `LoaderConfig`.
    pub fn build(self) -> LoaderConfig {
        self.config
    }
}
