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

//! Fixture file resolution under the data directory.
//!
//! Fixture files live in a `data` directory that is a sibling of the
//! feature tree:
//!
//! ```text
//! project/
//! ├── features/
//! │   └── partners/import.feature
//! └── data/
//!     ├── partners.csv
//!     └── img/logo.png
//! ```
//!
//! The data directory is found by truncating the current feature file's path
//! at its `features` ancestor and appending `data`.

use crate::config::LoaderConfig;
use crate::error::{FixtureError, Result};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// File system operations the loaders consume.
pub trait FileSystem {
    /// Returns true if `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Open `path` for reading.
    fn open(&self, path: &Path) -> std::io::Result<Box<dyn Read>>;
}

/// The operating system's file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn open(&self, path: &Path) -> std::io::Result<Box<dyn Read>> {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

/// The test-runner context a fixture step executes in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureContext {
    /// Path of the feature file currently running.
    pub feature_path: PathBuf,
}

impl FeatureContext {
    /// Context for the feature file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            feature_path: path.into(),
        }
    }
}

/// Resolves fixture-relative names to files under the data directory.
#[derive(Clone)]
pub struct AssetResolver {
    data_dir: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl std::fmt::Debug for AssetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetResolver")
            .field("data_dir", &self.data_dir)
            .finish_non_exhaustive()
    }
}

impl AssetResolver {
    /// Resolver anchored on `ctx`'s feature file, reading from the OS file system.
    pub fn new(ctx: &FeatureContext, config: &LoaderConfig) -> Result<Self> {
        Self::with_file_system(ctx, config, Arc::new(OsFileSystem))
    }

    /// Resolver reading through a custom file system.
    pub fn with_file_system(
        ctx: &FeatureContext,
        config: &LoaderConfig,
        fs: Arc<dyn FileSystem>,
    ) -> Result<Self> {
        let anchor = OsStr::new(&config.features_dir);
        let mut components = ctx.feature_path.components();
        let mut root = PathBuf::new();
        loop {
            match components.next() {
                Some(Component::Normal(segment)) if segment == anchor => break,
                Some(component) => root.push(component),
                None => {
                    return Err(FixtureError::MissingAnchor {
                        path: ctx.feature_path.clone(),
                        anchor: config.features_dir.clone(),
                    })
                }
            }
        }

        Ok(Self {
            data_dir: root.join(&config.data_dir),
            fs,
        })
    }

    /// The data directory names are resolved against.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Absolute path of `name`, checked for existence.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        let relative = Path::new(name);
        let stays_inside = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if name.is_empty() || !stays_inside {
            return Err(FixtureError::PathEscape {
                name: name.to_string(),
            });
        }

        let path = self.data_dir.join(relative);
        if !self.fs.exists(&path) {
            return Err(FixtureError::NotFound { path });
        }
        debug!(path = %path.display(), "Resolved fixture file");
        Ok(path)
    }

    /// Open `name` for reading. The handle is released when dropped.
    pub fn open(&self, name: &str) -> Result<Box<dyn Read>> {
        let path = self.path_for(name)?;
        Ok(self.fs.open(&path)?)
    }

    /// Read the whole content of `name`.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let mut reader = self.open(name)?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> (tempfile::TempDir, FeatureContext) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("features/partners")).unwrap();
        fs::create_dir_all(dir.path().join("data/img")).unwrap();
        fs::write(dir.path().join("data/partners.csv"), b"name\nAlice\n").unwrap();
        fs::write(dir.path().join("data/img/logo.png"), [0x89, b'P', b'N', b'G']).unwrap();
        let ctx = FeatureContext::new(dir.path().join("features/partners/import.feature"));
        (dir, ctx)
    }

    #[test]
    fn test_data_dir_is_sibling_of_features() {
        let (dir, ctx) = tree();
        let resolver = AssetResolver::new(&ctx, &LoaderConfig::default()).unwrap();
        assert_eq!(resolver.data_dir(), dir.path().join("data"));
    }

    #[test]
    fn test_read_nested_asset() {
        let (_dir, ctx) = tree();
        let resolver = AssetResolver::new(&ctx, &LoaderConfig::default()).unwrap();
        assert_eq!(resolver.read("img/logo.png").unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let (dir, ctx) = tree();
        let resolver = AssetResolver::new(&ctx, &LoaderConfig::default()).unwrap();
        match resolver.open("missing.csv") {
            Err(FixtureError::NotFound { path }) => {
                assert_eq!(path, dir.path().join("data/missing.csv"))
            }
            other => panic!("Expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_escaping_names_are_rejected() {
        let (_dir, ctx) = tree();
        let resolver = AssetResolver::new(&ctx, &LoaderConfig::default()).unwrap();
        for name in ["../features/partners/import.feature", "/etc/passwd", ""] {
            assert!(
                matches!(resolver.path_for(name), Err(FixtureError::PathEscape { .. })),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_relative_feature_path() {
        let ctx = FeatureContext::new("features/login.feature");
        let resolver = AssetResolver::new(&ctx, &LoaderConfig::default()).unwrap();
        assert_eq!(resolver.data_dir(), Path::new("data"));
    }

    #[test]
    fn test_first_features_ancestor_wins() {
        let ctx = FeatureContext::new("/srv/features/app/features/login.feature");
        let resolver = AssetResolver::new(&ctx, &LoaderConfig::default()).unwrap();
        assert_eq!(resolver.data_dir(), Path::new("/srv/data"));
    }

    #[test]
    fn test_missing_anchor() {
        let ctx = FeatureContext::new("/srv/specs/login.feature");
        let err = AssetResolver::new(&ctx, &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, FixtureError::MissingAnchor { .. }));
    }
}
