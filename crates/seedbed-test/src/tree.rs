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

//! Temporary project trees with `features/` and `data/` directories.

use seedbed_core::FeatureContext;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway project directory, removed when dropped.
#[derive(Debug)]
pub struct FeatureTree {
    dir: TempDir,
}

impl Default for FeatureTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureTree {
    /// Create `features/` and `data/` under a fresh temporary directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(dir.path().join("features")).expect("create features dir");
        fs::create_dir_all(dir.path().join("data")).expect("create data dir");
        Self { dir }
    }

    /// Project root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `data/<name>`, creating parent directories.
    pub fn write_data(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join("data").join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create data subdir");
        }
        fs::write(&path, content).expect("write data file");
        path
    }

    /// Context of a feature file `features/<name>`.
    pub fn context(&self, name: &str) -> FeatureContext {
        FeatureContext::new(self.dir.path().join("features").join(name))
    }
}
