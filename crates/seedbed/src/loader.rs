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

//! Structured fixture loading on a dedicated connection.

use crate::error::Result;
use seedbed_core::{AssetResolver, ConnectionGuard, Database, FixtureError, IdRef, LoaderConfig};
use seedbed_yaml::{Interpreter, InterpreterConfig, YamlError};
use std::io::{self, Read};
use tracing::info;

/// Load a structured fixture read from `reader`.
///
/// A connection is taken from `db` in auto-commit mode and closed when the
/// load ends, whether it succeeded or not. External identifiers are resolved
/// against a reference table private to this call; the namespace and mode
/// come from `config`.
pub fn load_structured_fixture<R: Read>(
    assets: &AssetResolver,
    db: &dyn Database,
    config: &LoaderConfig,
    reader: R,
) -> Result<()> {
    let mut conn = ConnectionGuard::open(db)?;
    conn.set_autocommit(true)?;

    // One byte over the limit is enough to reject the document.
    let limit = u64::try_from(config.max_document_size)
        .unwrap_or(u64::MAX)
        .saturating_add(1);
    let mut content = Vec::new();
    reader
        .take(limit)
        .read_to_end(&mut content)
        .map_err(FixtureError::from)?;
    if content.len() > config.max_document_size {
        return Err(YamlError::DocumentTooLarge {
            size: content.len(),
            max_size: config.max_document_size,
        }
        .into());
    }
    let text = String::from_utf8(content)
        .map_err(|err| FixtureError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))?;

    let mut idref = IdRef::new();
    let mut interpreter = Interpreter::new(
        &mut *conn,
        assets,
        &mut idref,
        InterpreterConfig::from(config.clone()),
    );
    interpreter.process(&text)?;
    info!(
        namespace = %config.namespace,
        mode = config.mode.as_str(),
        bound = idref.len(),
        "Loaded structured fixture"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use seedbed_test::{FeatureTree, MemoryDatabase};

    fn assets(tree: &FeatureTree) -> AssetResolver {
        AssetResolver::new(&tree.context("load.feature"), &LoaderConfig::default()).unwrap()
    }

    #[test]
    fn test_connection_closed_after_success() {
        let tree = FeatureTree::new();
        let db = MemoryDatabase::with_standard_schemas();
        let yaml = "- !record {model: res.partner, id: acme}:\n    name: Acme\n";

        load_structured_fixture(&assets(&tree), &db, &LoaderConfig::default(), yaml.as_bytes())
            .unwrap();

        assert_eq!(db.connection_counts(), (1, 1));
        assert!(db.autocommit());
        assert_eq!(db.records("res.partner").len(), 1);
    }

    #[test]
    fn test_connection_closed_after_failure() {
        let tree = FeatureTree::new();
        let db = MemoryDatabase::with_standard_schemas();
        let yaml = "- !record {model: res.partner}:\n    nickname: Acme\n";

        let err =
            load_structured_fixture(&assets(&tree), &db, &LoaderConfig::default(), yaml.as_bytes())
                .unwrap_err();

        assert!(matches!(err, Error::Yaml(YamlError::Fixture(FixtureError::Schema { .. }))));
        assert_eq!(db.connection_counts(), (1, 1));
    }

    #[test]
    fn test_oversized_document() {
        let tree = FeatureTree::new();
        let db = MemoryDatabase::with_standard_schemas();
        let config = LoaderConfig::builder().max_document_size(4).build();

        let err = load_structured_fixture(&assets(&tree), &db, &config, "- comment".as_bytes())
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Yaml(YamlError::DocumentTooLarge { size: 5, max_size: 4 })
        ));
        assert_eq!(db.connection_counts(), (1, 1));
    }

    #[test]
    fn test_each_load_has_its_own_reference_table() {
        let tree = FeatureTree::new();
        let db = MemoryDatabase::with_standard_schemas();
        let config = LoaderConfig::builder().mode(seedbed_core::Mode::Init).build();
        let first = "- !record {model: res.partner, id: acme}:\n    name: Acme\n";
        let second = "- !record {model: res.partner, id: acme}:\n    name: Acme 2\n";

        load_structured_fixture(&assets(&tree), &db, &config, first.as_bytes()).unwrap();
        load_structured_fixture(&assets(&tree), &db, &config, second.as_bytes()).unwrap();

        assert_eq!(db.records("res.partner").len(), 2);
        assert_eq!(db.connection_counts(), (2, 2));
    }
}
