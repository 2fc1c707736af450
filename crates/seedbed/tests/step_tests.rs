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

//! End-to-end tests of the fixture steps.

use seedbed::csv::CsvError;
use seedbed::yaml::YamlError;
use seedbed::{
    Error, FeatureContext, FieldValue, FixtureError, ImportOptions, LoadResult, StepContext,
    StepRegistry, Values,
};
use seedbed_test::{init_tracing, FeatureTree, MemoryDatabase};

fn setup() -> (FeatureTree, MemoryDatabase, StepRegistry) {
    init_tracing();
    (
        FeatureTree::new(),
        MemoryDatabase::with_standard_schemas(),
        StepRegistry::standard().unwrap(),
    )
}

#[test]
fn test_load_csv_step() {
    let (tree, db, steps) = setup();
    tree.write_data("partners.csv", "id,name,,parent_id/id\np1,Acme,x,\np2,Alice,y,p1\n");
    let ctx = StepContext::new(tree.context("partners.feature"), &db);

    steps
        .dispatch(
            &ctx,
            r#"I load the data file "partners.csv" into the model "res.partner""#,
        )
        .unwrap();

    let loads = db.bulk_loads();
    assert_eq!(loads.len(), 1);
    assert_eq!(loads[0].fields, vec!["id", "name", "parent_id/id"]);
    assert_eq!(
        loads[0].rows,
        vec![
            vec!["scenario.p1", "Acme", "scenario."],
            vec!["scenario.p2", "Alice", "scenario.p1"],
        ]
    );
    assert_eq!(db.connection_counts(), (1, 1));
}

#[test]
fn test_load_yaml_step() {
    let (tree, db, steps) = setup();
    let acme = db.insert("res.partner", Values::new().with("name", FieldValue::from("Acme")));
    tree.write_data("img/alice.png", b"\x89PNG");
    tree.write_data(
        "users.yml",
        r#"
- Users of the invoicing scenarios
- !record {model: res.users, id: user_alice}:
    login: alice
    name: Alice
    partner_id: {name: Acme}
- !record {model: res.partner, id: alice}:
    name: Alice
    image: !image "img/alice.png"
"#,
    );
    let ctx = StepContext::new(tree.context("users.feature"), &db);

    steps
        .dispatch(&ctx, r#"I load the data file "users.yml""#)
        .unwrap();

    let users = db.records("res.users");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].1.get("name"), Some(&FieldValue::from("Alice")));
    assert_eq!(users[0].1.get("partner_id"), Some(&FieldValue::Ids(vec![acme])));
    let (_, alice) = db.external_id("scenario.alice").unwrap();
    assert_eq!(
        db.record("res.partner", alice).unwrap().get("image"),
        Some(&FieldValue::from("iVBORw=="))
    );
    assert!(db.autocommit());
    assert_eq!(db.connection_counts(), (1, 1));
}

#[test]
fn test_yaml_step_failure_closes_connection() {
    let (tree, db, steps) = setup();
    tree.write_data("users.yml", "- !record {model: res.users}:\n    nickname: al\n");
    let ctx = StepContext::new(tree.context("users.feature"), &db);

    let err = steps
        .dispatch(&ctx, r#"I load the data file "users.yml""#)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Object 'res.users' does not contain field 'nickname'"
    );
    assert_eq!(db.connection_counts(), (1, 1));
}

#[test]
fn test_locale_import_step() {
    let (tree, db, steps) = setup();
    tree.write_data("partners_fr.csv", "name,lang\nSociété,fr_FR\n");
    let ctx = StepContext::new(tree.context("partners.feature"), &db);

    steps
        .dispatch(
            &ctx,
            r#""res.partner" is imported from CSV "partners_fr.csv" in language "fr_FR""#,
        )
        .unwrap();

    let loads = db.bulk_loads();
    assert_eq!(loads[0].rows, vec![vec!["Société", "fr_FR"]]);
    assert_eq!(loads[0].options.lang.as_deref(), Some("fr_FR"));
}

#[test]
fn test_locale_import_step_without_records_fails() {
    let (tree, db, steps) = setup();
    tree.write_data("partners.csv", "name,code\nAcme,???\n");
    db.script_load_result(LoadResult {
        ids: vec![],
        messages: vec!["line 2: invalid code".to_string()],
    });
    let ctx = StepContext::new(tree.context("partners.feature"), &db);

    let err = steps
        .dispatch(
            &ctx,
            r#""res.partner" is imported from CSV "partners.csv" in language "en_US""#,
        )
        .unwrap_err();

    assert!(matches!(err, Error::Csv(CsvError::Import { .. })));
    assert!(err.to_string().contains("line 2: invalid code"));
    assert_eq!(db.connection_counts(), (1, 1));
}

#[test]
fn test_async_import_step() {
    let (tree, db, steps) = setup();
    tree.write_data("partners.csv", "name;email\nAcme;info@acme.test\n");
    let ctx = StepContext::new(tree.context("partners.feature"), &db).with_import_queue(&db);

    steps
        .dispatch(
            &ctx,
            r#""res.partner" is imported asynchronously from CSV "partners.csv" using delimiter ";" with a priority starting at "5""#,
        )
        .unwrap();

    let imports = db.imports();
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].request.res_model, "res.partner");
    assert_eq!(imports[0].request.file_name, "partners.csv");
    assert_eq!(imports[0].request.file_type, "csv");
    assert_eq!(
        imports[0].request.file,
        b"name;email\nAcme;info@acme.test\n".to_vec()
    );
    assert_eq!(
        imports[0].fields,
        Some(vec!["name".to_string(), "email".to_string()])
    );
    assert_eq!(imports[0].options, Some(ImportOptions::csv(';', 5)));
}

#[test]
fn test_async_import_requires_queue() {
    let (tree, db, steps) = setup();
    tree.write_data("partners.csv", "name\nAcme\n");
    let ctx = StepContext::new(tree.context("partners.feature"), &db);

    let err = steps
        .dispatch(
            &ctx,
            r#""res.partner" is imported asynchronously from CSV "partners.csv" using delimiter "," with a priority starting at "100""#,
        )
        .unwrap_err();

    assert!(matches!(err, Error::MissingImportQueue { .. }));
}

#[test]
fn test_invalid_priority() {
    let (tree, db, steps) = setup();
    tree.write_data("partners.csv", "name\nAcme\n");
    let ctx = StepContext::new(tree.context("partners.feature"), &db).with_import_queue(&db);

    let err = steps
        .dispatch(
            &ctx,
            r#""res.partner" is imported asynchronously from CSV "partners.csv" using delimiter "," with a priority starting at "soon""#,
        )
        .unwrap_err();

    assert!(matches!(err, Error::InvalidArgument { ref name, .. } if name == "priority"));
    assert!(db.imports().is_empty());
}

#[test]
fn test_missing_fixture_file() {
    let (tree, db, steps) = setup();
    let ctx = StepContext::new(tree.context("partners.feature"), &db);

    let err = steps
        .dispatch(
            &ctx,
            r#"I load the data file "missing.csv" into the model "res.partner""#,
        )
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Csv(CsvError::Fixture(FixtureError::NotFound { .. }))
    ));
    assert!(db.bulk_loads().is_empty());
}

#[test]
fn test_feature_outside_features_dir() {
    let (_tree, db, steps) = setup();
    let ctx = StepContext::new(FeatureContext::new("/srv/project/specs/a.feature"), &db);

    let err = steps
        .dispatch(&ctx, r#"I load the data file "users.yml""#)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Fixture(FixtureError::MissingAnchor { .. })
    ));
    assert_eq!(db.connection_counts(), (0, 0));
}

#[test]
fn test_unknown_step() {
    let (tree, db, steps) = setup();
    let ctx = StepContext::new(tree.context("partners.feature"), &db);

    let err = steps.dispatch(&ctx, "I dance").unwrap_err();

    assert!(matches!(err, Error::UnknownStep(ref phrase) if phrase == "I dance"));
}

#[test]
fn test_yaml_parse_error() {
    let (tree, db, steps) = setup();
    tree.write_data("broken.yml", "- [unclosed\n");
    let ctx = StepContext::new(tree.context("partners.feature"), &db);

    let err = steps
        .dispatch(&ctx, r#"I load the data file "broken.yml""#)
        .unwrap_err();

    assert!(matches!(err, Error::Yaml(YamlError::ParseError(_))));
}
