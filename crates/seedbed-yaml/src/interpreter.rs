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

//! Structured fixture interpreter.
//!
//! The interpreter walks a parsed fixture, evaluates each field assignment
//! against the model schema and applies the resulting values to a [`Store`].
//! External identifiers defined by a fixture are recorded in the caller's
//! [`IdRef`] so later nodes of the same run can refer to them.

use crate::error::{Result, YamlError};
use crate::expr::Expression;
use crate::resolve;
use crate::tags::TagRegistry;
use crate::tree::{parse_fixture, FixtureNode, FixtureRecordNode, NodeKind};
use seedbed_core::xmlid::namespace_identifier;
use seedbed_core::{
    AssetResolver, FieldValue, FixtureError, IdRef, LoaderConfig, Mode, RecordId, Store, Values,
};
use tracing::{debug, info};

/// Interpreter configuration.
#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    /// Namespace, mode and size limits.
    pub loader: LoaderConfig,
    /// Scalar tags recognised in field values.
    pub tags: TagRegistry,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self::from(LoaderConfig::default())
    }
}

impl From<LoaderConfig> for InterpreterConfig {
    fn from(loader: LoaderConfig) -> Self {
        Self {
            loader,
            tags: TagRegistry::with_builtins(),
        }
    }
}

/// The field of an enclosing record a nested record is assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentContext {
    pub model: String,
    pub field: String,
}

/// Context of one field evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalContext<'p> {
    /// Set while evaluating the values of a nested record.
    pub parent: Option<&'p ParentContext>,
    /// Seed new records with the store's default values.
    pub use_default: bool,
}

impl EvalContext<'_> {
    /// Context for a record about to be created.
    pub fn create() -> Self {
        Self {
            parent: None,
            use_default: true,
        }
    }

    /// Context for an existing record being updated.
    pub fn update() -> Self {
        Self {
            parent: None,
            use_default: false,
        }
    }
}

/// Applies structured fixtures to a store.
pub struct Interpreter<'a> {
    store: &'a mut dyn Store,
    assets: &'a AssetResolver,
    idref: &'a mut IdRef,
    config: InterpreterConfig,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        store: &'a mut dyn Store,
        assets: &'a AssetResolver,
        idref: &'a mut IdRef,
        config: InterpreterConfig,
    ) -> Self {
        Self {
            store,
            assets,
            idref,
            config,
        }
    }

    /// Register additional scalar tags before processing.
    pub fn tags_mut(&mut self) -> &mut TagRegistry {
        &mut self.config.tags
    }

    /// Namespace, mode and tags this interpreter runs with.
    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Interpret a whole fixture document.
    pub fn process(&mut self, text: &str) -> Result<()> {
        let max_size = self.config.loader.max_document_size;
        if text.len() > max_size {
            return Err(YamlError::DocumentTooLarge {
                size: text.len(),
                max_size,
            });
        }

        let nodes = parse_fixture(text, &self.config.tags)?;
        debug!(nodes = nodes.len(), "Parsed structured fixture");
        for node in &nodes {
            match node {
                FixtureNode::Comment(comment) => info!("{}", comment),
                FixtureNode::Record(record) => {
                    self.dispatch(record)?;
                }
            }
        }
        Ok(())
    }

    /// Apply one record node and return the record it created, updated or found.
    pub fn dispatch(&mut self, node: &FixtureRecordNode) -> Result<Option<RecordId>> {
        let xml_id = node
            .id
            .as_deref()
            .map(|id| namespace_identifier(&self.config.loader.namespace, id));

        match node.kind {
            NodeKind::Search => self.search_node(node, xml_id),
            NodeKind::Record => self.record_node(node, xml_id).map(Some),
        }
    }

    fn search_node(
        &mut self,
        node: &FixtureRecordNode,
        xml_id: Option<String>,
    ) -> Result<Option<RecordId>> {
        let domain = resolve::criteria_domain(self, &node.model, &node.fields, &EvalContext::default())?;
        let ids = self.store.search(&node.model, &domain)?;
        debug!(model = %node.model, matches = ids.len(), "Searched fixture record");

        let Some(xml_id) = xml_id else {
            return Ok(ids.first().copied());
        };
        let id = ids
            .first()
            .copied()
            .ok_or_else(|| FixtureError::UnresolvedReference {
                xml_id: xml_id.clone(),
            })?;
        self.idref.insert(xml_id, id);
        Ok(Some(id))
    }

    fn record_node(&mut self, node: &FixtureRecordNode, xml_id: Option<String>) -> Result<RecordId> {
        let existing = match (&xml_id, self.config.loader.mode) {
            (Some(xml_id), Mode::Update) => self.existing_record(xml_id)?,
            _ => None,
        };

        if let Some(id) = existing {
            let values = self.build_values(&node.model, &node.fields, &EvalContext::update())?;
            self.store.write(&node.model, id, &values)?;
            debug!(model = %node.model, id, fields = values.len(), "Updated fixture record");
            if let Some(xml_id) = xml_id {
                self.idref.insert(xml_id, id);
            }
            return Ok(id);
        }

        let values = self.build_values(&node.model, &node.fields, &EvalContext::create())?;
        let id = self.store.create(&node.model, &values)?;
        debug!(model = %node.model, id, fields = values.len(), "Created fixture record");
        if let Some(xml_id) = xml_id {
            self.store.bind_external_id(&xml_id, &node.model, id)?;
            self.idref.insert(xml_id, id);
        }
        Ok(id)
    }

    fn existing_record(&mut self, xml_id: &str) -> Result<Option<RecordId>> {
        if let Some(id) = self.idref.get(xml_id) {
            return Ok(Some(id));
        }
        Ok(self.store.lookup_external_id(xml_id)?)
    }

    /// Resolve an external identifier written in a fixture to a record id.
    pub fn resolve_xml_id(&mut self, name: &str) -> Result<RecordId> {
        let xml_id = namespace_identifier(&self.config.loader.namespace, name);
        match self.existing_record(&xml_id)? {
            Some(id) => Ok(id),
            None => Err(FixtureError::UnresolvedReference { xml_id }.into()),
        }
    }

    /// Evaluate every assignment of a record against `model`.
    pub fn build_values(
        &mut self,
        model: &str,
        fields: &[(String, Expression)],
        ctx: &EvalContext<'_>,
    ) -> Result<Values> {
        let mut values = if ctx.use_default {
            self.store.default_values(model)?
        } else {
            Values::new()
        };
        for (name, expression) in fields {
            let value = self.evaluate_field(model, name, expression, ctx)?;
            values.set(name.clone(), value);
        }
        Ok(values)
    }

    /// Evaluate one field assignment.
    ///
    /// The field is looked up among the model's own fields, then among the
    /// fields it inherits. The value comes from the first resolution strategy
    /// that accepts the field and expression.
    pub fn evaluate_field(
        &mut self,
        model: &str,
        field_name: &str,
        expression: &Expression,
        ctx: &EvalContext<'_>,
    ) -> Result<FieldValue> {
        let schema = self.store.schema(model)?;
        let field = schema
            .lookup(field_name)
            .field()
            .ok_or_else(|| FixtureError::Schema {
                model: model.to_string(),
                field: field_name.to_string(),
            })?;
        let strategy = resolve::select(field, expression);
        debug!(model, field = field_name, strategy = strategy.name, "Evaluating field");
        (strategy.resolve)(self, model, field, expression, ctx)
    }

    pub(crate) fn store_mut(&mut self) -> &mut dyn Store {
        &mut *self.store
    }

    pub(crate) fn assets(&self) -> &AssetResolver {
        self.assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedbed_test::{schemas, FeatureTree, MemoryDatabase};

    fn fixture() -> (FeatureTree, AssetResolver) {
        let tree = FeatureTree::new();
        let assets = AssetResolver::new(&tree.context("load.feature"), &LoaderConfig::default())
            .expect("assets");
        (tree, assets)
    }

    #[test]
    fn test_scalar_fields() {
        let (_tree, assets) = fixture();
        let mut db = MemoryDatabase::with_standard_schemas();
        let mut idref = IdRef::new();
        let mut interp =
            Interpreter::new(&mut db, &assets, &mut idref, InterpreterConfig::default());

        let values = interp
            .build_values(
                "res.partner",
                &[
                    ("name".to_string(), Expression::Str("Acme".to_string())),
                    ("active".to_string(), Expression::Bool(true)),
                    ("credit_limit".to_string(), Expression::Float(12.5)),
                ],
                &EvalContext::update(),
            )
            .expect("values");
        assert_eq!(values.get("name"), Some(&FieldValue::Text("Acme".to_string())));
        assert_eq!(values.get("active"), Some(&FieldValue::Bool(true)));
        assert_eq!(values.get("credit_limit"), Some(&FieldValue::Float(12.5)));
    }

    #[test]
    fn test_unknown_field() {
        let (_tree, assets) = fixture();
        let mut db = MemoryDatabase::with_standard_schemas();
        let mut idref = IdRef::new();
        let mut interp =
            Interpreter::new(&mut db, &assets, &mut idref, InterpreterConfig::default());

        let err = interp
            .evaluate_field(
                "res.users",
                "nickname",
                &Expression::Str("al".to_string()),
                &EvalContext::default(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            YamlError::Fixture(FixtureError::Schema { ref model, ref field })
                if model == "res.users" && field == "nickname"
        ));
    }

    #[test]
    fn test_mapping_on_scalar_field_is_rejected() {
        let (_tree, assets) = fixture();
        let mut db = MemoryDatabase::with_standard_schemas();
        let mut idref = IdRef::new();
        let mut interp =
            Interpreter::new(&mut db, &assets, &mut idref, InterpreterConfig::default());

        let err = interp
            .evaluate_field(
                "res.partner",
                "name",
                &Expression::Mapping(vec![("x".to_string(), Expression::Int(1))]),
                &EvalContext::default(),
            )
            .unwrap_err();
        assert!(matches!(err, YamlError::InvalidExpression { .. }));
    }

    #[test]
    fn test_unresolved_reference() {
        let (_tree, assets) = fixture();
        let mut db = MemoryDatabase::with_standard_schemas();
        let mut idref = IdRef::new();
        let mut interp =
            Interpreter::new(&mut db, &assets, &mut idref, InterpreterConfig::default());

        let err = interp.resolve_xml_id("missing").unwrap_err();
        assert!(matches!(
            err,
            YamlError::Fixture(FixtureError::UnresolvedReference { ref xml_id })
                if xml_id == "scenario.missing"
        ));
    }

    #[test]
    fn test_default_config() {
        let (_tree, assets) = fixture();
        let mut db = MemoryDatabase::with_standard_schemas();
        let mut idref = IdRef::new();
        let interp =
            Interpreter::new(&mut db, &assets, &mut idref, InterpreterConfig::default());

        assert_eq!(interp.config().loader.namespace, "scenario");
        assert_eq!(interp.config().loader.mode, Mode::Update);
        assert!(interp.config().tags.contains("image"));
    }

    #[test]
    fn test_document_size_limit() {
        let (_tree, assets) = fixture();
        let mut db = MemoryDatabase::new().with_schema(schemas::partner());
        let mut idref = IdRef::new();
        let config = InterpreterConfig::from(LoaderConfig::builder().max_document_size(8).build());
        let mut interp = Interpreter::new(&mut db, &assets, &mut idref, config);

        let err = interp.process("- a comment that is too long").unwrap_err();
        assert!(matches!(err, YamlError::DocumentTooLarge { max_size: 8, .. }));
    }
}
