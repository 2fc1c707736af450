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

//! In-memory record store implementing every collaborator contract.

use seedbed_core::{
    Database, Domain, FieldValue, ImportJobId, ImportOptions, ImportQueue, ImportRequest,
    LoadOptions, LoadResult, ModelSchema, RecordId, Store, StoreError, StoreResult, Values,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One recorded [`Store::bulk_load`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkLoad {
    pub model: String,
    pub fields: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub options: LoadOptions,
}

/// One import submitted through [`ImportQueue`].
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedImport {
    pub job: ImportJobId,
    pub request: ImportRequest,
    pub fields: Option<Vec<String>>,
    pub options: Option<ImportOptions>,
}

#[derive(Debug, Default)]
struct State {
    schemas: BTreeMap<String, ModelSchema>,
    defaults: BTreeMap<String, Values>,
    records: BTreeMap<String, Vec<(RecordId, Values)>>,
    external_ids: HashMap<String, (String, RecordId)>,
    next_id: RecordId,
    searches: Vec<(String, Domain)>,
    bulk_loads: Vec<BulkLoad>,
    scripted_load: Option<LoadResult>,
    imports: Vec<SubmittedImport>,
    opened: usize,
    closed: usize,
    autocommit: bool,
}

impl State {
    fn insert(&mut self, model: &str, values: Values) -> RecordId {
        self.next_id += 1;
        let id = self.next_id;
        self.records
            .entry(model.to_string())
            .or_default()
            .push((id, values));
        id
    }
}

/// A shared in-memory database; clones see the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<Mutex<State>>,
}

impl MemoryDatabase {
    /// Empty database with no schemas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Database knowing every schema of [`crate::schemas::all`].
    pub fn with_standard_schemas() -> Self {
        crate::schemas::all()
            .into_iter()
            .fold(Self::new(), |db, schema| db.with_schema(schema))
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a model schema.
    pub fn with_schema(self, schema: ModelSchema) -> Self {
        self.state().schemas.insert(schema.model.clone(), schema);
        self
    }

    /// Default values applied on create for `model`.
    pub fn with_defaults(self, model: &str, values: Values) -> Self {
        self.state().defaults.insert(model.to_string(), values);
        self
    }

    /// Make the next bulk load report `result` instead of creating records.
    pub fn script_load_result(&self, result: LoadResult) {
        self.state().scripted_load = Some(result);
    }

    /// Insert a record directly.
    pub fn insert(&self, model: &str, values: Values) -> RecordId {
        self.state().insert(model, values)
    }

    /// Bind an external identifier directly.
    pub fn bind(&self, xml_id: &str, model: &str, id: RecordId) {
        self.state()
            .external_ids
            .insert(xml_id.to_string(), (model.to_string(), id));
    }

    /// All records of `model`, in creation order.
    pub fn records(&self, model: &str) -> Vec<(RecordId, Values)> {
        self.state().records.get(model).cloned().unwrap_or_default()
    }

    /// Values of one record.
    pub fn record(&self, model: &str, id: RecordId) -> Option<Values> {
        self.records(model)
            .into_iter()
            .find(|(rid, _)| *rid == id)
            .map(|(_, values)| values)
    }

    /// Record bound to an external identifier.
    pub fn external_id(&self, xml_id: &str) -> Option<(String, RecordId)> {
        self.state().external_ids.get(xml_id).cloned()
    }

    /// Every search issued, in order.
    pub fn searches(&self) -> Vec<(String, Domain)> {
        self.state().searches.clone()
    }

    /// Every bulk load issued, in order.
    pub fn bulk_loads(&self) -> Vec<BulkLoad> {
        self.state().bulk_loads.clone()
    }

    /// Every import submitted to the queue.
    pub fn imports(&self) -> Vec<SubmittedImport> {
        self.state().imports.clone()
    }

    /// Connections opened and closed so far.
    pub fn connection_counts(&self) -> (usize, usize) {
        let state = self.state();
        (state.opened, state.closed)
    }

    /// Whether the last connection switched auto-commit on.
    pub fn autocommit(&self) -> bool {
        self.state().autocommit
    }
}

impl Database for MemoryDatabase {
    fn cursor(&self) -> StoreResult<Box<dyn Store>> {
        self.state().opened += 1;
        Ok(Box::new(self.clone()))
    }
}

fn satisfies(values: &Values, domain: &Domain) -> bool {
    domain.iter().all(|cond| {
        let actual = values.get(&cond.field).unwrap_or(&FieldValue::Null);
        cond.operator == "=" && *actual == cond.value
    })
}

impl Store for MemoryDatabase {
    fn schema(&mut self, model: &str) -> StoreResult<ModelSchema> {
        self.state()
            .schemas
            .get(model)
            .cloned()
            .ok_or_else(|| StoreError::new(format!("Unknown model: {}", model)))
    }

    fn search(&mut self, model: &str, domain: &Domain) -> StoreResult<Vec<RecordId>> {
        let mut state = self.state();
        state.searches.push((model.to_string(), domain.clone()));
        Ok(state
            .records
            .get(model)
            .map(|rows| {
                rows.iter()
                    .filter(|(_, values)| satisfies(values, domain))
                    .map(|(id, _)| *id)
                    .collect()
            })
            .unwrap_or_default())
    }

    fn create(&mut self, model: &str, values: &Values) -> StoreResult<RecordId> {
        let mut state = self.state();
        if !state.schemas.contains_key(model) {
            return Err(StoreError::new(format!("Unknown model: {}", model)));
        }
        Ok(state.insert(model, values.clone()))
    }

    fn write(&mut self, model: &str, id: RecordId, values: &Values) -> StoreResult<()> {
        let mut state = self.state();
        let record = state
            .records
            .get_mut(model)
            .and_then(|rows| rows.iter_mut().find(|(rid, _)| *rid == id))
            .ok_or_else(|| StoreError::new(format!("Record {}({}) does not exist", model, id)))?;
        record.1.extend(values.clone());
        Ok(())
    }

    fn bulk_load(
        &mut self,
        model: &str,
        fields: &[String],
        rows: &[Vec<String>],
        options: &LoadOptions,
    ) -> StoreResult<LoadResult> {
        let mut state = self.state();
        state.bulk_loads.push(BulkLoad {
            model: model.to_string(),
            fields: fields.to_vec(),
            rows: rows.to_vec(),
            options: options.clone(),
        });
        if let Some(result) = state.scripted_load.take() {
            return Ok(result);
        }

        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            let values: Values = fields
                .iter()
                .zip(row)
                .filter(|(field, _)| field.as_str() != "id")
                .map(|(field, cell)| (field.clone(), FieldValue::Text(cell.clone())))
                .collect();
            let id = state.insert(model, values);
            if let Some(pos) = fields.iter().position(|f| f == "id") {
                if let Some(xml_id) = row.get(pos) {
                    state
                        .external_ids
                        .insert(xml_id.clone(), (model.to_string(), id));
                }
            }
            ids.push(id);
        }
        Ok(LoadResult {
            ids,
            messages: Vec::new(),
        })
    }

    fn lookup_external_id(&mut self, xml_id: &str) -> StoreResult<Option<RecordId>> {
        Ok(self.state().external_ids.get(xml_id).map(|(_, id)| *id))
    }

    fn bind_external_id(&mut self, xml_id: &str, model: &str, id: RecordId) -> StoreResult<()> {
        self.bind(xml_id, model, id);
        Ok(())
    }

    fn default_values(&mut self, model: &str) -> StoreResult<Values> {
        Ok(self.state().defaults.get(model).cloned().unwrap_or_default())
    }

    fn set_autocommit(&mut self, enabled: bool) -> StoreResult<()> {
        self.state().autocommit = enabled;
        Ok(())
    }

    fn close(&mut self) {
        self.state().closed += 1;
    }
}

impl ImportQueue for MemoryDatabase {
    fn create_import(&self, request: ImportRequest) -> StoreResult<ImportJobId> {
        let mut state = self.state();
        let job = state.imports.len() as ImportJobId + 1;
        state.imports.push(SubmittedImport {
            job,
            request,
            fields: None,
            options: None,
        });
        Ok(job)
    }

    fn run_import(
        &self,
        job: ImportJobId,
        fields: &[String],
        options: &ImportOptions,
    ) -> StoreResult<()> {
        let mut state = self.state();
        let import = state
            .imports
            .iter_mut()
            .find(|import| import.job == job)
            .ok_or_else(|| StoreError::new(format!("Unknown import job {}", job)))?;
        import.fields = Some(fields.to_vec());
        import.options = Some(options.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedbed_core::Condition;

    #[test]
    fn test_clones_share_state() {
        let db = MemoryDatabase::with_standard_schemas();
        let mut conn = db.cursor().unwrap();
        let id = conn
            .create("res.partner", &Values::new().with("name", "Alice".into()))
            .unwrap();
        assert_eq!(
            db.record("res.partner", id).unwrap().get("name"),
            Some(&FieldValue::Text("Alice".to_string()))
        );
    }

    #[test]
    fn test_search_by_equality() {
        let mut db = MemoryDatabase::with_standard_schemas();
        let alice = db.insert("res.partner", Values::new().with("name", "Alice".into()));
        db.insert("res.partner", Values::new().with("name", "Bob".into()));

        let found = db
            .search("res.partner", &vec![Condition::eq("name", "Alice".into())])
            .unwrap();
        assert_eq!(found, vec![alice]);
        assert_eq!(db.searches().len(), 1);
    }

    #[test]
    fn test_unknown_model_fails() {
        let mut db = MemoryDatabase::new();
        assert!(db.schema("res.partner").is_err());
        assert!(db.create("res.partner", &Values::new()).is_err());
    }
}
