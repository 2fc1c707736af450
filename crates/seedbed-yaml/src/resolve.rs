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

//! Field value resolution.
//!
//! Resolution runs an ordered chain of strategies; the first whose predicate
//! accepts the field and expression produces the value:
//!
//! 1. **search-criteria-reference**: a mapping on a reference-to-one field
//!    is searched for on the referenced model. It must come first, otherwise
//!    the mapping would be read as nested field values.
//! 2. **tagged-asset**: an `!image` reference is read from the data directory
//!    and base64-encoded.
//! 3. **pass-through**: literals, external identifiers and nested records.

use crate::error::{Result, YamlError};
use crate::expr::Expression;
use crate::interpreter::{EvalContext, Interpreter, ParentContext};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use seedbed_core::{Condition, Domain, FieldType, FieldValue, RecordId, Relation, SchemaField};

type Predicate = fn(&SchemaField, &Expression) -> bool;
type Handler =
    fn(&mut Interpreter<'_>, &str, &SchemaField, &Expression, &EvalContext<'_>) -> Result<FieldValue>;

/// One predicate/handler pair of the chain.
pub(crate) struct Strategy {
    pub(crate) name: &'static str,
    pub(crate) applies: Predicate,
    pub(crate) resolve: Handler,
}

pub(crate) static STRATEGIES: [Strategy; 3] = [
    Strategy {
        name: "search-criteria-reference",
        applies: is_criteria_reference,
        resolve: resolve_criteria_reference,
    },
    Strategy {
        name: "tagged-asset",
        applies: is_asset,
        resolve: resolve_asset,
    },
    Strategy {
        name: "pass-through",
        applies: always,
        resolve: resolve_literal,
    },
];

/// The first strategy accepting `field` and `expression`.
pub(crate) fn select(field: &SchemaField, expression: &Expression) -> &'static Strategy {
    STRATEGIES
        .iter()
        .find(|strategy| (strategy.applies)(field, expression))
        .unwrap_or(&STRATEGIES[STRATEGIES.len() - 1])
}

fn is_criteria_reference(field: &SchemaField, expression: &Expression) -> bool {
    field.field_type.is_many2one() && expression.is_mapping()
}

fn is_asset(_field: &SchemaField, expression: &Expression) -> bool {
    matches!(expression, Expression::Asset(_))
}

fn always(_field: &SchemaField, _expression: &Expression) -> bool {
    true
}

pub(crate) fn invalid(
    model: &str,
    field: &str,
    reason: impl Into<String>,
    ctx: &EvalContext<'_>,
) -> YamlError {
    let mut reason = reason.into();
    if let Some(parent) = ctx.parent {
        reason = format!("{} (nested in {}.{})", reason, parent.model, parent.field);
    }
    YamlError::InvalidExpression {
        model: model.to_string(),
        field: field.to_string(),
        reason,
    }
}

/// Equality conjunction over `criteria`, for a search on `model`.
pub(crate) fn criteria_domain(
    interp: &mut Interpreter<'_>,
    model: &str,
    criteria: &[(String, Expression)],
    ctx: &EvalContext<'_>,
) -> Result<Domain> {
    let mut domain = Domain::with_capacity(criteria.len());
    for (key, expression) in criteria {
        let value = match expression {
            Expression::Null => FieldValue::Null,
            Expression::Bool(b) => FieldValue::Bool(*b),
            Expression::Int(n) => FieldValue::Int(*n),
            Expression::Float(n) => FieldValue::Float(*n),
            Expression::Str(s) => FieldValue::Text(s.clone()),
            Expression::Ref(name) => FieldValue::Id(interp.resolve_xml_id(name)?),
            other => {
                return Err(invalid(
                    model,
                    key,
                    format!("a {} cannot be used as search criteria", other.kind()),
                    ctx,
                ))
            }
        };
        domain.push(Condition::eq(key.clone(), value));
    }
    Ok(domain)
}

fn resolve_criteria_reference(
    interp: &mut Interpreter<'_>,
    model: &str,
    field: &SchemaField,
    expression: &Expression,
    ctx: &EvalContext<'_>,
) -> Result<FieldValue> {
    let (relation, criteria) = match (field.field_type.relation(), expression) {
        (Some(relation), Expression::Mapping(criteria)) => (relation, criteria),
        _ => return Err(invalid(model, &field.name, "expected search criteria", ctx)),
    };
    let domain = criteria_domain(interp, relation, criteria, ctx)?;
    let ids = interp.store_mut().search(relation, &domain)?;
    tracing::debug!(
        model,
        field = %field.name,
        relation,
        matches = ids.len(),
        "Resolved reference by search"
    );
    Ok(FieldValue::Ids(ids))
}

fn resolve_asset(
    interp: &mut Interpreter<'_>,
    model: &str,
    field: &SchemaField,
    expression: &Expression,
    ctx: &EvalContext<'_>,
) -> Result<FieldValue> {
    let asset = match expression {
        Expression::Asset(asset) => asset,
        _ => return Err(invalid(model, &field.name, "expected an asset", ctx)),
    };
    let content = interp.assets().read(&asset.path)?;
    Ok(FieldValue::Text(STANDARD.encode(content)))
}

fn reference_id(
    interp: &mut Interpreter<'_>,
    model: &str,
    field: &SchemaField,
    expression: &Expression,
    ctx: &EvalContext<'_>,
) -> Result<RecordId> {
    match expression {
        Expression::Int(id) => Ok(*id),
        Expression::Str(name) | Expression::Ref(name) => interp.resolve_xml_id(name),
        other => Err(invalid(
            model,
            &field.name,
            format!("a {} is not a record reference", other.kind()),
            ctx,
        )),
    }
}

/// Resolve a to-many assignment element by element: mappings become new
/// related records, anything else links an existing one.
fn to_many(
    interp: &mut Interpreter<'_>,
    model: &str,
    field: &SchemaField,
    relation: &str,
    items: &[Expression],
    ctx: &EvalContext<'_>,
) -> Result<FieldValue> {
    let parent = ParentContext {
        model: model.to_string(),
        field: field.name.clone(),
    };
    let nested = EvalContext {
        parent: Some(&parent),
        use_default: true,
    };
    let mut relations = Vec::with_capacity(items.len());
    for item in items {
        relations.push(match item {
            Expression::Mapping(fields) => {
                Relation::Create(interp.build_values(relation, fields, &nested)?)
            }
            other => Relation::Link(reference_id(interp, model, field, other, ctx)?),
        });
    }
    Ok(collapse(relations))
}

/// Lists of a single kind keep their plain form.
fn collapse(relations: Vec<Relation>) -> FieldValue {
    if relations.iter().all(|r| matches!(r, Relation::Link(_))) {
        return FieldValue::Ids(
            relations
                .into_iter()
                .filter_map(|r| match r {
                    Relation::Link(id) => Some(id),
                    Relation::Create(_) => None,
                })
                .collect(),
        );
    }
    if relations.iter().all(|r| matches!(r, Relation::Create(_))) {
        return FieldValue::Records(
            relations
                .into_iter()
                .filter_map(|r| match r {
                    Relation::Create(values) => Some(values),
                    Relation::Link(_) => None,
                })
                .collect(),
        );
    }
    FieldValue::Relations(relations)
}

fn resolve_literal(
    interp: &mut Interpreter<'_>,
    model: &str,
    field: &SchemaField,
    expression: &Expression,
    ctx: &EvalContext<'_>,
) -> Result<FieldValue> {
    match &field.field_type {
        FieldType::ManyToOne(_) => match expression {
            Expression::Null | Expression::Bool(false) => Ok(FieldValue::Null),
            other => reference_id(interp, model, field, other, ctx).map(FieldValue::Id),
        },
        FieldType::OneToMany(relation) | FieldType::ManyToMany(relation) => match expression {
            Expression::Null | Expression::Bool(false) => Ok(FieldValue::Ids(Vec::new())),
            Expression::Sequence(items) => to_many(interp, model, field, relation, items, ctx),
            other => to_many(interp, model, field, relation, std::slice::from_ref(other), ctx),
        },
        _ => match expression {
            Expression::Null => Ok(FieldValue::Null),
            Expression::Bool(b) => Ok(FieldValue::Bool(*b)),
            Expression::Int(n) => Ok(FieldValue::Int(*n)),
            Expression::Float(n) => Ok(FieldValue::Float(*n)),
            Expression::Str(s) => Ok(FieldValue::Text(s.clone())),
            Expression::Ref(name) => interp.resolve_xml_id(name).map(FieldValue::Id),
            other => Err(invalid(
                model,
                &field.name,
                format!("a {} is only accepted on relational fields", other.kind()),
                ctx,
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::AssetReference;
    use seedbed_core::Values;

    fn mapping() -> Expression {
        Expression::Mapping(vec![("name".to_string(), Expression::Str("Alice".to_string()))])
    }

    #[test]
    fn test_reference_mapping_selects_search() {
        let field = SchemaField::new("parent_id", FieldType::ManyToOne("res.partner".to_string()));
        assert_eq!(select(&field, &mapping()).name, "search-criteria-reference");
    }

    #[test]
    fn test_mapping_on_to_many_passes_through() {
        let field = SchemaField::new("child_ids", FieldType::OneToMany("res.partner".to_string()));
        assert_eq!(select(&field, &mapping()).name, "pass-through");
    }

    #[test]
    fn test_asset_selects_asset_strategy() {
        let field = SchemaField::new("image", FieldType::Binary);
        let asset = Expression::Asset(AssetReference::new("img/logo.png"));
        assert_eq!(select(&field, &asset).name, "tagged-asset");
    }

    #[test]
    fn test_collapse_keeps_plain_forms() {
        assert_eq!(collapse(Vec::new()), FieldValue::Ids(Vec::new()));
        assert_eq!(
            collapse(vec![Relation::Link(1), Relation::Link(2)]),
            FieldValue::Ids(vec![1, 2])
        );
        assert_eq!(
            collapse(vec![Relation::Create(Values::new())]),
            FieldValue::Records(vec![Values::new()])
        );
        assert_eq!(
            collapse(vec![Relation::Create(Values::new()), Relation::Link(2)]),
            FieldValue::Relations(vec![Relation::Create(Values::new()), Relation::Link(2)])
        );
    }

    #[test]
    fn test_literal_reference_passes_through() {
        let field = SchemaField::new("parent_id", FieldType::ManyToOne("res.partner".to_string()));
        assert_eq!(select(&field, &Expression::Int(3)).name, "pass-through");
        assert_eq!(
            select(&field, &Expression::Str("acme".to_string())).name,
            "pass-through"
        );
    }
}
