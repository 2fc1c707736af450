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

//! Model schemas used across loader tests.
//!
//! `res.users` inherits `name`, `email` and `company_id` from `res.partner`,
//! which exercises the inherited-field lookup.

use seedbed_core::ModelSchema;
use serde_json::json;

fn from_json(value: serde_json::Value) -> ModelSchema {
    serde_json::from_value(value).expect("valid schema fixture")
}

/// `res.partner`.
pub fn partner() -> ModelSchema {
    from_json(json!({
        "model": "res.partner",
        "fields": {
            "name": {"name": "name", "type": "char"},
            "email": {"name": "email", "type": "char"},
            "ref": {"name": "ref", "type": "char"},
            "active": {"name": "active", "type": "boolean"},
            "lang": {"name": "lang", "type": "selection"},
            "credit_limit": {"name": "credit_limit", "type": "float"},
            "image": {"name": "image", "type": "binary"},
            "parent_id": {"name": "parent_id", "type": {"many_to_one": "res.partner"}},
            "company_id": {"name": "company_id", "type": {"many_to_one": "res.company"}},
            "child_ids": {"name": "child_ids", "type": {"one_to_many": "res.partner"}},
            "category_id": {"name": "category_id", "type": {"many_to_many": "res.partner.category"}}
        }
    }))
}

/// `res.users`, delegating partner fields.
pub fn users() -> ModelSchema {
    from_json(json!({
        "model": "res.users",
        "fields": {
            "login": {"name": "login", "type": "char"},
            "partner_id": {"name": "partner_id", "type": {"many_to_one": "res.partner"}}
        },
        "inherited_fields": {
            "name": {"name": "name", "type": "char"},
            "email": {"name": "email", "type": "char"},
            "company_id": {"name": "company_id", "type": {"many_to_one": "res.company"}}
        }
    }))
}

/// `res.company`.
pub fn company() -> ModelSchema {
    from_json(json!({
        "model": "res.company",
        "fields": {
            "name": {"name": "name", "type": "char"},
            "logo": {"name": "logo", "type": "binary"}
        }
    }))
}

/// `res.partner.category`.
pub fn category() -> ModelSchema {
    from_json(json!({
        "model": "res.partner.category",
        "fields": {
            "name": {"name": "name", "type": "char"}
        }
    }))
}

/// Every schema above.
pub fn all() -> Vec<ModelSchema> {
    vec![partner(), users(), company(), category()]
}
