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

//! Fixture steps and the phrase dispatcher used by test runners.

use crate::error::{Error, Result};
use crate::loader::load_structured_fixture;
use regex::Regex;
use seedbed_core::{
    AssetResolver, ConnectionGuard, Database, FeatureContext, ImportJobId, ImportQueue,
    LoadResult, LoaderConfig,
};
use seedbed_csv::CsvImportConfig;
use std::collections::BTreeMap;
use tracing::debug;

/// Everything a fixture step needs from the running scenario.
pub struct StepContext<'a> {
    /// Feature file being executed.
    pub feature: FeatureContext,
    pub db: &'a dyn Database,
    /// Background import service, for asynchronous imports.
    pub imports: Option<&'a dyn ImportQueue>,
    pub config: LoaderConfig,
}

impl<'a> StepContext<'a> {
    pub fn new(feature: FeatureContext, db: &'a dyn Database) -> Self {
        Self {
            feature,
            db,
            imports: None,
            config: LoaderConfig::default(),
        }
    }

    pub fn with_import_queue(mut self, imports: &'a dyn ImportQueue) -> Self {
        self.imports = Some(imports);
        self
    }

    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    fn assets(&self) -> Result<AssetResolver> {
        Ok(AssetResolver::new(&self.feature, &self.config)?)
    }

    fn csv_config(&self, delimiter: u8) -> CsvImportConfig {
        CsvImportConfig {
            delimiter,
            ..CsvImportConfig::from(&self.config)
        }
    }
}

/// Load `data/<filename>.csv` into `model`.
pub fn load_csv(ctx: &StepContext<'_>, filename: &str, model: &str) -> Result<()> {
    let assets = ctx.assets()?;
    let file = format!("{}.csv", filename);
    let mut conn = ConnectionGuard::open(ctx.db)?;
    seedbed_csv::import_file(
        &mut *conn,
        &assets,
        model,
        &file,
        &CsvImportConfig::from(&ctx.config),
    )?;
    Ok(())
}

/// Load `data/<filename>.yml` as a structured fixture.
pub fn load_yaml(ctx: &StepContext<'_>, filename: &str) -> Result<()> {
    let assets = ctx.assets()?;
    let file = format!("{}.yml", filename);
    let reader = assets.open(&file)?;
    load_structured_fixture(&assets, ctx.db, &ctx.config, reader)
}

/// Import `data/<csvfile>` into `model`, interpreting values in `lang`.
///
/// Fails when the store creates no record.
pub fn import_csv_with_locale(
    ctx: &StepContext<'_>,
    model: &str,
    csvfile: &str,
    lang: &str,
    delimiter: u8,
) -> Result<LoadResult> {
    let assets = ctx.assets()?;
    let mut conn = ConnectionGuard::open(ctx.db)?;
    Ok(seedbed_csv::import_file_with_locale(
        &mut *conn,
        &assets,
        model,
        csvfile,
        lang,
        &ctx.csv_config(delimiter),
    )?)
}

/// Queue `data/<csvfile>` for asynchronous import into `model`.
pub fn import_csv_async(
    ctx: &StepContext<'_>,
    model: &str,
    csvfile: &str,
    delimiter: u8,
    priority: u32,
) -> Result<ImportJobId> {
    let queue = ctx.imports.ok_or_else(|| Error::MissingImportQueue {
        step: "import_csv_async".to_string(),
    })?;
    let assets = ctx.assets()?;
    Ok(seedbed_csv::import_async(
        queue, &assets, model, csvfile, delimiter, priority,
    )?)
}

/// Named values captured from a step phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepArgs {
    values: BTreeMap<String, String>,
}

impl StepArgs {
    /// The captured value of `{name}`.
    pub fn get(&self, name: &str) -> Result<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::InvalidArgument {
                name: name.to_string(),
                value: String::new(),
                reason: "not captured by the step phrase".to_string(),
            })
    }

    /// `{name}` as a single-byte delimiter.
    pub fn delimiter(&self, name: &str) -> Result<u8> {
        let value = self.get(name)?;
        match value.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(Error::InvalidArgument {
                name: name.to_string(),
                value: value.to_string(),
                reason: "expected a single-byte delimiter".to_string(),
            }),
        }
    }

    /// `{name}` as a priority.
    pub fn priority(&self, name: &str) -> Result<u32> {
        let value = self.get(name)?;
        value.trim().parse().map_err(|err: std::num::ParseIntError| {
            Error::InvalidArgument {
                name: name.to_string(),
                value: value.to_string(),
                reason: err.to_string(),
            }
        })
    }
}

/// Runs a matched step.
pub type StepHandler = fn(&StepContext<'_>, &StepArgs) -> Result<()>;

struct StepDefinition {
    template: String,
    pattern: Regex,
    names: Vec<String>,
    handler: StepHandler,
}

/// Converts `{name}` placeholders into named captures; the rest is literal.
fn compile_template(template: &str) -> Result<(Regex, Vec<String>)> {
    let mut pattern = String::from("^");
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = &rest[start + 1..start + len];
        pattern.push_str(&regex::escape(&rest[..start]));
        pattern.push_str(&format!(r#"(?P<{}>[^"]*?)"#, name));
        names.push(name.to_string());
        rest = &rest[start + len + 1..];
    }
    pattern.push_str(&regex::escape(rest));
    pattern.push('$');
    Ok((Regex::new(&pattern)?, names))
}

/// Step phrase to handler table.
///
/// # Examples
///
/// ```
/// use seedbed::StepRegistry;
///
/// let steps = StepRegistry::standard().unwrap();
/// assert!(steps.matches(r#"I load the data file "partners.yml""#));
/// assert!(!steps.matches("I dance"));
/// ```
#[derive(Default)]
pub struct StepRegistry {
    steps: Vec<StepDefinition>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the four fixture steps:
    ///
    /// - `I load the data file "{filename}.csv" into the model "{model_name}"`
    /// - `I load the data file "{filename}.yml"`
    /// - `"{model_name}" is imported from CSV "{csvfile}" in language "{lang}"`
    /// - `"{model_name}" is imported asynchronously from CSV "{csvfile}" using
    ///   delimiter "{sep}" with a priority starting at "{priority}"`
    pub fn standard() -> Result<Self> {
        let mut steps = Self::new();
        steps.register(
            r#"I load the data file "{filename}.csv" into the model "{model_name}""#,
            |ctx, args| load_csv(ctx, args.get("filename")?, args.get("model_name")?),
        )?;
        steps.register(r#"I load the data file "{filename}.yml""#, |ctx, args| {
            load_yaml(ctx, args.get("filename")?)
        })?;
        steps.register(
            r#""{model_name}" is imported from CSV "{csvfile}" in language "{lang}""#,
            |ctx, args| {
                import_csv_with_locale(
                    ctx,
                    args.get("model_name")?,
                    args.get("csvfile")?,
                    args.get("lang")?,
                    b',',
                )
                .map(drop)
            },
        )?;
        steps.register(
            r#""{model_name}" is imported asynchronously from CSV "{csvfile}" using delimiter "{sep}" with a priority starting at "{priority}""#,
            |ctx, args| {
                import_csv_async(
                    ctx,
                    args.get("model_name")?,
                    args.get("csvfile")?,
                    args.delimiter("sep")?,
                    args.priority("priority")?,
                )
                .map(drop)
            },
        )?;
        Ok(steps)
    }

    /// Register `handler` for phrases matching `template`.
    pub fn register(&mut self, template: &str, handler: StepHandler) -> Result<()> {
        let (pattern, names) = compile_template(template)?;
        self.steps.push(StepDefinition {
            template: template.to_string(),
            pattern,
            names,
            handler,
        });
        Ok(())
    }

    /// Returns true if some step accepts `phrase`.
    pub fn matches(&self, phrase: &str) -> bool {
        self.steps.iter().any(|step| step.pattern.is_match(phrase))
    }

    /// Run the first step accepting `phrase`.
    pub fn dispatch(&self, ctx: &StepContext<'_>, phrase: &str) -> Result<()> {
        for step in &self.steps {
            let Some(captures) = step.pattern.captures(phrase) else {
                continue;
            };
            let values = step
                .names
                .iter()
                .filter_map(|name| {
                    captures
                        .name(name)
                        .map(|value| (name.clone(), value.as_str().to_string()))
                })
                .collect();
            debug!(step = %step.template, "Running fixture step");
            return (step.handler)(ctx, &StepArgs { values });
        }
        Err(Error::UnknownStep(phrase.to_string()))
    }
}
