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

//! Load CSV fixtures into the store through its bulk loader.

use crate::error::{CsvError, Result};
use crate::mapping::{rewrite_identifiers, ColumnMapping};
use seedbed_core::{AssetResolver, LoadOptions, LoadResult, LoaderConfig, Store};
use std::io::Read;
use tracing::{debug, warn};

/// Configuration for tabular imports.
///
/// # Examples
///
/// ```
/// use seedbed_csv::CsvImportConfig;
///
/// let config = CsvImportConfig::default();
/// assert_eq!(config.delimiter, b',');
/// assert_eq!(config.namespace, "scenario");
///
/// let config = CsvImportConfig {
///     delimiter: b';',
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CsvImportConfig {
    /// Field delimiter (default: `,`).
    pub delimiter: u8,
    /// Namespace bare identifiers are moved into (default: `scenario`).
    pub namespace: String,
}

impl Default for CsvImportConfig {
    fn default() -> Self {
        Self::from(&LoaderConfig::default())
    }
}

impl From<&LoaderConfig> for CsvImportConfig {
    fn from(config: &LoaderConfig) -> Self {
        Self {
            delimiter: config.delimiter,
            namespace: config.namespace.clone(),
        }
    }
}

/// How cell bytes become text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decoding {
    /// Invalid sequences are replaced.
    Lossy,
    /// Invalid sequences are an error.
    Utf8,
}

/// A parsed tabular fixture, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Field names, in submission order.
    pub fields: Vec<String>,
    /// Projected and rewritten rows.
    pub rows: Vec<Vec<String>>,
}

fn decode_record(record: &csv::ByteRecord, row: usize, decoding: Decoding) -> Result<Vec<String>> {
    record
        .iter()
        .enumerate()
        .map(|(column, cell)| match decoding {
            Decoding::Lossy => Ok(String::from_utf8_lossy(cell).into_owned()),
            Decoding::Utf8 => std::str::from_utf8(cell)
                .map(str::to_string)
                .map_err(|_| CsvError::InvalidUtf8 { row, column }),
        })
        .collect()
}

fn parse_table<R: Read>(
    reader: R,
    file: &str,
    config: &CsvImportConfig,
    decoding: Decoding,
) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = reader.byte_records();

    let header = match records.next() {
        Some(record) => decode_record(&record?, 1, decoding)?,
        None => {
            return Err(CsvError::EmptyFile {
                file: file.to_string(),
            })
        }
    };
    let mapping = ColumnMapping::from_header(&header);
    debug!(
        file,
        fields = ?mapping.field_names(),
        skipped = mapping.skipped().len(),
        "Mapped CSV header"
    );

    let mut rows = Vec::new();
    for (offset, record) in records.enumerate() {
        let cells = decode_record(&record?, offset + 2, decoding)?;
        rows.push(mapping.project(&cells));
    }
    rewrite_identifiers(&mut rows, &mapping.identifier_positions(), &config.namespace);

    Ok(Table {
        fields: mapping.field_names(),
        rows,
    })
}

/// Parse CSV text into a [`Table`], applying column mapping and identifier rewriting.
///
/// # Examples
///
/// ```
/// use seedbed_csv::{read_table, CsvImportConfig};
///
/// let csv = "name,,partner_id/id\nAlice,x,42\n";
/// let table = read_table(csv.as_bytes(), &CsvImportConfig::default()).unwrap();
/// assert_eq!(table.fields, vec!["name", "partner_id/id"]);
/// assert_eq!(table.rows, vec![vec!["Alice", "scenario.42"]]);
/// ```
pub fn read_table<R: Read>(reader: R, config: &CsvImportConfig) -> Result<Table> {
    parse_table(reader, "<reader>", config, Decoding::Lossy)
}

/// Load the CSV fixture `file` into `model`.
///
/// Reports from the store are logged; only store failures abort the load.
pub fn import_file(
    store: &mut dyn Store,
    assets: &AssetResolver,
    model: &str,
    file: &str,
    config: &CsvImportConfig,
) -> Result<()> {
    let table = parse_table(assets.open(file)?, file, config, Decoding::Lossy)?;
    debug!(model, file, rows = table.rows.len(), "Submitting CSV fixture");

    let result = store.bulk_load(model, &table.fields, &table.rows, &LoadOptions::default())?;
    for message in &result.messages {
        warn!(model, file, "{}", message);
    }
    Ok(())
}

/// Load the CSV fixture `file` into `model`, decoding cells as UTF-8 and
/// passing `lang` to the store.
///
/// Fails with [`CsvError::Import`] when the store created no record.
pub fn import_file_with_locale(
    store: &mut dyn Store,
    assets: &AssetResolver,
    model: &str,
    file: &str,
    lang: &str,
    config: &CsvImportConfig,
) -> Result<LoadResult> {
    let table = parse_table(assets.open(file)?, file, config, Decoding::Utf8)?;
    debug!(model, file, lang, rows = table.rows.len(), "Submitting localized CSV fixture");

    let result = store.bulk_load(
        model,
        &table.fields,
        &table.rows,
        &LoadOptions::with_lang(lang),
    )?;
    if result.ids.is_empty() {
        return Err(CsvError::Import {
            file: file.to_string(),
            model: model.to_string(),
            messages: result.messages,
        });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let err = read_table("".as_bytes(), &CsvImportConfig::default()).unwrap_err();
        assert!(matches!(err, CsvError::EmptyFile { .. }));
    }

    #[test]
    fn test_custom_delimiter() {
        let config = CsvImportConfig {
            delimiter: b';',
            ..Default::default()
        };
        let table = read_table("id;name\np1;Alice\n".as_bytes(), &config).unwrap();
        assert_eq!(table.fields, vec!["id", "name"]);
        assert_eq!(table.rows, vec![vec!["scenario.p1", "Alice"]]);
    }

    #[test]
    fn test_quoted_cells() {
        let csv = "name,street\n\"Smith, John\",\"1 \"\"Main\"\" St\"\n";
        let table = read_table(csv.as_bytes(), &CsvImportConfig::default()).unwrap();
        assert_eq!(table.rows, vec![vec!["Smith, John", "1 \"Main\" St"]]);
    }

    #[test]
    fn test_strict_decoding_rejects_invalid_utf8() {
        let bytes: &[u8] = b"name\n\xff\xfe\n";
        let err = parse_table(bytes, "bad.csv", &CsvImportConfig::default(), Decoding::Utf8)
            .unwrap_err();
        assert!(matches!(err, CsvError::InvalidUtf8 { row: 2, column: 0 }));
    }

    #[test]
    fn test_lossy_decoding_replaces() {
        let bytes: &[u8] = b"name\nA\xffB\n";
        let table = read_table(bytes, &CsvImportConfig::default()).unwrap();
        assert_eq!(table.rows[0][0], "A\u{FFFD}B");
    }
}
