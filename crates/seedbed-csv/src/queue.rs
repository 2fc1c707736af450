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

//! Hand CSV fixtures to the background import job service.

use crate::error::{CsvError, Result};
use seedbed_core::{AssetResolver, ImportJobId, ImportOptions, ImportQueue, ImportRequest};
use tracing::info;

/// Default starting priority of queued import jobs.
pub const DEFAULT_PRIORITY: u32 = 100;

fn header_fields(content: &[u8], file: &str, delimiter: u8) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content);
    match reader.byte_records().next() {
        Some(record) => Ok(record?
            .iter()
            .map(|cell| String::from_utf8_lossy(cell).into_owned())
            .collect()),
        None => Err(CsvError::EmptyFile {
            file: file.to_string(),
        }),
    }
}

/// Submit `file` for asynchronous import into `model`.
///
/// The job is created and triggered, then left to the import service: this
/// call neither waits for it nor checks its outcome.
pub fn import_async(
    queue: &dyn ImportQueue,
    assets: &AssetResolver,
    model: &str,
    file: &str,
    delimiter: u8,
    priority: u32,
) -> Result<ImportJobId> {
    let content = assets.read(file)?;
    let fields = header_fields(&content, file, delimiter)?;

    let job = queue.create_import(ImportRequest {
        res_model: model.to_string(),
        file: content,
        file_name: file.to_string(),
        file_type: "csv".to_string(),
    })?;
    // The job parses with the same separator the header was read with.
    queue.run_import(job, &fields, &ImportOptions::csv(char::from(delimiter), priority))?;
    info!(model, file, job, priority, "Queued CSV import");
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_fields_keep_empty_cells() {
        let fields = header_fields(b"name;;ref\nA;B;C\n", "f.csv", b';').unwrap();
        assert_eq!(fields, vec!["name", "", "ref"]);
    }

    #[test]
    fn test_header_fields_empty() {
        assert!(matches!(
            header_fields(b"", "f.csv", b','),
            Err(CsvError::EmptyFile { .. })
        ));
    }
}
