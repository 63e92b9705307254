//! Shared driver for the table stages.
//!
//! Every table is read the same way: the first record is a header, `#` comment lines and blank
//! lines are ignored, rows are tokenized with [`super::tokenizer`] and handed to
//! [`TableStage::create`]. Created entities are stored under the key formed by the row's first
//! three columns (`authority`, `version`, `code`); column 3 is the name.

use std::io::Read;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::referencing::FactoryError;
use crate::types::{IdentityKey, Metadata};

use super::observability::{
    Diagnostic, DiagnosticKind, PipelineObserver, SkipReason, StageContext, StageStats,
};
use super::table::{Entity, KeyedTable};
use super::tokenizer::merge_quoted;

const AUTHORITY: usize = 0;
const VERSION: usize = 1;
const CODE: usize = 2;
const NAME: usize = 3;

/// One tokenized data row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    table: &'static str,
    line: usize,
    fields: Vec<String>,
}

impl Row {
    /// A tokenized row of `table` read at `line`.
    pub fn new(table: &'static str, line: usize, fields: Vec<String>) -> Self {
        Self { table, line, fields }
    }

    /// Logical table name, used in errors and diagnostics.
    pub fn table(&self) -> &'static str {
        self.table
    }

    /// 1-based line number in the source file.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of fields after quote merging.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True for a blank row, which the table loader skips.
    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|f| f.is_empty())
    }

    /// Text of a column; missing trailing columns read as the empty string.
    pub fn text(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    /// Numeric value of a column. Empty or missing cells are `NaN` ("absent", distinct from 0).
    pub fn number(&self, index: usize, column: &str) -> PipelineResult<f64> {
        let raw = self.text(index);
        if raw.is_empty() {
            return Ok(f64::NAN);
        }
        raw.parse::<f64>().map_err(|e| PipelineError::ParseError {
            table: self.table,
            line: self.line,
            column: column.to_owned(),
            raw: raw.to_owned(),
            message: e.to_string(),
        })
    }

    /// The row's own `authority:version:code` key, from the first three columns.
    pub fn key(&self) -> IdentityKey {
        IdentityKey::new(self.text(AUTHORITY), self.text(VERSION), self.text(CODE))
    }

    /// The name column.
    pub fn name(&self) -> &str {
        self.text(NAME)
    }

    /// Identifier and name of the object built from this row.
    pub fn metadata(&self) -> Metadata {
        Metadata::identified(self.key(), self.name())
    }

    /// Key designated by a reference column, resolved relative to this row's key.
    pub fn reference(&self, index: usize) -> IdentityKey {
        self.key().resolve(self.text(index))
    }

    /// Attach this row's location to a factory error.
    pub fn factory_error(&self, source: FactoryError) -> PipelineError {
        PipelineError::Factory {
            table: self.table,
            line: self.line,
            source,
        }
    }

    /// Error for a token outside its closed vocabulary.
    pub fn malformed(&self, column: &'static str, index: usize, expected: &'static str) -> PipelineError {
        PipelineError::MalformedEnumeration {
            table: self.table,
            line: self.line,
            column,
            value: self.text(index).to_owned(),
            expected,
        }
    }
}

/// Result of processing one row.
#[derive(Debug)]
pub enum RowOutcome<E> {
    Created(E),
    Skipped(SkipReason),
}

/// One table of the pipeline: turns rows into entities, resolving references against the
/// tables of earlier stages.
pub trait TableStage {
    type Entity: Entity;

    /// Table name used in diagnostics and errors.
    fn table_name(&self) -> &'static str;

    /// Build the entity described by `row`.
    ///
    /// Recoverable problems are returned as [`RowOutcome::Skipped`]; an `Err` aborts the stage.
    fn create(&self, row: &Row) -> PipelineResult<RowOutcome<Self::Entity>>;
}

/// CSV reader settings shared by all tables.
///
/// Quoting is disabled on purpose: the reader only splits on commas and
/// [`merge_quoted`] reassembles quoted fields.
pub fn table_reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All);
    builder
}

/// Read a table file and run `stage` over it.
pub fn load_table<S: TableStage>(
    stage: &S,
    path: impl AsRef<Path>,
    observer: &dyn PipelineObserver,
) -> PipelineResult<(KeyedTable<S::Entity>, StageStats)> {
    let path = path.as_ref();
    let mut rdr = table_reader_builder().from_path(path)?;
    let ctx = StageContext {
        table: stage.table_name(),
        path: Some(path.to_path_buf()),
    };
    load_table_from_reader(stage, &mut rdr, &ctx, observer)
}

/// Run `stage` over the records of an existing CSV reader.
///
/// The reader should be configured with [`table_reader_builder`].
pub fn load_table_from_reader<S: TableStage, R: Read>(
    stage: &S,
    rdr: &mut csv::Reader<R>,
    ctx: &StageContext,
    observer: &dyn PipelineObserver,
) -> PipelineResult<(KeyedTable<S::Entity>, StageStats)> {
    let table_name = stage.table_name();
    let mut table = KeyedTable::new();
    let mut stats = StageStats::default();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let fields = merge_quoted(record.iter()).map_err(|source| PipelineError::Tokenize {
            table: table_name,
            line,
            source,
        })?;
        let row = Row::new(table_name, line, fields);
        if row.is_empty() {
            continue;
        }
        stats.rows += 1;

        match stage.create(&row)? {
            RowOutcome::Created(entity) => {
                let key = row.key();
                if table.insert(key.clone(), entity) {
                    stats.created += 1;
                } else {
                    stats.duplicates += 1;
                    observer.on_diagnostic(&Diagnostic {
                        table: table_name,
                        line,
                        name: row.name().to_owned(),
                        kind: DiagnosticKind::DuplicateKey(key),
                    });
                }
            }
            RowOutcome::Skipped(reason) => {
                stats.skipped += 1;
                observer.on_diagnostic(&Diagnostic {
                    table: table_name,
                    line,
                    name: row.name().to_owned(),
                    kind: DiagnosticKind::Skipped(reason),
                });
            }
        }
    }

    observer.on_stage_finished(ctx, stats);
    Ok((table, stats))
}
