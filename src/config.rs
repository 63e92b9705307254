//! Run configuration.
//!
//! A [`PipelineConfig`] names the input directory, the four table files inside it, the output
//! document and the WKT layout. Every field has a default, so a JSON config file only needs the
//! keys it changes:
//!
//! ```json
//! { "input_dir": "data/iau2015", "wkt": { "indent": 4 } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::wkt::WktOptions;

const DEFAULT_OUTPUT: &str = "wkt.txt";

/// The four input tables, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Ellipsoid,
    Datum,
    Geodetic,
    Projected,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Ellipsoid,
        TableKind::Datum,
        TableKind::Geodetic,
        TableKind::Projected,
    ];

    /// Table name used in diagnostics.
    pub fn table_name(self) -> &'static str {
        match self {
            TableKind::Ellipsoid => "ellipsoid",
            TableKind::Datum => "datum",
            TableKind::Geodetic => "planetodetic",
            TableKind::Projected => "projection",
        }
    }
}

/// File names of the input tables, relative to [`PipelineConfig::input_dir`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableFiles {
    pub ellipsoid: String,
    pub datum: String,
    pub geodetic: String,
    pub projected: String,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            ellipsoid: "ellipsoid.csv".to_string(),
            datum: "datum.csv".to_string(),
            geodetic: "planetodetic.csv".to_string(),
            projected: "projection.csv".to_string(),
        }
    }
}

impl TableFiles {
    pub fn get(&self, kind: TableKind) -> &str {
        match kind {
            TableKind::Ellipsoid => &self.ellipsoid,
            TableKind::Datum => &self.datum,
            TableKind::Geodetic => &self.geodetic,
            TableKind::Projected => &self.projected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory containing the table files.
    pub input_dir: PathBuf,
    /// Output document; `None` means `wkt.txt` inside [`Self::input_dir`].
    pub output: Option<PathBuf>,
    pub tables: TableFiles,
    pub wkt: WktOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output: None,
            tables: TableFiles::default(),
            wkt: WktOptions::default(),
        }
    }
}

impl PipelineConfig {
    /// Configuration reading the default table names from `input_dir`.
    pub fn for_directory(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            ..Self::default()
        }
    }

    pub fn from_json_str(text: &str) -> PipelineResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn table_path(&self, kind: TableKind) -> PathBuf {
        self.input_dir.join(self.tables.get(kind))
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input_dir.join(DEFAULT_OUTPUT))
    }

    /// Check that the input directory and every table file exist.
    pub fn validate(&self) -> PipelineResult<()> {
        if !self.input_dir.is_dir() {
            return Err(PipelineError::Config {
                message: format!("input directory {} does not exist", self.input_dir.display()),
            });
        }
        for kind in TableKind::ALL {
            let path = self.table_path(kind);
            if !path.is_file() {
                return Err(PipelineError::MissingTable {
                    table: kind.table_name(),
                    path,
                });
            }
        }
        if self.wkt.multiline && self.wkt.indent > 16 {
            return Err(PipelineError::Config {
                message: format!("wkt.indent must be at most 16, got {}", self.wkt.indent),
            });
        }
        Ok(())
    }
}
