//! `planetary-wkt` turns a chain of planetary reference-data tables into a single document holding
//! the WKT 2 of every geodetic and projected CRS they define.
//!
//! The primary entrypoint is [`pipeline::run_pipeline`], which reads the tables named by a
//! [`config::PipelineConfig`] and writes the document atomically.
//!
//! ## Input tables
//!
//! Tables are comma-separated with a header line; `#` lines and blank lines are ignored. Fields
//! containing commas may be wrapped in double quotes. The first four columns of every table are
//! `authority, version, code, name`; the first three form the row's [`types::IdentityKey`].
//!
//! | Table              | Builds                        | References        |
//! |--------------------|-------------------------------|-------------------|
//! | `ellipsoid.csv`    | [`referencing::Ellipsoid`]     |                   |
//! | `datum.csv`        | [`referencing::GeodeticDatum`] | ellipsoid         |
//! | `planetodetic.csv` | [`referencing::GeodeticCrs`]   | datum             |
//! | `projection.csv`   | [`referencing::ProjectedCrs`]  | geographic CRS    |
//!
//! Rows describing unsupported features (triaxial ellipsoids, non-zero prime meridians, projections
//! on a geocentric CRS), rows referencing a missing entry, rows with an unknown projection method
//! and duplicated keys are skipped and reported to a [`ingestion::PipelineObserver`]. Malformed
//! input (unknown axis direction or coordinate system type, unparsable numbers, unterminated
//! quotes) aborts the run.
//!
//! ## Quick example
//!
//! ```no_run
//! use planetary_wkt::config::PipelineConfig;
//! use planetary_wkt::ingestion::MemoryObserver;
//! use planetary_wkt::pipeline::run_pipeline;
//!
//! # fn main() -> Result<(), planetary_wkt::PipelineError> {
//! let observer = MemoryObserver::new();
//! let summary = run_pipeline(&PipelineConfig::for_directory("data"), &observer)?;
//! for diagnostic in observer.diagnostics() {
//!     eprintln!("{diagnostic}");
//! }
//! println!("objects={}", summary.objects_written);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: tokenizer, keyed tables and the four table stages
//! - [`referencing`]: ellipsoids, datums, coordinate systems, CRSs and projection methods
//! - [`wkt`]: WKT 2 formatter
//! - [`document`]: output document assembly
//! - [`pipeline`]: end-to-end run
//! - [`config`]: run configuration
//! - [`error`]: error types used across the crate

pub mod config;
pub mod document;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod referencing;
pub mod types;
pub mod wkt;

pub use error::{PipelineError, PipelineResult};
