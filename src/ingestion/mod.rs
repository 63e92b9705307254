//! Table stages and their shared machinery.
//!
//! The four tables are read in dependency order, each by its own [`TableStage`]:
//!
//! - [`EllipsoidStage`] (`ellipsoid.csv`)
//! - [`DatumStage`] (`datum.csv`), resolving ellipsoids
//! - [`GeodeticCrsStage`] (`planetodetic.csv`), resolving datums and the shared
//!   [`CoordinateSystemRegistry`]
//! - [`ProjectedCrsStage`] (`projection.csv`), resolving geographic base CRSs
//!
//! [`load_table`] drives any stage over a file and fills a [`KeyedTable`]; recoverable row
//! problems are reported to a [`PipelineObserver`].

pub mod datum;
pub mod ellipsoid;
pub mod geodetic;
pub mod observability;
pub mod projected;
pub mod registry;
pub mod stage;
pub mod table;
pub mod tokenizer;

pub use datum::DatumStage;
pub use ellipsoid::EllipsoidStage;
pub use geodetic::GeodeticCrsStage;
pub use observability::{
    CompositeObserver, Diagnostic, DiagnosticKind, MemoryObserver, PipelineObserver, Severity,
    SkipReason, StageContext, StageStats, TracingObserver, UnsupportedFeature,
};
pub use projected::ProjectedCrsStage;
pub use registry::{CoordinateSystemRegistry, Orientation};
pub use stage::{
    Row, RowOutcome, TableStage, load_table, load_table_from_reader, table_reader_builder,
};
pub use table::{Entity, KeyedTable};
pub use tokenizer::{UnterminatedQuote, tokenize};
