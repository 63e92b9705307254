//! End-to-end run: load the four tables in dependency order, then write the WKT document.
//!
//! ```no_run
//! use planetary_wkt::config::PipelineConfig;
//! use planetary_wkt::ingestion::TracingObserver;
//! use planetary_wkt::pipeline::run_pipeline;
//!
//! # fn main() -> Result<(), planetary_wkt::PipelineError> {
//! let config = PipelineConfig::for_directory("data/iau2015");
//! let summary = run_pipeline(&config, &TracingObserver)?;
//! println!("wrote {} objects to {}", summary.objects_written, summary.output.display());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use serde::Serialize;

use crate::config::{PipelineConfig, TableKind};
use crate::document::write_document;
use crate::error::{PipelineError, PipelineResult};
use crate::ingestion::{
    CoordinateSystemRegistry, DatumStage, EllipsoidStage, GeodeticCrsStage, KeyedTable,
    PipelineObserver, ProjectedCrsStage, StageStats, load_table,
};
use crate::referencing::{Ellipsoid, GeodeticCrs, GeodeticDatum, ProjectedCrs};
use crate::wkt::WktFormatter;

/// Every table produced by a run.
#[derive(Debug)]
pub struct Catalog {
    pub ellipsoids: KeyedTable<Ellipsoid>,
    pub datums: KeyedTable<GeodeticDatum>,
    pub geodetic: KeyedTable<GeodeticCrs>,
    pub projected: KeyedTable<ProjectedCrs>,
}

/// Per-stage counters of a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub ellipsoid: StageStats,
    pub datum: StageStats,
    pub planetodetic: StageStats,
    pub projection: StageStats,
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub stages: CatalogStats,
    pub objects_written: usize,
    pub output: PathBuf,
}

/// Load all four tables. Stops at the first fatal error.
pub fn load_catalog(
    config: &PipelineConfig,
    observer: &dyn PipelineObserver,
) -> PipelineResult<(Catalog, CatalogStats)> {
    let registry = CoordinateSystemRegistry::new().map_err(|source| PipelineError::Config {
        message: format!("cannot build coordinate system registry: {source}"),
    })?;

    let (ellipsoids, ellipsoid) =
        load_table(&EllipsoidStage, config.table_path(TableKind::Ellipsoid), observer)?;
    let (datums, datum) = load_table(
        &DatumStage::new(&ellipsoids),
        config.table_path(TableKind::Datum),
        observer,
    )?;
    let (geodetic, planetodetic) = load_table(
        &GeodeticCrsStage::new(&datums, &registry),
        config.table_path(TableKind::Geodetic),
        observer,
    )?;
    let (projected, projection) = load_table(
        &ProjectedCrsStage::new(&geodetic, &registry),
        config.table_path(TableKind::Projected),
        observer,
    )?;

    let catalog = Catalog {
        ellipsoids,
        datums,
        geodetic,
        projected,
    };
    let stats = CatalogStats {
        ellipsoid,
        datum,
        planetodetic,
        projection,
    };
    Ok((catalog, stats))
}

/// Validate `config`, load every table and write the document.
///
/// No document is written if any stage fails.
pub fn run_pipeline(config: &PipelineConfig, observer: &dyn PipelineObserver) -> PipelineResult<RunSummary> {
    config.validate()?;
    let (catalog, stages) = load_catalog(config, observer)?;

    let output = config.output_path();
    let formatter = WktFormatter::new(config.wkt.clone());
    let objects_written = write_document(&output, &catalog.geodetic, &catalog.projected, &formatter)?;
    tracing::info!(output = %output.display(), objects_written, "pipeline finished");

    Ok(RunSummary {
        stages,
        objects_written,
        output,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::ingestion::MemoryObserver;

    fn write_tables(dir: &Path, projection: &str) {
        fs::write(
            dir.join("ellipsoid.csv"),
            "authority,version,code,name,a,b,c,ivf\nIAU,2015,39900,Venus,6051800,,6051800,\n",
        )
        .unwrap();
        fs::write(
            dir.join("datum.csv"),
            "authority,version,code,name,body,ellipsoid,pm,pmValue\nIAU,2015,29900,D_Venus,Venus,39900,Reference Meridian,0\n",
        )
        .unwrap();
        fs::write(
            dir.join("planetodetic.csv"),
            "authority,version,code,name,datum,csType,dir\nIAU,2015,29900,Venus 2000,29900,ellipsoidal,east\n",
        )
        .unwrap();
        fs::write(dir.join("projection.csv"), projection).unwrap();
    }

    #[test]
    fn run_writes_geodetic_then_projected() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(
            dir.path(),
            "authority,version,code,name,base,method,p1,v1\nIAU,2015,29910,Venus Mollweide,29900,Mollweide,Central_Meridian,0\n",
        );
        let observer = MemoryObserver::new();
        let summary = run_pipeline(&PipelineConfig::for_directory(dir.path()), &observer).unwrap();

        assert_eq!(summary.objects_written, 2);
        assert_eq!(summary.stages.ellipsoid.created, 1);
        assert_eq!(summary.stages.projection.created, 1);
        assert!(observer.diagnostics().is_empty());

        let text = fs::read_to_string(&summary.output).unwrap();
        let geog = text.find("GEOGCRS[\"Venus 2000\"").unwrap();
        let proj = text.find("PROJCRS[\"Venus Mollweide\"").unwrap();
        assert!(geog < proj);
    }

    #[test]
    fn fatal_stage_error_leaves_no_document() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(
            dir.path(),
            "authority,version,code,name,base,method\nIAU,2015,29911,Venus Broken,29900,Sinusoidal,Scale_Factor,1\n",
        );
        let config = PipelineConfig::for_directory(dir.path());
        let err = run_pipeline(&config, &MemoryObserver::new()).unwrap_err();
        assert!(matches!(err, PipelineError::Factory { table: "projection", .. }));
        assert!(!config.output_path().exists());
    }

    #[test]
    fn summary_serializes_stage_counters() {
        let summary = RunSummary {
            stages: CatalogStats::default(),
            objects_written: 3,
            output: PathBuf::from("wkt.txt"),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["objects_written"], 3);
        assert_eq!(json["stages"]["datum"]["rows"], 0);
    }
}
