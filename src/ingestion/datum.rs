//! Datum table (`datum.csv`).
//!
//! Columns: `authority, version, code, name, body, ellipsoid, primeMeridianName,
//! primeMeridianValue`. The prime meridian value is in degrees.

use crate::error::PipelineResult;
use crate::referencing::{Ellipsoid, GeodeticDatum, PrimeMeridian, Unit};
use crate::types::Metadata;

use super::observability::{SkipReason, UnsupportedFeature};
use super::stage::{Row, RowOutcome, TableStage};
use super::table::KeyedTable;

const ELLIPSOID: usize = 5;
const PRIME_MERIDIAN_NAME: usize = 6;
const PRIME_MERIDIAN_VALUE: usize = 7;

const DEFAULT_PRIME_MERIDIAN: &str = "Reference Meridian";

/// Builds datums against the completed ellipsoid table.
#[derive(Debug)]
pub struct DatumStage<'a> {
    ellipsoids: &'a KeyedTable<Ellipsoid>,
}

impl<'a> DatumStage<'a> {
    pub fn new(ellipsoids: &'a KeyedTable<Ellipsoid>) -> Self {
        Self { ellipsoids }
    }
}

impl TableStage for DatumStage<'_> {
    type Entity = GeodeticDatum;

    fn table_name(&self) -> &'static str {
        "datum"
    }

    fn create(&self, row: &Row) -> PipelineResult<RowOutcome<GeodeticDatum>> {
        let key = row.reference(ELLIPSOID);
        let Some(ellipsoid) = self.ellipsoids.lookup(&key) else {
            return Ok(RowOutcome::Skipped(SkipReason::UnresolvedReference(key)));
        };
        let longitude = row.number(PRIME_MERIDIAN_VALUE, "primeMeridianValue")?;
        if longitude > 0.0 {
            return Ok(RowOutcome::Skipped(SkipReason::Unsupported(
                UnsupportedFeature::NonZeroPrimeMeridian,
            )));
        }
        let longitude = if longitude.is_nan() { 0.0 } else { longitude };
        let name = match row.text(PRIME_MERIDIAN_NAME) {
            "" => DEFAULT_PRIME_MERIDIAN,
            name => name,
        };

        PrimeMeridian::new(Metadata::named(name), longitude, Unit::Degree)
            .and_then(|pm| GeodeticDatum::new(row.metadata(), ellipsoid, pm))
            .map(RowOutcome::Created)
            .map_err(|e| row.factory_error(e))
    }
}
