//! Geodetic CRS table (`planetodetic.csv`).
//!
//! Columns: `authority, version, code, name, datum, csType, longitudeDirection`.
//! `csType` is `ellipsoidal` (geographic CRS) or `spherical` (geocentric CRS);
//! `longitudeDirection` is `east` or `west`. Both are case-insensitive, and any other token is a
//! hard error.

use crate::error::PipelineResult;
use crate::referencing::{CsKind, GeodeticCrs, GeodeticDatum};

use super::observability::SkipReason;
use super::registry::{CoordinateSystemRegistry, Orientation};
use super::stage::{Row, RowOutcome, TableStage};
use super::table::KeyedTable;

const DATUM: usize = 4;
const CS_TYPE: usize = 5;
const LONGITUDE_DIRECTION: usize = 6;

/// Builds geographic and geocentric CRSs against the completed datum table.
#[derive(Debug)]
pub struct GeodeticCrsStage<'a> {
    datums: &'a KeyedTable<GeodeticDatum>,
    registry: &'a CoordinateSystemRegistry,
}

impl<'a> GeodeticCrsStage<'a> {
    pub fn new(datums: &'a KeyedTable<GeodeticDatum>, registry: &'a CoordinateSystemRegistry) -> Self {
        Self { datums, registry }
    }
}

impl TableStage for GeodeticCrsStage<'_> {
    type Entity = GeodeticCrs;

    fn table_name(&self) -> &'static str {
        "planetodetic"
    }

    fn create(&self, row: &Row) -> PipelineResult<RowOutcome<GeodeticCrs>> {
        let key = row.reference(DATUM);
        let Some(datum) = self.datums.lookup(&key) else {
            return Ok(RowOutcome::Skipped(SkipReason::UnresolvedReference(key)));
        };
        let orientation = Orientation::parse(row.text(LONGITUDE_DIRECTION)).ok_or_else(|| {
            row.malformed("longitudeDirection", LONGITUDE_DIRECTION, "east or west")
        })?;
        let crs = match row.text(CS_TYPE).to_ascii_lowercase().as_str() {
            "spherical" => GeodeticCrs::geocentric(
                row.metadata(),
                datum,
                self.registry.get(CsKind::Spherical, orientation),
            ),
            "ellipsoidal" => GeodeticCrs::geographic(
                row.metadata(),
                datum,
                self.registry.get(CsKind::Ellipsoidal, orientation),
            ),
            _ => return Err(row.malformed("csType", CS_TYPE, "spherical or ellipsoidal")),
        };
        crs.map(RowOutcome::Created).map_err(|e| row.factory_error(e))
    }
}
