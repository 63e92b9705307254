//! Ellipsoid table (`ellipsoid.csv`).
//!
//! Columns: `authority, version, code, name, semiMajorAxis, semiMedianAxis, semiMinorAxis,
//! inverseFlattening`. Lengths are in metres.

use crate::error::PipelineResult;
use crate::referencing::{Ellipsoid, Unit};

use super::observability::{SkipReason, UnsupportedFeature};
use super::stage::{Row, RowOutcome, TableStage};

const SEMI_MAJOR_AXIS: usize = 4;
const SEMI_MEDIAN_AXIS: usize = 5;
const SEMI_MINOR_AXIS: usize = 6;
const INVERSE_FLATTENING: usize = 7;

#[derive(Debug, Default, Clone, Copy)]
pub struct EllipsoidStage;

impl TableStage for EllipsoidStage {
    type Entity = Ellipsoid;

    fn table_name(&self) -> &'static str {
        "ellipsoid"
    }

    fn create(&self, row: &Row) -> PipelineResult<RowOutcome<Ellipsoid>> {
        let semi_major = row.number(SEMI_MAJOR_AXIS, "semiMajorAxis")?;
        let semi_median = row.number(SEMI_MEDIAN_AXIS, "semiMedianAxis")?;
        let semi_minor = row.number(SEMI_MINOR_AXIS, "semiMinorAxis")?;
        let inverse_flattening = row.number(INVERSE_FLATTENING, "inverseFlattening")?;

        if semi_median > 0.0 {
            return Ok(RowOutcome::Skipped(SkipReason::Unsupported(
                UnsupportedFeature::TriaxialEllipsoid,
            )));
        }
        let ellipsoid = if inverse_flattening > 0.0 {
            Ellipsoid::from_inverse_flattening(row.metadata(), semi_major, inverse_flattening, Unit::Metre)
        } else {
            Ellipsoid::from_axes(row.metadata(), semi_major, semi_minor, Unit::Metre)
        };
        ellipsoid
            .map(RowOutcome::Created)
            .map_err(|e| row.factory_error(e))
    }
}
