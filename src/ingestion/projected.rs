//! Projected CRS table (`projection.csv`).
//!
//! Columns: `authority, version, code, name, baseCRS, method`, followed by
//! `parameterName, parameterValue` pairs repeated as needed. Empty parameter names are ignored,
//! which lets rows of different lengths share trailing columns.

use crate::error::{PipelineError, PipelineResult};
use crate::referencing::{Conversion, CsKind, GeodeticCrs, OperationMethod, ProjectedCrs};
use crate::types::Metadata;

use super::observability::{SkipReason, UnsupportedFeature};
use super::registry::{CoordinateSystemRegistry, Orientation};
use super::stage::{Row, RowOutcome, TableStage};
use super::table::KeyedTable;

const BASE_CRS: usize = 4;
const METHOD: usize = 5;
const FIRST_PARAMETER: usize = 6;

/// Parameter names used by the tables that the catalog knows under another name.
fn canonical_parameter_name(name: &str) -> &str {
    match name {
        // Sinusoidal declares its central meridian as `Central_Meridian` only.
        "Longitude_Of_Center" => "Central_Meridian",
        other => other,
    }
}

/// Builds projected CRSs against the completed geodetic CRS table.
#[derive(Debug)]
pub struct ProjectedCrsStage<'a> {
    bases: &'a KeyedTable<GeodeticCrs>,
    registry: &'a CoordinateSystemRegistry,
}

impl<'a> ProjectedCrsStage<'a> {
    pub fn new(bases: &'a KeyedTable<GeodeticCrs>, registry: &'a CoordinateSystemRegistry) -> Self {
        Self { bases, registry }
    }
}

impl TableStage for ProjectedCrsStage<'_> {
    type Entity = ProjectedCrs;

    fn table_name(&self) -> &'static str {
        "projection"
    }

    fn create(&self, row: &Row) -> PipelineResult<RowOutcome<ProjectedCrs>> {
        let key = row.reference(BASE_CRS);
        let Some(base) = self.bases.lookup(&key) else {
            return Ok(RowOutcome::Skipped(SkipReason::UnresolvedReference(key)));
        };
        if !base.is_geographic() {
            return Ok(RowOutcome::Skipped(SkipReason::Unsupported(
                UnsupportedFeature::GeocentricBaseCrs,
            )));
        }

        let direction = base.coordinate_system().axis(1).map(|axis| axis.direction());
        let orientation = direction.and_then(Orientation::from_direction).ok_or_else(|| {
            PipelineError::UnexpectedAxisDirection {
                table: row.table(),
                line: row.line(),
                base: base.name().to_owned(),
                direction: direction.map_or_else(|| "none".to_owned(), |d| d.to_string()),
            }
        })?;

        let Some(method) = OperationMethod::find(row.text(METHOD)) else {
            return Ok(RowOutcome::Skipped(SkipReason::UnrecognizedMethod(
                row.text(METHOD).to_owned(),
            )));
        };

        let mut parameters = method.create_parameters();
        for i in (FIRST_PARAMETER..row.len()).step_by(2) {
            let name = canonical_parameter_name(row.text(i));
            if name.is_empty() {
                continue;
            }
            let value = row.number(i + 1, name)?;
            parameters.set(name, value).map_err(|e| row.factory_error(e))?;
        }

        let cs = self.registry.get(CsKind::Cartesian, orientation);
        Conversion::defining(Metadata::named(row.name()), method, parameters)
            .and_then(|conversion| ProjectedCrs::new(row.metadata(), base, conversion, cs))
            .map(RowOutcome::Created)
            .map_err(|e| row.factory_error(e))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ingestion::tokenizer::tokenize;
    use crate::referencing::{
        Axis, AxisDirection, CoordinateSystem, Ellipsoid, GeodeticDatum, PrimeMeridian, Unit,
    };
    use crate::types::IdentityKey;

    struct Fixture {
        registry: CoordinateSystemRegistry,
        bases: KeyedTable<GeodeticCrs>,
    }

    fn fixture() -> Fixture {
        let registry = CoordinateSystemRegistry::new().unwrap();
        let ellipsoid = Ellipsoid::from_axes(Metadata::named("Moon"), 1737400.0, 1737400.0, Unit::Metre).unwrap();
        let pm = PrimeMeridian::new(Metadata::named("Reference Meridian"), 0.0, Unit::Degree).unwrap();
        let datum = Arc::new(GeodeticDatum::new(Metadata::named("D_Moon"), Arc::new(ellipsoid), pm).unwrap());

        let mut bases = KeyedTable::new();
        for (code, orientation) in [("30100", Orientation::East), ("30101", Orientation::West)] {
            let key = IdentityKey::new("IAU", "2015", code);
            let crs = GeodeticCrs::geographic(
                Metadata::identified(key.clone(), format!("Moon {code}")),
                Arc::clone(&datum),
                registry.get(CsKind::Ellipsoidal, orientation),
            )
            .unwrap();
            bases.insert(key, crs);
        }
        let key = IdentityKey::new("IAU", "2015", "30102");
        let geocentric = GeodeticCrs::geocentric(
            Metadata::identified(key.clone(), "Moon sphere"),
            datum,
            registry.get(CsKind::Spherical, Orientation::East),
        )
        .unwrap();
        bases.insert(key, geocentric);
        Fixture { registry, bases }
    }

    fn create(line: &str) -> PipelineResult<RowOutcome<ProjectedCrs>> {
        let f = fixture();
        let row = Row::new("projection", 3, tokenize(line).unwrap());
        ProjectedCrsStage::new(&f.bases, &f.registry).create(&row)
    }

    #[test]
    fn longitude_of_center_is_stored_as_central_meridian() {
        let Ok(RowOutcome::Created(crs)) =
            create("IAU,2015,30110,Moon Sinusoidal,30100,Sinusoidal,Longitude_Of_Center,0,False_Easting,0")
        else {
            panic!("expected a projected CRS");
        };
        let parameters = crs.conversion().parameters();
        let names: Vec<_> = parameters.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["Central_Meridian", "False_Easting"]);
        assert_eq!(parameters.get("Central_Meridian").unwrap().value, 0.0);
        assert_eq!(crs.conversion().name(), "Moon Sinusoidal");
    }

    #[test]
    fn west_base_selects_west_cartesian_system() {
        let Ok(RowOutcome::Created(crs)) =
            create("IAU,2015,30111,Moon Equirectangular,30101,Equirectangular,Standard_Parallel_1,0,Central_Meridian,180")
        else {
            panic!("expected a projected CRS");
        };
        let cs = crs.coordinate_system();
        assert_eq!(cs.axis(0).unwrap().direction(), AxisDirection::West);
        assert_eq!(cs.axis(0).unwrap().name(), "Westing");
    }

    #[test]
    fn empty_parameter_names_are_ignored() {
        let Ok(RowOutcome::Created(crs)) =
            create("IAU,2015,30112,Moon Mollweide,30100,Mollweide,,,Central_Meridian,0,,")
        else {
            panic!("expected a projected CRS");
        };
        assert_eq!(crs.conversion().parameters().len(), 1);
    }

    #[test]
    fn unknown_method_is_skipped() {
        let outcome = create("IAU,2015,30113,Moon Bogus,30100,Bogus_Projection,Central_Meridian,0").unwrap();
        assert!(matches!(
            outcome,
            RowOutcome::Skipped(SkipReason::UnrecognizedMethod(name)) if name == "Bogus_Projection"
        ));
    }

    #[test]
    fn geocentric_base_is_skipped() {
        let outcome = create("IAU,2015,30114,Moon Sphere Sinusoidal,30102,Sinusoidal").unwrap();
        assert!(matches!(
            outcome,
            RowOutcome::Skipped(SkipReason::Unsupported(UnsupportedFeature::GeocentricBaseCrs))
        ));
    }

    #[test]
    fn missing_base_is_skipped() {
        let outcome = create("IAU,2015,30115,Moon Sinusoidal,39999,Sinusoidal").unwrap();
        assert!(matches!(outcome, RowOutcome::Skipped(SkipReason::UnresolvedReference(_))));
    }

    #[test]
    fn unknown_parameter_is_a_factory_error() {
        let err = create("IAU,2015,30116,Moon Sinusoidal,30100,Sinusoidal,Scale_Factor,1").unwrap_err();
        assert!(matches!(err, PipelineError::Factory { line: 3, .. }));
    }

    #[test]
    fn base_longitude_neither_east_nor_west_is_fatal() {
        let f = fixture();
        let datum = Arc::clone(
            f.bases
                .lookup(&IdentityKey::new("IAU", "2015", "30100"))
                .unwrap()
                .datum(),
        );
        let cs = CoordinateSystem::ellipsoidal(
            "Skewed ellipsoidal CS",
            Axis::new("Latitude", "φ", AxisDirection::North, Unit::Degree),
            Axis::new("Longitude", "λ", AxisDirection::Up, Unit::Degree),
        )
        .unwrap();
        let key = IdentityKey::new("IAU", "2015", "30190");
        let base = GeodeticCrs::geographic(Metadata::identified(key.clone(), "Moon skewed"), datum, Arc::new(cs)).unwrap();
        let mut bases = KeyedTable::new();
        bases.insert(key, base);

        let row = Row::new("projection", 12, tokenize("IAU,2015,30191,Moon skewed / Sinusoidal,30190,Sinusoidal").unwrap());
        let err = ProjectedCrsStage::new(&bases, &f.registry).create(&row).unwrap_err();
        assert!(matches!(
            &err,
            PipelineError::UnexpectedAxisDirection { table: "projection", line: 12, base, direction }
                if base == "Moon skewed" && direction == "up"
        ));
        assert!(err.to_string().starts_with("projection line 12: unexpected axis direction 'up'"));
    }

    #[test]
    fn mismatched_orientation_is_rejected_by_the_constructor() {
        let f = fixture();
        let base = f.bases.lookup(&IdentityKey::new("IAU", "2015", "30101")).unwrap();
        let method = OperationMethod::lookup("Sinusoidal").unwrap();
        let conversion = Conversion::defining(Metadata::named("c"), method, method.create_parameters()).unwrap();
        let east = f.registry.get(CsKind::Cartesian, Orientation::East);
        assert!(ProjectedCrs::new(Metadata::named("p"), base, conversion, east).is_err());
    }
}
