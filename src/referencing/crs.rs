//! Geodetic and projected coordinate reference systems.

use std::sync::Arc;

use super::cs::{CoordinateSystem, CsKind};
use super::datum::GeodeticDatum;
use super::operation::Conversion;
use super::{FactoryError, FactoryResult};
use crate::types::Metadata;

/// Flavour of a [`GeodeticCrs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeodeticKind {
    /// Latitude/longitude on the ellipsoid.
    Geographic,
    /// Body-centred spherical coordinates.
    Geocentric,
}

/// A geographic or geocentric CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct GeodeticCrs {
    metadata: Metadata,
    kind: GeodeticKind,
    datum: Arc<GeodeticDatum>,
    cs: Arc<CoordinateSystem>,
}

impl GeodeticCrs {
    /// A geographic CRS; requires an ellipsoidal coordinate system.
    pub fn geographic(
        metadata: Metadata,
        datum: Arc<GeodeticDatum>,
        cs: Arc<CoordinateSystem>,
    ) -> FactoryResult<Self> {
        Self::build(metadata, GeodeticKind::Geographic, CsKind::Ellipsoidal, datum, cs)
    }

    /// A geocentric CRS; requires a spherical coordinate system.
    pub fn geocentric(
        metadata: Metadata,
        datum: Arc<GeodeticDatum>,
        cs: Arc<CoordinateSystem>,
    ) -> FactoryResult<Self> {
        Self::build(metadata, GeodeticKind::Geocentric, CsKind::Spherical, datum, cs)
    }

    fn build(
        metadata: Metadata,
        kind: GeodeticKind,
        expected: CsKind,
        datum: Arc<GeodeticDatum>,
        cs: Arc<CoordinateSystem>,
    ) -> FactoryResult<Self> {
        if cs.kind() != expected {
            return Err(FactoryError::incompatible(
                &metadata.name,
                format!(
                    "a {kind:?} CRS needs a {} coordinate system, got '{}'",
                    expected.wkt_name(),
                    cs.name()
                ),
            ));
        }
        Ok(Self {
            metadata,
            kind,
            datum,
            cs,
        })
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Geographic or geocentric.
    pub fn kind(&self) -> GeodeticKind {
        self.kind
    }

    pub fn is_geographic(&self) -> bool {
        self.kind == GeodeticKind::Geographic
    }

    /// The datum, shared with every CRS built on it.
    pub fn datum(&self) -> &Arc<GeodeticDatum> {
        &self.datum
    }

    pub fn coordinate_system(&self) -> &Arc<CoordinateSystem> {
        &self.cs
    }
}

/// A planar CRS derived from a geographic CRS by a map projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedCrs {
    metadata: Metadata,
    base: Arc<GeodeticCrs>,
    conversion: Conversion,
    cs: Arc<CoordinateSystem>,
}

impl ProjectedCrs {
    /// Requires a geographic base and a Cartesian coordinate system whose first axis points the
    /// same way as the base longitude axis (east or west).
    pub fn new(
        metadata: Metadata,
        base: Arc<GeodeticCrs>,
        conversion: Conversion,
        cs: Arc<CoordinateSystem>,
    ) -> FactoryResult<Self> {
        if !base.is_geographic() {
            return Err(FactoryError::incompatible(
                &metadata.name,
                format!("base CRS '{}' is not geographic", base.name()),
            ));
        }
        if cs.kind() != CsKind::Cartesian {
            return Err(FactoryError::incompatible(
                &metadata.name,
                format!("'{}' is not a Cartesian coordinate system", cs.name()),
            ));
        }
        let longitude = base.coordinate_system().axis(1).map(|a| a.direction());
        let abscissa = cs.axis(0).map(|a| a.direction());
        if longitude != abscissa {
            return Err(FactoryError::incompatible(
                &metadata.name,
                format!(
                    "Cartesian axis direction {abscissa:?} does not match base longitude direction {longitude:?}"
                ),
            ));
        }
        Ok(Self {
            metadata,
            base,
            conversion,
            cs,
        })
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// The geographic CRS this projection is defined on.
    pub fn base(&self) -> &Arc<GeodeticCrs> {
        &self.base
    }

    /// Method and parameter values of the map projection.
    pub fn conversion(&self) -> &Conversion {
        &self.conversion
    }

    pub fn coordinate_system(&self) -> &Arc<CoordinateSystem> {
        &self.cs
    }
}
