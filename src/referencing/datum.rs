//! Ellipsoids, prime meridians and geodetic datums.

use std::sync::Arc;

use super::unit::{Unit, UnitKind};
use super::{FactoryError, FactoryResult};
use crate::types::Metadata;

/// The parameter that completes the semi-major axis in an ellipsoid definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SecondDefiningParameter {
    SemiMinorAxis(f64),
    InverseFlattening(f64),
}

/// A bi-axial ellipsoid (or sphere).
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsoid {
    metadata: Metadata,
    semi_major_axis: f64,
    second: SecondDefiningParameter,
    unit: Unit,
}

impl Ellipsoid {
    /// Create an ellipsoid from its semi-major and semi-minor axis lengths.
    pub fn from_axes(
        metadata: Metadata,
        semi_major_axis: f64,
        semi_minor_axis: f64,
        unit: Unit,
    ) -> FactoryResult<Self> {
        require_length_unit(&metadata, unit)?;
        require_positive(&metadata, "semi-major axis", semi_major_axis)?;
        require_positive(&metadata, "semi-minor axis", semi_minor_axis)?;
        if semi_minor_axis > semi_major_axis {
            return Err(FactoryError::IllegalValue {
                object: metadata.name,
                property: "semi-minor axis (greater than semi-major axis)",
                value: semi_minor_axis,
            });
        }
        Ok(Self {
            metadata,
            semi_major_axis,
            second: SecondDefiningParameter::SemiMinorAxis(semi_minor_axis),
            unit,
        })
    }

    /// Create an ellipsoid from its semi-major axis and inverse flattening.
    pub fn from_inverse_flattening(
        metadata: Metadata,
        semi_major_axis: f64,
        inverse_flattening: f64,
        unit: Unit,
    ) -> FactoryResult<Self> {
        require_length_unit(&metadata, unit)?;
        require_positive(&metadata, "semi-major axis", semi_major_axis)?;
        require_positive(&metadata, "inverse flattening", inverse_flattening)?;
        Ok(Self {
            metadata,
            semi_major_axis,
            second: SecondDefiningParameter::InverseFlattening(inverse_flattening),
            unit,
        })
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    /// The parameter the ellipsoid was defined with, besides the semi-major axis.
    pub fn second_defining_parameter(&self) -> SecondDefiningParameter {
        self.second
    }

    /// Semi-minor axis, derived from the inverse flattening when needed.
    pub fn semi_minor_axis(&self) -> f64 {
        match self.second {
            SecondDefiningParameter::SemiMinorAxis(b) => b,
            SecondDefiningParameter::InverseFlattening(ivf) => {
                self.semi_major_axis * (1.0 - 1.0 / ivf)
            }
        }
    }

    /// Inverse flattening, `0` for a sphere (the WKT convention).
    pub fn inverse_flattening(&self) -> f64 {
        match self.second {
            SecondDefiningParameter::InverseFlattening(ivf) => ivf,
            SecondDefiningParameter::SemiMinorAxis(b) if b == self.semi_major_axis => 0.0,
            SecondDefiningParameter::SemiMinorAxis(b) => {
                self.semi_major_axis / (self.semi_major_axis - b)
            }
        }
    }

    pub fn is_sphere(&self) -> bool {
        self.inverse_flattening() == 0.0
    }

    /// Unit of both axis lengths.
    pub fn unit(&self) -> Unit {
        self.unit
    }
}

/// Origin of longitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimeMeridian {
    metadata: Metadata,
    longitude: f64,
    unit: Unit,
}

impl PrimeMeridian {
    /// Fails when `unit` is not angular or `longitude` is not finite.
    pub fn new(metadata: Metadata, longitude: f64, unit: Unit) -> FactoryResult<Self> {
        if unit.kind() != UnitKind::Angle {
            return Err(FactoryError::incompatible(
                &metadata.name,
                format!("prime meridian unit must be angular, got {}", unit.name()),
            ));
        }
        if !longitude.is_finite() {
            return Err(FactoryError::IllegalValue {
                object: metadata.name,
                property: "prime meridian longitude",
                value: longitude,
            });
        }
        Ok(Self {
            metadata,
            longitude,
            unit,
        })
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Longitude relative to the body's reference meridian.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }
}

/// An ellipsoid anchored to a prime meridian.
#[derive(Debug, Clone, PartialEq)]
pub struct GeodeticDatum {
    metadata: Metadata,
    ellipsoid: Arc<Ellipsoid>,
    prime_meridian: PrimeMeridian,
}

impl GeodeticDatum {
    /// A datum on `ellipsoid`, whose longitudes are counted from `prime_meridian`.
    pub fn new(
        metadata: Metadata,
        ellipsoid: Arc<Ellipsoid>,
        prime_meridian: PrimeMeridian,
    ) -> FactoryResult<Self> {
        Ok(Self {
            metadata,
            ellipsoid,
            prime_meridian,
        })
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn ellipsoid(&self) -> &Arc<Ellipsoid> {
        &self.ellipsoid
    }

    pub fn prime_meridian(&self) -> &PrimeMeridian {
        &self.prime_meridian
    }
}

fn require_positive(metadata: &Metadata, property: &'static str, value: f64) -> FactoryResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FactoryError::IllegalValue {
            object: metadata.name.clone(),
            property,
            value,
        })
    }
}

fn require_length_unit(metadata: &Metadata, unit: Unit) -> FactoryResult<()> {
    if unit.kind() == UnitKind::Length {
        Ok(())
    } else {
        Err(FactoryError::incompatible(
            &metadata.name,
            format!("ellipsoid unit must be a length, got {}", unit.name()),
        ))
    }
}
