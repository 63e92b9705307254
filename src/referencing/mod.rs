//! Minimal geodetic referencing model.
//!
//! This module provides the object graph the table stages build and the WKT formatter renders:
//! ellipsoids, prime meridians, geodetic datums, coordinate system axes and coordinate systems,
//! geographic/geocentric/projected CRSs and the defining conversions of projected CRSs.
//!
//! Every constructor validates its inputs and returns a [`FactoryResult`]. Objects are immutable
//! once built; components shared between many objects (ellipsoids, datums, coordinate systems,
//! base CRSs) are held through [`std::sync::Arc`].

pub mod crs;
pub mod cs;
pub mod datum;
pub mod operation;
pub mod unit;

use thiserror::Error;

pub use crs::{GeodeticCrs, GeodeticKind, ProjectedCrs};
pub use cs::{Axis, AxisDirection, CoordinateSystem, CsKind};
pub use datum::{Ellipsoid, GeodeticDatum, PrimeMeridian, SecondDefiningParameter};
pub use operation::{Conversion, OperationMethod, ParameterDescriptor, ParameterValueGroup};
pub use unit::{Unit, UnitKind};

/// Convenience result type for object construction.
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Error raised when a referencing object cannot be created from the given definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FactoryError {
    /// A numeric property is missing, non-finite or out of range.
    #[error("illegal {property} for '{object}': {value}")]
    IllegalValue {
        object: String,
        property: &'static str,
        value: f64,
    },

    /// No operation method matches the given name or alias.
    #[error("no operation method named '{0}'")]
    NoSuchMethod(String),

    /// The method does not declare a parameter with the given name or alias.
    #[error("parameter '{parameter}' not found in method '{method}'")]
    ParameterNotFound { method: String, parameter: String },

    /// Components do not fit together (wrong coordinate system kind, axis mismatch...).
    #[error("incompatible definition for '{object}': {message}")]
    Incompatible { object: String, message: String },
}

impl FactoryError {
    pub(crate) fn incompatible(object: &str, message: impl Into<String>) -> Self {
        Self::Incompatible {
            object: object.to_owned(),
            message: message.into(),
        }
    }
}

/// Compare two identifiers the way catalog names are matched: case-insensitive, ignoring
/// everything that is not a letter or a digit (`Central_Meridian` == `central meridian`).
pub(crate) fn identifier_matches(a: &str, b: &str) -> bool {
    let normalize = |s: &str| {
        s.chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect::<String>()
    };
    normalize(a) == normalize(b)
}
