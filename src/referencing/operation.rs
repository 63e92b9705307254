//! Map projection methods, their parameters, and defining conversions.
//!
//! The method catalog is static. Method and parameter names are matched leniently (case and
//! separators ignored) against the canonical name and every alias, so both the OGC spelling
//! (`Central_Meridian`) and the EPSG spelling (`Longitude of natural origin`) resolve to the
//! same descriptor. Values are always stored under the canonical name.

use super::unit::Unit;
use super::{FactoryError, FactoryResult, identifier_matches};
use crate::types::Metadata;

/// What a parameter measures, which fixes the unit it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Angle,
    Length,
    Scale,
}

impl ParameterKind {
    pub fn unit(self) -> Unit {
        match self {
            ParameterKind::Angle => Unit::Degree,
            ParameterKind::Length => Unit::Metre,
            ParameterKind::Scale => Unit::Unity,
        }
    }
}

/// Declaration of one operation parameter.
#[derive(Debug, PartialEq)]
pub struct ParameterDescriptor {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: ParameterKind,
}

impl ParameterDescriptor {
    /// Whether `name` designates this parameter, by name or alias.
    pub fn matches(&self, name: &str) -> bool {
        identifier_matches(self.name, name) || self.aliases.iter().any(|a| identifier_matches(a, name))
    }
}

/// A map projection method known to the catalog.
#[derive(Debug, PartialEq)]
pub struct OperationMethod {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub parameters: &'static [ParameterDescriptor],
}

const fn param(
    name: &'static str,
    aliases: &'static [&'static str],
    kind: ParameterKind,
) -> ParameterDescriptor {
    ParameterDescriptor { name, aliases, kind }
}

const CENTRAL_MERIDIAN: ParameterDescriptor = param(
    "Central_Meridian",
    &["Longitude of natural origin", "Longitude of origin"],
    ParameterKind::Angle,
);
const LATITUDE_OF_ORIGIN: ParameterDescriptor = param(
    "Latitude_Of_Origin",
    &["Latitude of natural origin"],
    ParameterKind::Angle,
);
const LONGITUDE_OF_CENTER: ParameterDescriptor = param(
    "Longitude_Of_Center",
    &["Longitude of natural origin", "Central_Meridian"],
    ParameterKind::Angle,
);
const LATITUDE_OF_CENTER: ParameterDescriptor = param(
    "Latitude_Of_Center",
    &["Latitude of natural origin", "Latitude_Of_Origin"],
    ParameterKind::Angle,
);
const STANDARD_PARALLEL_1: ParameterDescriptor = param(
    "Standard_Parallel_1",
    &["Latitude of 1st standard parallel", "Latitude of standard parallel"],
    ParameterKind::Angle,
);
const STANDARD_PARALLEL_2: ParameterDescriptor = param(
    "Standard_Parallel_2",
    &["Latitude of 2nd standard parallel"],
    ParameterKind::Angle,
);
const SCALE_FACTOR: ParameterDescriptor = param(
    "Scale_Factor",
    &["Scale factor at natural origin"],
    ParameterKind::Scale,
);
const FALSE_EASTING: ParameterDescriptor = param("False_Easting", &["False easting"], ParameterKind::Length);
const FALSE_NORTHING: ParameterDescriptor =
    param("False_Northing", &["False northing"], ParameterKind::Length);

static CATALOG: &[OperationMethod] = &[
    OperationMethod {
        name: "Equirectangular",
        aliases: &["Equidistant_Cylindrical", "Equidistant Cylindrical (Spherical)", "Plate_Carree"],
        parameters: &[
            STANDARD_PARALLEL_1,
            LATITUDE_OF_ORIGIN,
            CENTRAL_MERIDIAN,
            FALSE_EASTING,
            FALSE_NORTHING,
        ],
    },
    OperationMethod {
        name: "Sinusoidal",
        aliases: &["Pseudo sinusoidal equal-area"],
        parameters: &[CENTRAL_MERIDIAN, FALSE_EASTING, FALSE_NORTHING],
    },
    OperationMethod {
        name: "Mercator_1SP",
        aliases: &["Mercator", "Mercator (variant A)"],
        parameters: &[
            LATITUDE_OF_ORIGIN,
            CENTRAL_MERIDIAN,
            SCALE_FACTOR,
            FALSE_EASTING,
            FALSE_NORTHING,
        ],
    },
    OperationMethod {
        name: "Mercator_2SP",
        aliases: &["Mercator (variant B)"],
        parameters: &[STANDARD_PARALLEL_1, CENTRAL_MERIDIAN, FALSE_EASTING, FALSE_NORTHING],
    },
    OperationMethod {
        name: "Transverse_Mercator",
        aliases: &["Transverse Mercator", "Gauss_Kruger"],
        parameters: &[
            LATITUDE_OF_ORIGIN,
            CENTRAL_MERIDIAN,
            SCALE_FACTOR,
            FALSE_EASTING,
            FALSE_NORTHING,
        ],
    },
    OperationMethod {
        name: "Polar_Stereographic",
        aliases: &[
            "Stereographic_North_Pole",
            "Stereographic_South_Pole",
            "Polar Stereographic (variant A)",
            "Polar Stereographic (variant B)",
        ],
        parameters: &[
            LATITUDE_OF_ORIGIN,
            STANDARD_PARALLEL_1,
            CENTRAL_MERIDIAN,
            SCALE_FACTOR,
            FALSE_EASTING,
            FALSE_NORTHING,
        ],
    },
    OperationMethod {
        name: "Orthographic",
        aliases: &[],
        parameters: &[LATITUDE_OF_CENTER, LONGITUDE_OF_CENTER, FALSE_EASTING, FALSE_NORTHING],
    },
    OperationMethod {
        name: "Lambert_Conformal_Conic_2SP",
        aliases: &["Lambert_Conformal_Conic", "Lambert Conic Conformal (2SP)"],
        parameters: &[
            STANDARD_PARALLEL_1,
            STANDARD_PARALLEL_2,
            LATITUDE_OF_ORIGIN,
            CENTRAL_MERIDIAN,
            FALSE_EASTING,
            FALSE_NORTHING,
        ],
    },
    OperationMethod {
        name: "Lambert_Azimuthal_Equal_Area",
        aliases: &["Lambert Azimuthal Equal Area (Spherical)"],
        parameters: &[LATITUDE_OF_CENTER, LONGITUDE_OF_CENTER, FALSE_EASTING, FALSE_NORTHING],
    },
    OperationMethod {
        name: "Mollweide",
        aliases: &[],
        parameters: &[CENTRAL_MERIDIAN, FALSE_EASTING, FALSE_NORTHING],
    },
    OperationMethod {
        name: "Robinson",
        aliases: &[],
        parameters: &[CENTRAL_MERIDIAN, FALSE_EASTING, FALSE_NORTHING],
    },
];

impl OperationMethod {
    /// Every method known to the catalog.
    pub fn catalog() -> &'static [OperationMethod] {
        CATALOG
    }

    /// Find a method by name or alias.
    pub fn find(name: &str) -> Option<&'static OperationMethod> {
        CATALOG.iter().find(|m| m.matches(name))
    }

    /// Like [`Self::find`], but reports an unknown name as a [`FactoryError::NoSuchMethod`].
    pub fn lookup(name: &str) -> FactoryResult<&'static OperationMethod> {
        Self::find(name).ok_or_else(|| FactoryError::NoSuchMethod(name.trim().to_owned()))
    }

    /// Whether `name` designates this method, ignoring case and separators.
    pub fn matches(&self, name: &str) -> bool {
        identifier_matches(self.name, name) || self.aliases.iter().any(|a| identifier_matches(a, name))
    }

    /// An empty set of values for this method's parameters.
    pub fn create_parameters(&'static self) -> ParameterValueGroup {
        ParameterValueGroup {
            method: self,
            values: vec![None; self.parameters.len()],
        }
    }
}

/// A parameter value, tied to its descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterValue {
    pub descriptor: &'static ParameterDescriptor,
    pub value: f64,
}

impl ParameterValue {
    /// Canonical parameter name.
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn unit(&self) -> Unit {
        self.descriptor.kind.unit()
    }
}

/// Values assigned to the parameters of one [`OperationMethod`].
///
/// Only explicitly assigned parameters are reported; they are listed in the method's declaration
/// order regardless of assignment order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterValueGroup {
    method: &'static OperationMethod,
    values: Vec<Option<f64>>,
}

impl ParameterValueGroup {
    pub fn method(&self) -> &'static OperationMethod {
        self.method
    }

    /// Assign a value by parameter name or alias. A later assignment replaces an earlier one.
    pub fn set(&mut self, name: &str, value: f64) -> FactoryResult<()> {
        let index = self
            .method
            .parameters
            .iter()
            .position(|p| p.matches(name))
            .ok_or_else(|| FactoryError::ParameterNotFound {
                method: self.method.name.to_owned(),
                parameter: name.to_owned(),
            })?;
        if !value.is_finite() {
            return Err(FactoryError::IllegalValue {
                object: self.method.name.to_owned(),
                property: self.method.parameters[index].name,
                value,
            });
        }
        self.values[index] = Some(value);
        Ok(())
    }

    /// The assigned value of a parameter, looked up by name or alias.
    pub fn get(&self, name: &str) -> Option<ParameterValue> {
        self.iter().find(|v| v.descriptor.matches(name))
    }

    /// Assigned values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = ParameterValue> + '_ {
        self.method
            .parameters
            .iter()
            .zip(&self.values)
            .filter_map(|(descriptor, value)| value.map(|value| ParameterValue { descriptor, value }))
    }

    pub fn len(&self) -> usize {
        self.values.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The conversion from a base geographic CRS to a projected CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    metadata: Metadata,
    method: &'static OperationMethod,
    parameters: ParameterValueGroup,
}

impl Conversion {
    /// Create a conversion defined by a method and its parameter values, without a base or target CRS.
    pub fn defining(
        metadata: Metadata,
        method: &'static OperationMethod,
        parameters: ParameterValueGroup,
    ) -> FactoryResult<Self> {
        if !std::ptr::eq(method, parameters.method()) {
            return Err(FactoryError::incompatible(
                &metadata.name,
                format!(
                    "parameters of '{}' cannot define a '{}' conversion",
                    parameters.method().name,
                    method.name
                ),
            ));
        }
        Ok(Self {
            metadata,
            method,
            parameters,
        })
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn method(&self) -> &'static OperationMethod {
        self.method
    }

    pub fn parameters(&self) -> &ParameterValueGroup {
        &self.parameters
    }
}
