//! Coordinate system axes and coordinate systems.

use std::fmt;

use super::unit::{Unit, UnitKind};
use super::{FactoryError, FactoryResult};
use crate::types::Metadata;

/// Direction of a coordinate system axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisDirection {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl AxisDirection {
    /// The direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            AxisDirection::North => AxisDirection::South,
            AxisDirection::South => AxisDirection::North,
            AxisDirection::East => AxisDirection::West,
            AxisDirection::West => AxisDirection::East,
            AxisDirection::Up => AxisDirection::Down,
            AxisDirection::Down => AxisDirection::Up,
        }
    }

    /// Whether two directions lie on the same line (equal or opposite).
    pub fn is_colinear(self, other: Self) -> bool {
        self == other || self == other.opposite()
    }

    /// Lower-case name, as written in WKT.
    pub fn wkt_name(self) -> &'static str {
        match self {
            AxisDirection::North => "north",
            AxisDirection::South => "south",
            AxisDirection::East => "east",
            AxisDirection::West => "west",
            AxisDirection::Up => "up",
            AxisDirection::Down => "down",
        }
    }
}

impl fmt::Display for AxisDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wkt_name())
    }
}

/// One axis of a coordinate system.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    name: String,
    abbreviation: String,
    direction: AxisDirection,
    unit: Unit,
}

impl Axis {
    pub fn new(
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        direction: AxisDirection,
        unit: Unit,
    ) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
            direction,
            unit,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    pub fn direction(&self) -> AxisDirection {
        self.direction
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }
}

/// Kind of coordinate system, which fixes its dimension and the unit kinds of its axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsKind {
    Ellipsoidal,
    Spherical,
    Cartesian,
}

impl CsKind {
    /// Keyword used in WKT `CS[...]`.
    pub fn wkt_name(self) -> &'static str {
        match self {
            CsKind::Ellipsoidal => "ellipsoidal",
            CsKind::Spherical => "spherical",
            CsKind::Cartesian => "Cartesian",
        }
    }
}

/// An ordered set of axes of a given [`CsKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSystem {
    metadata: Metadata,
    kind: CsKind,
    axes: Vec<Axis>,
}

impl CoordinateSystem {
    /// Two angular axes: latitude then longitude.
    pub fn ellipsoidal(name: impl Into<String>, latitude: Axis, longitude: Axis) -> FactoryResult<Self> {
        Self::build(name.into(), CsKind::Ellipsoidal, vec![latitude, longitude], |_| {
            UnitKind::Angle
        })
    }

    /// Two angular axes followed by a radius.
    pub fn spherical(
        name: impl Into<String>,
        latitude: Axis,
        longitude: Axis,
        radius: Axis,
    ) -> FactoryResult<Self> {
        Self::build(
            name.into(),
            CsKind::Spherical,
            vec![latitude, longitude, radius],
            |i| if i < 2 { UnitKind::Angle } else { UnitKind::Length },
        )
    }

    /// Two linear axes in the plane.
    pub fn cartesian(name: impl Into<String>, first: Axis, second: Axis) -> FactoryResult<Self> {
        Self::build(name.into(), CsKind::Cartesian, vec![first, second], |_| {
            UnitKind::Length
        })
    }

    fn build(
        name: String,
        kind: CsKind,
        axes: Vec<Axis>,
        expected_unit: impl Fn(usize) -> UnitKind,
    ) -> FactoryResult<Self> {
        for (i, axis) in axes.iter().enumerate() {
            if expected_unit(i) != axis.unit().kind() {
                return Err(FactoryError::incompatible(
                    &name,
                    format!(
                        "axis '{}' of a {} coordinate system cannot use unit {}",
                        axis.name(),
                        kind.wkt_name(),
                        axis.unit().name()
                    ),
                ));
            }
            if let Some(other) = axes[..i]
                .iter()
                .find(|other| other.direction().is_colinear(axis.direction()))
            {
                return Err(FactoryError::incompatible(
                    &name,
                    format!(
                        "axes '{}' and '{}' are colinear",
                        other.name(),
                        axis.name()
                    ),
                ));
            }
        }
        Ok(Self {
            metadata: Metadata::named(name),
            kind,
            axes,
        })
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn kind(&self) -> CsKind {
        self.kind
    }

    pub fn dimension(&self) -> usize {
        self.axes.len()
    }

    pub fn axis(&self, index: usize) -> Option<&Axis> {
        self.axes.get(index)
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }
}
