//! Coordinate systems shared by every CRS built during a run.

use std::sync::Arc;

use crate::referencing::{Axis, AxisDirection, CoordinateSystem, CsKind, FactoryResult, Unit};

/// Direction in which longitudes (or eastings) increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    East,
    West,
}

impl Orientation {
    /// Case-insensitive `east` / `west`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "east" => Some(Self::East),
            "west" => Some(Self::West),
            _ => None,
        }
    }

    /// The orientation of a longitude axis pointing in `direction`, if it is east or west.
    pub fn from_direction(direction: AxisDirection) -> Option<Self> {
        match direction {
            AxisDirection::East => Some(Self::East),
            AxisDirection::West => Some(Self::West),
            _ => None,
        }
    }

    pub fn direction(self) -> AxisDirection {
        match self {
            Self::East => AxisDirection::East,
            Self::West => AxisDirection::West,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::East => "East",
            Self::West => "West",
        }
    }
}

#[derive(Debug)]
struct Pair {
    east: Arc<CoordinateSystem>,
    west: Arc<CoordinateSystem>,
}

impl Pair {
    fn build(
        mut make: impl FnMut(Orientation) -> FactoryResult<CoordinateSystem>,
    ) -> FactoryResult<Self> {
        Ok(Self {
            east: Arc::new(make(Orientation::East)?),
            west: Arc::new(make(Orientation::West)?),
        })
    }

    fn get(&self, orientation: Orientation) -> &Arc<CoordinateSystem> {
        match orientation {
            Orientation::East => &self.east,
            Orientation::West => &self.west,
        }
    }
}

/// The six planetary coordinate systems: ellipsoidal, spherical and Cartesian, each in an
/// east- and a west-oriented variant.
///
/// Built once per run; CRSs hold shared handles to these instances.
#[derive(Debug)]
pub struct CoordinateSystemRegistry {
    ellipsoidal: Pair,
    spherical: Pair,
    cartesian: Pair,
}

impl CoordinateSystemRegistry {
    pub fn new() -> FactoryResult<Self> {
        let ellipsoidal = Pair::build(|o| {
            CoordinateSystem::ellipsoidal(
                format!("Planetary ellipsoidal CS ({} oriented)", o.label()),
                Axis::new("Planetodetic latitude", "φ", AxisDirection::North, Unit::Degree),
                Axis::new("Planetodetic longitude", "λ", o.direction(), Unit::Degree),
            )
        })?;
        let spherical = Pair::build(|o| {
            CoordinateSystem::spherical(
                format!("Planetary spherical CS ({} oriented)", o.label()),
                Axis::new("Planetocentric latitude", "Ω", AxisDirection::North, Unit::Degree),
                Axis::new("Planetocentric longitude", "θ", o.direction(), Unit::Degree),
                Axis::new("Radius", "R", AxisDirection::Up, Unit::Metre),
            )
        })?;
        let cartesian = Pair::build(|o| {
            let abscissa = match o {
                Orientation::East => Axis::new("Easting", "E", AxisDirection::East, Unit::Metre),
                Orientation::West => Axis::new("Westing", "W", AxisDirection::West, Unit::Metre),
            };
            CoordinateSystem::cartesian(
                format!("Planetary Cartesian CS ({} oriented)", o.label()),
                abscissa,
                Axis::new("Northing", "N", AxisDirection::North, Unit::Metre),
            )
        })?;
        Ok(Self {
            ellipsoidal,
            spherical,
            cartesian,
        })
    }

    /// Shared handle to the coordinate system of the given kind and orientation.
    pub fn get(&self, kind: CsKind, orientation: Orientation) -> Arc<CoordinateSystem> {
        let pair = match kind {
            CsKind::Ellipsoidal => &self.ellipsoidal,
            CsKind::Spherical => &self.spherical,
            CsKind::Cartesian => &self.cartesian,
        };
        Arc::clone(pair.get(orientation))
    }
}
