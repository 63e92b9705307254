//! Units of measure used by the planetary definitions.

/// Physical quantity measured by a [`Unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Length,
    Angle,
    Scale,
}

/// The handful of units the tables need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Metre,
    Degree,
    Unity,
}

impl Unit {
    /// Name as written in WKT.
    pub fn name(self) -> &'static str {
        match self {
            Unit::Metre => "metre",
            Unit::Degree => "degree",
            Unit::Unity => "unity",
        }
    }

    /// Conversion factor to the SI unit of the same kind (metre, radian, unity).
    pub fn to_si(self) -> f64 {
        match self {
            Unit::Metre | Unit::Unity => 1.0,
            Unit::Degree => std::f64::consts::PI / 180.0,
        }
    }

    pub fn kind(self) -> UnitKind {
        match self {
            Unit::Metre => UnitKind::Length,
            Unit::Degree => UnitKind::Angle,
            Unit::Unity => UnitKind::Scale,
        }
    }
}
