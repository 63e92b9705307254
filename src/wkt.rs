//! WKT 2 rendering of geodetic and projected CRSs.
//!
//! Objects are first converted into a small element tree, then printed. In multi-line mode
//! every "block" element (datum, ellipsoid, prime meridian, CS, axis, conversion...) starts on
//! its own line, indented by its depth; leaf elements (units, `ORDER`, `ID`) stay on the line of
//! their parent.

use serde::{Deserialize, Serialize};

use crate::referencing::{
    Axis, Conversion, CoordinateSystem, GeodeticCrs, GeodeticDatum, GeodeticKind, ProjectedCrs,
    Unit, UnitKind,
};
use crate::types::{IdentityKey, Metadata};

/// Layout options for [`WktFormatter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WktOptions {
    /// Spaces per nesting level in multi-line mode.
    pub indent: usize,
    /// If `false`, each object is written on a single line.
    pub multiline: bool,
}

impl Default for WktOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            multiline: true,
        }
    }
}

/// Objects that have a WKT representation.
pub trait ToWkt {
    fn to_wkt(&self, formatter: &WktFormatter) -> String;
}

impl ToWkt for GeodeticCrs {
    fn to_wkt(&self, formatter: &WktFormatter) -> String {
        formatter.format_geodetic(self)
    }
}

impl ToWkt for ProjectedCrs {
    fn to_wkt(&self, formatter: &WktFormatter) -> String {
        formatter.format_projected(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WktFormatter {
    options: WktOptions,
}

impl WktFormatter {
    pub fn new(options: WktOptions) -> Self {
        Self { options }
    }

    pub fn format_geodetic(&self, crs: &GeodeticCrs) -> String {
        let keyword = match crs.kind() {
            GeodeticKind::Geographic => "GEOGCRS",
            GeodeticKind::Geocentric => "GEODCRS",
        };
        let mut root = Element::block(keyword).text(crs.name());
        push_datum(&mut root, crs.datum());
        push_coordinate_system(&mut root, crs.coordinate_system());
        push_id(&mut root, crs.metadata());
        self.render(&root)
    }

    pub fn format_projected(&self, crs: &ProjectedCrs) -> String {
        let base = crs.base();
        let mut base_element = Element::block("BASEGEOGCRS").text(base.name());
        push_datum(&mut base_element, base.datum());
        if let Some(unit) = common_unit(base.coordinate_system()) {
            base_element.children.push(unit_element(unit));
        }
        push_id(&mut base_element, base.metadata());

        let mut root = Element::block("PROJCRS").text(crs.name());
        root.children.push(base_element);
        root.children.push(conversion_element(crs.conversion()));
        push_coordinate_system(&mut root, crs.coordinate_system());
        push_id(&mut root, crs.metadata());
        self.render(&root)
    }

    fn render(&self, root: &Element) -> String {
        let mut out = String::new();
        self.write_element(root, 0, &mut out);
        out
    }

    fn write_element(&self, e: &Element, depth: usize, out: &mut String) {
        out.push_str(e.keyword);
        out.push('[');
        let mut first = true;
        for value in &e.values {
            if !first {
                out.push_str(", ");
            }
            first = false;
            value.write(out);
        }
        for child in &e.children {
            if !first {
                out.push(',');
                if self.options.multiline && child.block {
                    out.push('\n');
                    out.extend(std::iter::repeat_n(' ', (depth + 1) * self.options.indent));
                } else {
                    out.push(' ');
                }
            }
            first = false;
            self.write_element(child, depth + 1, out);
        }
        out.push(']');
    }
}

#[derive(Debug, Clone)]
enum WktValue {
    Text(String),
    Number(f64),
    /// Unquoted token such as an axis direction or an integer code.
    Bare(String),
}

impl WktValue {
    fn write(&self, out: &mut String) {
        match self {
            WktValue::Text(s) => {
                out.push('"');
                out.push_str(&s.replace('"', "\"\""));
                out.push('"');
            }
            WktValue::Number(v) => out.push_str(&format_number(*v)),
            WktValue::Bare(s) => out.push_str(s),
        }
    }
}

#[derive(Debug, Clone)]
struct Element {
    keyword: &'static str,
    values: Vec<WktValue>,
    children: Vec<Element>,
    block: bool,
}

impl Element {
    fn block(keyword: &'static str) -> Self {
        Self {
            keyword,
            values: Vec::new(),
            children: Vec::new(),
            block: true,
        }
    }

    fn leaf(keyword: &'static str) -> Self {
        Self {
            block: false,
            ..Self::block(keyword)
        }
    }

    fn text(mut self, s: &str) -> Self {
        self.values.push(WktValue::Text(s.to_owned()));
        self
    }

    fn number(mut self, v: f64) -> Self {
        self.values.push(WktValue::Number(v));
        self
    }

    fn bare(mut self, s: impl Into<String>) -> Self {
        self.values.push(WktValue::Bare(s.into()));
        self
    }

    fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }
}

/// Shortest representation that parses back to the same value; `-0` prints as `0`.
fn format_number(v: f64) -> String {
    if v == 0.0 { "0".to_owned() } else { format!("{v}") }
}

fn unit_element(unit: Unit) -> Element {
    let keyword = match unit.kind() {
        UnitKind::Length => "LENGTHUNIT",
        UnitKind::Angle => "ANGLEUNIT",
        UnitKind::Scale => "SCALEUNIT",
    };
    Element::leaf(keyword).text(unit.name()).number(unit.to_si())
}

fn push_datum(parent: &mut Element, datum: &GeodeticDatum) {
    let ellipsoid = datum.ellipsoid();
    let ellipsoid_element = Element::block("ELLIPSOID")
        .text(ellipsoid.name())
        .number(ellipsoid.semi_major_axis())
        .number(ellipsoid.inverse_flattening())
        .child(unit_element(ellipsoid.unit()));
    let mut datum_element = Element::block("DATUM").text(datum.name()).child(ellipsoid_element);
    push_id(&mut datum_element, datum.metadata());
    parent.children.push(datum_element);

    let pm = datum.prime_meridian();
    parent.children.push(
        Element::block("PRIMEM")
            .text(pm.name())
            .number(pm.longitude())
            .child(unit_element(pm.unit())),
    );
}

fn common_unit(cs: &CoordinateSystem) -> Option<Unit> {
    let first = cs.axis(0)?.unit();
    cs.axes().iter().all(|a| a.unit() == first).then_some(first)
}

fn push_coordinate_system(parent: &mut Element, cs: &CoordinateSystem) {
    parent.children.push(
        Element::block("CS")
            .bare(cs.kind().wkt_name())
            .number(cs.dimension() as f64),
    );
    let shared = common_unit(cs);
    for (i, axis) in cs.axes().iter().enumerate() {
        let mut element = Element::block("AXIS")
            .text(&axis_label(axis))
            .bare(axis.direction().wkt_name())
            .child(Element::leaf("ORDER").number((i + 1) as f64));
        if shared.is_none() {
            element.children.push(unit_element(axis.unit()));
        }
        parent.children.push(element);
    }
    if let Some(unit) = shared {
        let mut element = unit_element(unit);
        element.block = true;
        parent.children.push(element);
    }
}

fn axis_label(axis: &Axis) -> String {
    if axis.abbreviation().is_empty() {
        axis.name().to_owned()
    } else {
        format!("{} ({})", axis.name(), axis.abbreviation())
    }
}

fn conversion_element(conversion: &Conversion) -> Element {
    let mut element = Element::block("CONVERSION")
        .text(conversion.name())
        .child(Element::block("METHOD").text(conversion.method().name));
    for value in conversion.parameters().iter() {
        element.children.push(
            Element::block("PARAMETER")
                .text(value.name())
                .number(value.value)
                .child(unit_element(value.unit())),
        );
    }
    element
}

fn push_id(parent: &mut Element, metadata: &Metadata) {
    if let Some(key) = &metadata.identifier {
        parent.children.push(id_element(key));
    }
}

fn id_element(key: &IdentityKey) -> Element {
    let mut element = Element::leaf("ID").text(&key.authority);
    element = if is_integer(&key.code) {
        element.bare(key.code.as_str())
    } else {
        element.text(&key.code)
    };
    if !key.version.is_empty() {
        element = if key.version.parse::<f64>().is_ok_and(f64::is_finite) {
            element.bare(key.version.as_str())
        } else {
            element.text(&key.version)
        };
    }
    element
}

fn is_integer(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
