//! The output document: every geodetic CRS, then every projected CRS, each followed by a blank
//! line, in table insertion order.
//!
//! The document is written to a temporary file next to the destination and renamed into place
//! once complete, so a failed run never leaves a partial document behind.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::PipelineResult;
use crate::ingestion::KeyedTable;
use crate::referencing::{GeodeticCrs, ProjectedCrs};
use crate::wkt::{ToWkt, WktFormatter};

/// Write the WKT of every object to `out`. Returns the number of objects written.
pub fn render_document<W: Write>(
    out: &mut W,
    geodetic: &KeyedTable<GeodeticCrs>,
    projected: &KeyedTable<ProjectedCrs>,
    formatter: &WktFormatter,
) -> PipelineResult<usize> {
    let mut written = 0;
    for crs in geodetic.values() {
        write_object(out, crs, formatter)?;
        written += 1;
    }
    for crs in projected.values() {
        write_object(out, crs, formatter)?;
        written += 1;
    }
    Ok(written)
}

fn write_object<W: Write, T: ToWkt>(out: &mut W, object: &T, formatter: &WktFormatter) -> PipelineResult<()> {
    out.write_all(object.to_wkt(formatter).as_bytes())?;
    out.write_all(b"\n\n")?;
    Ok(())
}

/// Render the document into `path`, replacing any existing file.
pub fn write_document(
    path: impl AsRef<Path>,
    geodetic: &KeyedTable<GeodeticCrs>,
    projected: &KeyedTable<ProjectedCrs>,
    formatter: &WktFormatter,
) -> PipelineResult<usize> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let tmp = NamedTempFile::new_in(dir)?;
    let mut out = BufWriter::new(tmp);
    let written = render_document(&mut out, geodetic, projected, formatter)?;
    let tmp = out.into_inner().map_err(|e| e.into_error())?;
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), objects = written, "wrote WKT document");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ingestion::{CoordinateSystemRegistry, Orientation};
    use crate::referencing::{CsKind, Ellipsoid, GeodeticDatum, PrimeMeridian, Unit};
    use crate::types::{IdentityKey, Metadata};
    use crate::wkt::WktOptions;

    fn geodetic_table() -> KeyedTable<GeodeticCrs> {
        let registry = CoordinateSystemRegistry::new().unwrap();
        let ellipsoid = Ellipsoid::from_axes(Metadata::named("Ceres"), 487300.0, 446000.0, Unit::Metre).unwrap();
        let pm = PrimeMeridian::new(Metadata::named("Reference Meridian"), 0.0, Unit::Degree).unwrap();
        let datum = Arc::new(GeodeticDatum::new(Metadata::named("D_Ceres"), Arc::new(ellipsoid), pm).unwrap());

        let mut table = KeyedTable::new();
        for (code, name) in [("200000100", "Ceres"), ("200000101", "Ceres west")] {
            let key = IdentityKey::new("IAU", "2015", code);
            let crs = GeodeticCrs::geographic(
                Metadata::identified(key.clone(), name),
                Arc::clone(&datum),
                registry.get(CsKind::Ellipsoidal, Orientation::East),
            )
            .unwrap();
            table.insert(key, crs);
        }
        table
    }

    #[test]
    fn objects_are_separated_by_blank_lines() {
        let formatter = WktFormatter::new(WktOptions { indent: 2, multiline: false });
        let mut out = Vec::new();
        let n = render_document(&mut out, &geodetic_table(), &KeyedTable::new(), &formatter).unwrap();
        assert_eq!(n, 2);

        let text = String::from_utf8(out).unwrap();
        let objects: Vec<_> = text.split("\n\n").filter(|s| !s.is_empty()).collect();
        assert_eq!(objects.len(), 2);
        assert!(objects[0].starts_with("GEOGCRS[\"Ceres\""));
        assert!(objects[1].starts_with("GEOGCRS[\"Ceres west\""));
        assert!(text.ends_with("]\n\n"));
    }

    #[test]
    fn write_document_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wkt.txt");
        fs::write(&path, "stale").unwrap();

        let n = write_document(&path, &geodetic_table(), &KeyedTable::new(), &WktFormatter::default()).unwrap();
        assert_eq!(n, 2);
        let text = fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        assert!(text.contains("ID[\"IAU\", 200000100, 2015]"));
    }

    #[test]
    fn empty_tables_give_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("wkt.txt");
        let n = write_document(&path, &KeyedTable::new(), &KeyedTable::new(), &WktFormatter::default()).unwrap();
        assert_eq!(n, 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
