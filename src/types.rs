//! Identity types shared by the referencing model and the table stages.
//!
//! Every row of every table is identified by an [`IdentityKey`] built from its leading
//! `authority`, `version` and `code` columns. The same key is attached to the object built from
//! the row (through [`Metadata`]) and is rendered as its WKT `ID[...]` element.

use std::fmt;

use serde::Serialize;

/// Composite `(authority, version, code)` key of a table row.
///
/// Components are trimmed; a missing component is the empty string. The textual form joins the
/// three components with `:` (e.g. `IAU:2015:49900`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct IdentityKey {
    /// Authority (code space), e.g. `IAU`.
    pub authority: String,
    /// Version of the authority's catalog, e.g. `2015`.
    pub version: String,
    /// Code within the authority, e.g. `49900`.
    pub code: String,
}

impl IdentityKey {
    /// Create a key, trimming every component.
    pub fn new(
        authority: impl AsRef<str>,
        version: impl AsRef<str>,
        code: impl AsRef<str>,
    ) -> Self {
        Self {
            authority: authority.as_ref().trim().to_owned(),
            version: version.as_ref().trim().to_owned(),
            code: code.as_ref().trim().to_owned(),
        }
    }

    /// Parse the `authority:version:code` form. Returns `None` unless there are exactly three parts.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split(':');
        let key = Self::new(parts.next()?, parts.next()?, parts.next()?);
        match parts.next() {
            Some(_) => None,
            None => Some(key),
        }
    }

    /// Resolve a reference column relative to this key.
    ///
    /// A reference is either a full `authority:version:code` key or a bare code, in which case it
    /// designates an object of the same authority and version as `self`.
    pub fn resolve(&self, reference: &str) -> Self {
        let reference = reference.trim();
        Self::parse(reference).unwrap_or_else(|| Self {
            authority: self.authority.clone(),
            version: self.version.clone(),
            code: reference.to_owned(),
        })
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.authority, self.version, self.code)
    }
}

/// Name and optional identifier carried by every referencing object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Human-readable name.
    pub name: String,
    /// Identifier, present on objects built from table rows.
    pub identifier: Option<IdentityKey>,
}

impl Metadata {
    /// Metadata for an anonymous helper object (axis, coordinate system, conversion...).
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: None,
        }
    }

    /// Metadata for an object identified by a table key.
    pub fn identified(key: IdentityKey, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: Some(key),
        }
    }
}
