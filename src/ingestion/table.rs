//! Insertion-ordered, write-once entity tables.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::referencing::{Ellipsoid, GeodeticCrs, GeodeticDatum, ProjectedCrs};
use crate::types::{IdentityKey, Metadata};

/// Objects that can be stored in a [`KeyedTable`].
pub trait Entity {
    /// Identifier and name of the object.
    fn metadata(&self) -> &Metadata;

    /// Shorthand for the metadata name.
    fn name(&self) -> &str {
        &self.metadata().name
    }
}

impl Entity for Ellipsoid {
    fn metadata(&self) -> &Metadata {
        Ellipsoid::metadata(self)
    }
}

impl Entity for GeodeticDatum {
    fn metadata(&self) -> &Metadata {
        GeodeticDatum::metadata(self)
    }
}

impl Entity for GeodeticCrs {
    fn metadata(&self) -> &Metadata {
        GeodeticCrs::metadata(self)
    }
}

impl Entity for ProjectedCrs {
    fn metadata(&self) -> &Metadata {
        ProjectedCrs::metadata(self)
    }
}

/// Ordered mapping from [`IdentityKey`] to a shared entity.
///
/// A key is written at most once: inserting an existing key leaves the table untouched. There is
/// no removal. Iteration follows first-insertion order.
pub struct KeyedTable<E> {
    entries: IndexMap<IdentityKey, Arc<E>>,
}

impl<E: Entity> KeyedTable<E> {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert `entity` under `key` if the key is absent. Returns whether it was inserted.
    pub fn insert(&mut self, key: IdentityKey, entity: E) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(entity));
                true
            }
        }
    }

    /// A shared handle to the entity stored under `key`, if any.
    pub fn lookup(&self, key: &IdentityKey) -> Option<Arc<E>> {
        self.entries.get(key).cloned()
    }

    /// Whether an entity was stored under `key`.
    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Entities in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &E> {
        self.entries.values().map(|e| e.as_ref())
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &IdentityKey> {
        self.entries.keys()
    }

    /// Number of stored entities. Rejected duplicates are not counted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: Entity> Default for KeyedTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> fmt::Debug for KeyedTable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k.to_string(), v.name())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::referencing::Unit;

    fn ellipsoid(name: &str, a: f64) -> Ellipsoid {
        Ellipsoid::from_axes(Metadata::named(name), a, a, Unit::Metre).unwrap()
    }

    #[test]
    fn insert_then_lookup_returns_the_entity() {
        let mut table = KeyedTable::new();
        let key = IdentityKey::new("IAU", "2015", "30100");
        assert!(table.insert(key.clone(), ellipsoid("Moon", 1737400.0)));
        assert_eq!(table.lookup(&key).unwrap().semi_major_axis(), 1737400.0);
        assert!(table.lookup(&IdentityKey::new("IAU", "2015", "1")).is_none());
    }

    #[test]
    fn duplicate_key_keeps_first_entity() {
        let mut table = KeyedTable::new();
        let key = IdentityKey::new("IAU", "2015", "30100");
        assert!(table.insert(key.clone(), ellipsoid("first", 1.0)));
        assert!(!table.insert(key.clone(), ellipsoid("second", 2.0)));
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(&key).unwrap().name(), "first");
    }

    #[test]
    fn values_follow_insertion_order() {
        let mut table = KeyedTable::new();
        for (code, name) in [("3", "c"), ("1", "a"), ("2", "b"), ("1", "dup")] {
            table.insert(IdentityKey::new("X", "", code), ellipsoid(name, 1.0));
        }
        let names: Vec<_> = table.values().map(|e| e.name().to_owned()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        let codes: Vec<_> = table.keys().map(|k| k.code.as_str()).collect();
        assert_eq!(codes, vec!["3", "1", "2"]);
    }

    #[test]
    fn lookup_shares_instead_of_copying() {
        let mut table = KeyedTable::new();
        let key = IdentityKey::new("X", "", "1");
        table.insert(key.clone(), ellipsoid("a", 1.0));
        let first = table.lookup(&key).unwrap();
        let second = table.lookup(&key).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
