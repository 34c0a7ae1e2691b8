// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field-number and base-tag metadata.
//!
//! Entries are keyed by `(namespace, type name[, member name])`, where the
//! namespace is the type's contract namespace or, without one, its
//! declaring namespace.
//! Discovery runs write them; replay runs read them back so recompiled
//! models keep the exact same wire numbers.

mod persistence;
mod shared;
mod staged;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use persistence::FilePersistence;
pub use shared::SharedTypeMetaData;
pub(crate) use staged::StagedWrites;

/// Storage seam for numbering metadata.
///
/// Persistence format and location are the implementor's concern.
pub trait MetadataStore {
    /// Stored number for a member, if any.
    fn field_number(&self, namespace: &str, type_name: &str, field: &str) -> Option<u32>;

    /// Record a member's number, replacing any previous value.
    fn store_field_number(&mut self, namespace: &str, type_name: &str, field: &str, number: u32);

    /// Highest member number stored for a type.
    fn max_field_number(&self, namespace: &str, type_name: &str) -> Option<u32>;

    /// Stored subtype base tag for a type, if any.
    fn base_number(&self, namespace: &str, type_name: &str) -> Option<u32>;

    /// Record a type's subtype base tag.
    fn store_base_number(&mut self, namespace: &str, type_name: &str, number: u32);
}

impl<S: MetadataStore + ?Sized> MetadataStore for &mut S {
    fn field_number(&self, namespace: &str, type_name: &str, field: &str) -> Option<u32> {
        (**self).field_number(namespace, type_name, field)
    }

    fn store_field_number(&mut self, namespace: &str, type_name: &str, field: &str, number: u32) {
        (**self).store_field_number(namespace, type_name, field, number);
    }

    fn max_field_number(&self, namespace: &str, type_name: &str) -> Option<u32> {
        (**self).max_field_number(namespace, type_name)
    }

    fn base_number(&self, namespace: &str, type_name: &str) -> Option<u32> {
        (**self).base_number(namespace, type_name)
    }

    fn store_base_number(&mut self, namespace: &str, type_name: &str, number: u32) {
        (**self).store_base_number(namespace, type_name, number);
    }
}

/// Numbers recorded for one type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    #[serde(default)]
    pub fields: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_number: Option<u32>,
}

impl TypeEntry {
    pub fn max_field_number(&self) -> Option<u32> {
        self.fields.values().copied().max()
    }
}

/// In-memory metadata store, ordered for deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMetaData {
    #[serde(default)]
    namespaces: BTreeMap<String, BTreeMap<String, TypeEntry>>,
}

impl TypeMetaData {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for a type, if anything was recorded for it.
    pub fn entry(&self, namespace: &str, type_name: &str) -> Option<&TypeEntry> {
        self.namespaces.get(namespace)?.get(type_name)
    }

    fn entry_mut(&mut self, namespace: &str, type_name: &str) -> &mut TypeEntry {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .entry(type_name.to_string())
            .or_default()
    }

    /// Iterate `(namespace, type name, entry)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &TypeEntry)> {
        self.namespaces.iter().flat_map(|(ns, types)| {
            types
                .iter()
                .map(move |(name, entry)| (ns.as_str(), name.as_str(), entry))
        })
    }

    /// Number of types with recorded metadata.
    pub fn type_count(&self) -> usize {
        self.namespaces.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.type_count() == 0
    }

    pub(crate) fn insert_entry(&mut self, namespace: &str, type_name: &str, entry: TypeEntry) {
        *self.entry_mut(namespace, type_name) = entry;
    }
}

impl MetadataStore for TypeMetaData {
    fn field_number(&self, namespace: &str, type_name: &str, field: &str) -> Option<u32> {
        self.entry(namespace, type_name)?.fields.get(field).copied()
    }

    fn store_field_number(&mut self, namespace: &str, type_name: &str, field: &str, number: u32) {
        self.entry_mut(namespace, type_name)
            .fields
            .insert(field.to_string(), number);
    }

    fn max_field_number(&self, namespace: &str, type_name: &str) -> Option<u32> {
        self.entry(namespace, type_name)?.max_field_number()
    }

    fn base_number(&self, namespace: &str, type_name: &str) -> Option<u32> {
        self.entry(namespace, type_name)?.base_number
    }

    fn store_base_number(&mut self, namespace: &str, type_name: &str, number: u32) {
        self.entry_mut(namespace, type_name).base_number = Some(number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_numbers_round_trip_through_store() {
        let mut store = TypeMetaData::new();
        store.store_field_number("urn:zoo", "Animal", "name", 1);
        store.store_field_number("urn:zoo", "Animal", "age", 2);

        assert_eq!(store.field_number("urn:zoo", "Animal", "age"), Some(2));
        assert_eq!(store.field_number("urn:zoo", "Animal", "weight"), None);
        assert_eq!(store.field_number("", "Animal", "age"), None);
        assert_eq!(store.max_field_number("urn:zoo", "Animal"), Some(2));
        assert_eq!(store.max_field_number("urn:zoo", "Dog"), None);
    }

    #[test]
    fn base_numbers_are_independent_of_fields() {
        let mut store = TypeMetaData::new();
        store.store_base_number("", "Dog", 18352);
        assert_eq!(store.base_number("", "Dog"), Some(18352));
        assert_eq!(store.max_field_number("", "Dog"), None);
        assert_eq!(store.type_count(), 1);
    }

    #[test]
    fn borrowed_store_writes_through() {
        let mut store = TypeMetaData::new();
        {
            let mut borrowed = &mut store;
            borrowed.store_field_number("", "Cat", "indoor", 3);
        }
        assert_eq!(store.field_number("", "Cat", "indoor"), Some(3));
    }

    #[test]
    fn iteration_is_key_ordered() {
        let mut store = TypeMetaData::new();
        store.store_field_number("b", "Zed", "x", 1);
        store.store_field_number("a", "Yak", "x", 1);
        store.store_field_number("a", "Ant", "x", 1);
        let keys: Vec<_> = store.iter().map(|(ns, name, _)| (ns, name)).collect();
        assert_eq!(keys, vec![("a", "Ant"), ("a", "Yak"), ("b", "Zed")]);
    }
}
