// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Internally synchronized metadata store.
//!
//! One `SharedTypeMetaData` can back several model builders running on
//! different threads: `&SharedTypeMetaData` is itself a [`MetadataStore`],
//! and every read/insert goes through a sharded `DashMap`, so discovery
//! writes never race.

use dashmap::DashMap;

use super::{MetadataStore, TypeEntry, TypeMetaData};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TypeKey {
    namespace: String,
    type_name: String,
}

impl TypeKey {
    fn new(namespace: &str, type_name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            type_name: type_name.to_string(),
        }
    }
}

/// Concurrent metadata store.
#[derive(Debug, Default)]
pub struct SharedTypeMetaData {
    entries: DashMap<TypeKey, TypeEntry>,
}

impl SharedTypeMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the current contents into an ordered [`TypeMetaData`].
    pub fn snapshot(&self) -> TypeMetaData {
        let mut out = TypeMetaData::new();
        for item in &self.entries {
            out.insert_entry(&item.key().namespace, &item.key().type_name, item.value().clone());
        }
        out
    }

    pub fn type_count(&self) -> usize {
        self.entries.len()
    }
}

impl From<TypeMetaData> for SharedTypeMetaData {
    fn from(data: TypeMetaData) -> Self {
        let entries = DashMap::new();
        for (namespace, type_name, entry) in data.iter() {
            entries.insert(TypeKey::new(namespace, type_name), entry.clone());
        }
        Self { entries }
    }
}

impl SharedTypeMetaData {
    fn read<T>(
        &self,
        namespace: &str,
        type_name: &str,
        f: impl FnOnce(&TypeEntry) -> Option<T>,
    ) -> Option<T> {
        self.entries
            .get(&TypeKey::new(namespace, type_name))
            .and_then(|entry| f(entry.value()))
    }

    fn write(&self, namespace: &str, type_name: &str, f: impl FnOnce(&mut TypeEntry)) {
        let mut entry = self
            .entries
            .entry(TypeKey::new(namespace, type_name))
            .or_default();
        f(entry.value_mut());
    }
}

impl MetadataStore for &SharedTypeMetaData {
    fn field_number(&self, namespace: &str, type_name: &str, field: &str) -> Option<u32> {
        self.read(namespace, type_name, |entry| entry.fields.get(field).copied())
    }

    fn store_field_number(&mut self, namespace: &str, type_name: &str, field: &str, number: u32) {
        self.write(namespace, type_name, |entry| {
            entry.fields.insert(field.to_string(), number);
        });
    }

    fn max_field_number(&self, namespace: &str, type_name: &str) -> Option<u32> {
        self.read(namespace, type_name, TypeEntry::max_field_number)
    }

    fn base_number(&self, namespace: &str, type_name: &str) -> Option<u32> {
        self.read(namespace, type_name, |entry| entry.base_number)
    }

    fn store_base_number(&mut self, namespace: &str, type_name: &str, number: u32) {
        self.write(namespace, type_name, |entry| entry.base_number = Some(number));
    }
}

impl MetadataStore for SharedTypeMetaData {
    fn field_number(&self, namespace: &str, type_name: &str, field: &str) -> Option<u32> {
        self.read(namespace, type_name, |entry| entry.fields.get(field).copied())
    }

    fn store_field_number(&mut self, namespace: &str, type_name: &str, field: &str, number: u32) {
        self.write(namespace, type_name, |entry| {
            entry.fields.insert(field.to_string(), number);
        });
    }

    fn max_field_number(&self, namespace: &str, type_name: &str) -> Option<u32> {
        self.read(namespace, type_name, TypeEntry::max_field_number)
    }

    fn base_number(&self, namespace: &str, type_name: &str) -> Option<u32> {
        self.read(namespace, type_name, |entry| entry.base_number)
    }

    fn store_base_number(&mut self, namespace: &str, type_name: &str, number: u32) {
        self.write(namespace, type_name, |entry| entry.base_number = Some(number));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn concurrent_writers_land_in_one_store() {
        let shared = SharedTypeMetaData::new();
        thread::scope(|scope| {
            for worker in 0..4u32 {
                let shared = &shared;
                scope.spawn(move || {
                    let mut store = shared;
                    for field in 0..16u32 {
                        store.store_field_number(
                            "",
                            &format!("Type{worker}"),
                            &format!("f{field}"),
                            field + 1,
                        );
                    }
                });
            }
        });

        assert_eq!(shared.type_count(), 4);
        let reader = &shared;
        assert_eq!(reader.max_field_number("", "Type2"), Some(16));
    }

    #[test]
    fn snapshot_matches_source() {
        let mut data = TypeMetaData::new();
        data.store_field_number("urn:zoo", "Animal", "name", 1);
        data.store_base_number("urn:zoo", "Dog", 18352);

        let shared = SharedTypeMetaData::from(data.clone());
        assert_eq!(shared.snapshot(), data);
    }
}
