// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Write buffer over a borrowed store.
//!
//! Numbering writes land in a scratch [`TypeMetaData`] and reach the real
//! store only on [`commit`](StagedWrites::commit), so a run that fails after
//! numbering leaves the store as it found it.

use super::{MetadataStore, TypeMetaData};

pub(crate) struct StagedWrites<'s, S> {
    store: &'s S,
    pending: &'s mut TypeMetaData,
}

impl<'s, S: MetadataStore> StagedWrites<'s, S> {
    pub(crate) fn new(store: &'s S, pending: &'s mut TypeMetaData) -> Self {
        Self { store, pending }
    }

    /// Apply `pending` to `store`.
    pub(crate) fn commit(pending: &TypeMetaData, store: &mut S) {
        for (namespace, type_name, entry) in pending.iter() {
            for (field, number) in &entry.fields {
                store.store_field_number(namespace, type_name, field, *number);
            }
            if let Some(number) = entry.base_number {
                store.store_base_number(namespace, type_name, number);
            }
        }
    }
}

impl<S: MetadataStore> MetadataStore for StagedWrites<'_, S> {
    fn field_number(&self, namespace: &str, type_name: &str, field: &str) -> Option<u32> {
        self.pending
            .field_number(namespace, type_name, field)
            .or_else(|| self.store.field_number(namespace, type_name, field))
    }

    fn store_field_number(&mut self, namespace: &str, type_name: &str, field: &str, number: u32) {
        self.pending
            .store_field_number(namespace, type_name, field, number);
    }

    fn max_field_number(&self, namespace: &str, type_name: &str) -> Option<u32> {
        let pending = self.pending.max_field_number(namespace, type_name);
        let stored = self.store.max_field_number(namespace, type_name);
        pending.max(stored)
    }

    fn base_number(&self, namespace: &str, type_name: &str) -> Option<u32> {
        self.pending
            .base_number(namespace, type_name)
            .or_else(|| self.store.base_number(namespace, type_name))
    }

    fn store_base_number(&mut self, namespace: &str, type_name: &str, number: u32) {
        self.pending.store_base_number(namespace, type_name, number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_stay_pending_until_commit() {
        let mut store = TypeMetaData::new();
        store.store_field_number("Zoo", "Animal", "name", 1);
        let mut pending = TypeMetaData::new();

        {
            let mut staged = StagedWrites::new(&store, &mut pending);
            staged.store_field_number("Zoo", "Animal", "age", 2);
            staged.store_base_number("Zoo", "Dog", 18356);

            assert_eq!(staged.field_number("Zoo", "Animal", "name"), Some(1));
            assert_eq!(staged.field_number("Zoo", "Animal", "age"), Some(2));
            assert_eq!(staged.max_field_number("Zoo", "Animal"), Some(2));
            assert_eq!(staged.base_number("Zoo", "Dog"), Some(18356));
        }
        assert_eq!(store.field_number("Zoo", "Animal", "age"), None);

        StagedWrites::commit(&pending, &mut store);
        assert_eq!(store.field_number("Zoo", "Animal", "age"), Some(2));
        assert_eq!(store.base_number("Zoo", "Dog"), Some(18356));
    }

    #[test]
    fn stored_maximum_is_kept() {
        let mut store = TypeMetaData::new();
        store.store_field_number("Zoo", "Animal", "legacy", 9);
        let mut pending = TypeMetaData::new();

        let mut staged = StagedWrites::new(&store, &mut pending);
        staged.store_field_number("Zoo", "Animal", "name", 1);
        assert_eq!(staged.max_field_number("Zoo", "Animal"), Some(9));
    }
}
