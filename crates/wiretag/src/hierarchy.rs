// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Lazy ancestor walk.

use crate::predicate::TypePredicate;
use crate::universe::{TypeInfo, TypeRegistry};

/// Iterator over a type's candidate ancestors, nearest first.
///
/// Stops at the first ancestor that is not a schema candidate, which is the
/// boundary between user types and framework types. Unmarked user ancestors
/// are still yielded so the builder can report them.
pub struct Ancestors<'r> {
    registry: &'r TypeRegistry,
    predicate: &'r TypePredicate,
    current: Option<&'r TypeInfo>,
    /// Guards against malformed registries with base cycles.
    depth: usize,
}

impl<'r> Ancestors<'r> {
    pub fn new(registry: &'r TypeRegistry, predicate: &'r TypePredicate, full_name: &str) -> Self {
        Self {
            registry,
            predicate,
            current: registry.get(full_name),
            depth: 0,
        }
    }
}

impl<'r> Iterator for Ancestors<'r> {
    type Item = &'r TypeInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        let parent = current.base().and_then(|base| self.registry.get(base));

        if !self.predicate.is_candidate(parent) || self.depth > self.registry.len() {
            self.current = None;
            return None;
        }

        self.depth += 1;
        self.current = parent;
        parent
    }
}

/// Convenience wrapper around [`Ancestors::new`].
pub fn ancestors_of<'r>(
    registry: &'r TypeRegistry,
    predicate: &'r TypePredicate,
    full_name: &str,
) -> Ancestors<'r> {
    Ancestors::new(registry, predicate, full_name)
}

/// Topmost candidate ancestor, or the type itself when it has none.
pub fn rootmost<'r>(
    registry: &'r TypeRegistry,
    predicate: &'r TypePredicate,
    ty: &'r TypeInfo,
) -> &'r TypeInfo {
    ancestors_of(registry, predicate, ty.full_name())
        .last()
        .unwrap_or(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::TypeDef;

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::with_builtins();
        registry
            .register(TypeDef::class("Zoo", "Animal").contract().extends("System.Object"))
            .register(TypeDef::class("Zoo", "Dog").contract().extends("Zoo.Animal"))
            .register(TypeDef::class("Zoo", "Puppy").contract().extends("Zoo.Dog"))
            .register(TypeDef::class("Zoo", "Loop").contract().extends("Zoo.Loop"));
        registry
    }

    fn names<'a>(iter: impl Iterator<Item = &'a TypeInfo>) -> Vec<&'a str> {
        iter.map(TypeInfo::full_name).collect()
    }

    #[test]
    fn nearest_ancestor_first() {
        let registry = registry();
        let predicate = TypePredicate::default();
        assert_eq!(
            names(ancestors_of(&registry, &predicate, "Zoo.Puppy")),
            vec!["Zoo.Dog", "Zoo.Animal"]
        );
    }

    #[test]
    fn stops_at_framework_boundary() {
        let registry = registry();
        let predicate = TypePredicate::default();
        assert!(ancestors_of(&registry, &predicate, "Zoo.Animal").next().is_none());
        assert!(ancestors_of(&registry, &predicate, "Zoo.Unknown").next().is_none());
    }

    #[test]
    fn rootmost_is_topmost_ancestor() {
        let registry = registry();
        let predicate = TypePredicate::default();
        let puppy = registry.get("Zoo.Puppy").unwrap();
        let animal = registry.get("Zoo.Animal").unwrap();
        assert_eq!(rootmost(&registry, &predicate, puppy).full_name(), "Zoo.Animal");
        assert_eq!(rootmost(&registry, &predicate, animal).full_name(), "Zoo.Animal");
    }

    #[test]
    fn self_referencing_base_terminates() {
        let registry = registry();
        let predicate = TypePredicate::default();
        let walked = ancestors_of(&registry, &predicate, "Zoo.Loop").count();
        assert!(walked <= registry.len() + 1);
    }
}
