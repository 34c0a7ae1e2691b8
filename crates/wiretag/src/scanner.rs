// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Universe scanning: polymorphic children and member-referenced types.

use std::collections::{HashMap, HashSet};

use crate::hierarchy::ancestors_of;
use crate::predicate::TypePredicate;
use crate::universe::{TypeInfo, TypeName, TypeRegistry};

/// Read-only view over the registry used to discover related types.
pub struct UniverseScanner<'r> {
    registry: &'r TypeRegistry,
    predicate: &'r TypePredicate,
    excluded_module_prefixes: &'r [String],
}

impl<'r> UniverseScanner<'r> {
    pub fn new(
        registry: &'r TypeRegistry,
        predicate: &'r TypePredicate,
        excluded_module_prefixes: &'r [String],
    ) -> Self {
        Self {
            registry,
            predicate,
            excluded_module_prefixes,
        }
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    pub fn predicate(&self) -> &'r TypePredicate {
        self.predicate
    }

    /// Types living in modules outside the deny-list, in registration order.
    fn scannable(&self) -> impl Iterator<Item = &'r TypeInfo> + '_ {
        self.registry.iter().filter(|ty| {
            !self
                .excluded_module_prefixes
                .iter()
                .any(|prefix| ty.module().starts_with(prefix.as_str()))
        })
    }

    /// Candidate polymorphic children of `base`.
    ///
    /// Every scannable type assignable to `base` with a zero-argument
    /// constructor, each preceded by its own further children, followed by
    /// `base`'s ancestors. Types without a zero-argument constructor are
    /// skipped. The result is deduplicated, first occurrence wins.
    pub fn children_of(&self, base: &str) -> Vec<String> {
        let mut memo = HashMap::new();
        let mut in_progress = HashSet::new();
        let mut children = self.children_recursive(base, &mut memo, &mut in_progress);

        children.extend(
            ancestors_of(self.registry, self.predicate, base).map(|ty| ty.full_name().to_string()),
        );
        dedup_in_order(children)
    }

    fn children_recursive(
        &self,
        base: &str,
        memo: &mut HashMap<String, Vec<String>>,
        in_progress: &mut HashSet<String>,
    ) -> Vec<String> {
        if let Some(found) = memo.get(base) {
            return found.clone();
        }
        if !in_progress.insert(base.to_string()) {
            return Vec::new();
        }

        let mut found = Vec::new();
        for ty in self.scannable() {
            let name = ty.full_name();
            if name == base || !self.registry.is_assignable(name, base) {
                continue;
            }
            if !ty.is_default_constructible() {
                log::debug!(
                    "[UniverseScanner] skipping {} under {}: no zero-argument constructor",
                    name,
                    base
                );
                continue;
            }
            found.extend(self.children_recursive(name, memo, in_progress));
            found.push(name.to_string());
        }

        let found = dedup_in_order(found);
        in_progress.remove(base);
        memo.insert(base.to_string(), found.clone());
        found
    }

    /// Eligible types below `root` at any depth, sorted by fully-qualified name.
    ///
    /// This is the ranking universe for subtype tags: every subtype that can
    /// end up in the hierarchy must have a rank, so neither constructibility
    /// nor the module deny-list applies.
    pub fn ranked_descendants(&self, root: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .registry
            .iter()
            .filter(|ty| ty.full_name() != root)
            .filter(|ty| self.predicate.is_eligible(Some(*ty)))
            .filter(|ty| self.registry.is_assignable(ty.full_name(), root))
            .map(|ty| ty.full_name().to_string())
            .collect();
        names.sort();
        names
    }

    /// Types referenced by serialized members of `ty` and of its ancestors.
    ///
    /// Generic value types contribute their direct type arguments followed by
    /// the generic instantiation itself.
    pub fn referenced_types(&self, ty: &TypeInfo) -> Vec<String> {
        let owners = std::iter::once(ty).chain(ancestors_of(
            self.registry,
            self.predicate,
            ty.full_name(),
        ));

        let mut referenced = Vec::new();
        for owner in owners {
            for member in owner.serialized_members() {
                let value_type = member.value_type();
                referenced.extend(value_type.args().iter().map(|arg| self.resolve(arg)));
                referenced.push(self.resolve(value_type));
            }
        }
        dedup_in_order(referenced)
    }

    /// Registry name for `name`.
    ///
    /// A generic instantiation that is not registered under its rendered
    /// name resolves to its generic definition (`Shop.Page<Shop.Item>` to
    /// `Shop.Page`), so the definition is validated and declared like any
    /// other referenced type.
    pub fn resolve(&self, name: &TypeName) -> String {
        let qualified = name.qualified();
        if name.is_generic()
            && !self.registry.contains(&qualified)
            && self.registry.contains(name.path())
        {
            return name.path().to_string();
        }
        qualified
    }
}

fn dedup_in_order(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::{MemberDef, TypeDef};

    fn excluded() -> Vec<String> {
        vec!["System".to_string(), "mscorlib".to_string()]
    }

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::with_builtins();
        registry
            .register(
                TypeDef::class("Zoo", "Animal")
                    .contract()
                    .member(MemberDef::property("name", "System.String"))
                    .member(MemberDef::property(
                        "tags",
                        TypeName::generic("System.Collections.Generic.List", [TypeName::new("Zoo.Tag")]),
                    )),
            )
            .register(
                TypeDef::class("Zoo", "Dog")
                    .contract()
                    .extends("Zoo.Animal")
                    .member(MemberDef::property("owner", "Zoo.Keeper")),
            )
            .register(TypeDef::class("Zoo", "Puppy").contract().extends("Zoo.Dog"))
            .register(TypeDef::class("Zoo", "Cat").contract().extends("Zoo.Animal"))
            .register(
                TypeDef::class("Zoo", "Ghost")
                    .contract()
                    .extends("Zoo.Animal")
                    .without_default_constructor(),
            )
            .register(
                TypeDef::class("Zoo", "Imported")
                    .contract()
                    .extends("Zoo.Animal")
                    .module("System.Zoo.Extensions"),
            )
            .register(TypeDef::class("Zoo", "Tag").contract())
            .register(TypeDef::class("Zoo", "Keeper").contract());
        registry
    }

    #[test]
    fn children_include_all_levels_before_their_parent() {
        let registry = registry();
        let predicate = TypePredicate::default();
        let excluded = excluded();
        let scanner = UniverseScanner::new(&registry, &predicate, &excluded);

        let children = scanner.children_of("Zoo.Animal");
        assert_eq!(children, vec!["Zoo.Puppy", "Zoo.Dog", "Zoo.Cat"]);
    }

    #[test]
    fn children_skip_types_without_default_constructor() {
        let registry = registry();
        let predicate = TypePredicate::default();
        let excluded = excluded();
        let scanner = UniverseScanner::new(&registry, &predicate, &excluded);
        assert!(!scanner.children_of("Zoo.Animal").contains(&"Zoo.Ghost".to_string()));
    }

    #[test]
    fn children_respect_module_deny_list() {
        let registry = registry();
        let predicate = TypePredicate::default();
        let excluded = excluded();
        let scanner = UniverseScanner::new(&registry, &predicate, &excluded);
        assert!(!scanner.children_of("Zoo.Animal").contains(&"Zoo.Imported".to_string()));

        let open: Vec<String> = Vec::new();
        let scanner = UniverseScanner::new(&registry, &predicate, &open);
        assert!(scanner.children_of("Zoo.Animal").contains(&"Zoo.Imported".to_string()));
    }

    #[test]
    fn children_end_with_ancestors() {
        let registry = registry();
        let predicate = TypePredicate::default();
        let excluded = excluded();
        let scanner = UniverseScanner::new(&registry, &predicate, &excluded);
        assert_eq!(scanner.children_of("Zoo.Puppy"), vec!["Zoo.Dog", "Zoo.Animal"]);
    }

    #[test]
    fn ranked_descendants_cover_the_whole_hierarchy() {
        let registry = registry();
        let predicate = TypePredicate::default();
        let excluded = excluded();
        let scanner = UniverseScanner::new(&registry, &predicate, &excluded);
        assert_eq!(
            scanner.ranked_descendants("Zoo.Animal"),
            vec!["Zoo.Cat", "Zoo.Dog", "Zoo.Ghost", "Zoo.Imported", "Zoo.Puppy"]
        );
    }

    #[test]
    fn referenced_types_unwrap_generic_arguments() {
        let registry = registry();
        let predicate = TypePredicate::default();
        let excluded = excluded();
        let scanner = UniverseScanner::new(&registry, &predicate, &excluded);

        let animal = registry.get("Zoo.Animal").unwrap();
        assert_eq!(
            scanner.referenced_types(animal),
            vec![
                "System.String",
                "Zoo.Tag",
                "System.Collections.Generic.List<Zoo.Tag>",
            ]
        );
    }

    #[test]
    fn user_generic_instantiations_resolve_to_their_definition() {
        let mut registry = registry();
        registry
            .register(
                TypeDef::class("Zoo", "Pen")
                    .contract()
                    .member(MemberDef::property(
                        "herd",
                        TypeName::generic("Zoo.Herd", [TypeName::new("Zoo.Cat")]),
                    )),
            )
            .register(TypeDef::class("Zoo", "Herd").contract());
        let predicate = TypePredicate::default();
        let excluded = excluded();
        let scanner = UniverseScanner::new(&registry, &predicate, &excluded);

        let pen = registry.get("Zoo.Pen").unwrap();
        assert_eq!(scanner.referenced_types(pen), vec!["Zoo.Cat", "Zoo.Herd"]);
    }

    #[test]
    fn referenced_types_include_inherited_members() {
        let registry = registry();
        let predicate = TypePredicate::default();
        let excluded = excluded();
        let scanner = UniverseScanner::new(&registry, &predicate, &excluded);

        let dog = registry.get("Zoo.Dog").unwrap();
        let referenced = scanner.referenced_types(dog);
        assert_eq!(referenced.first().map(String::as_str), Some("Zoo.Keeper"));
        assert!(referenced.contains(&"Zoo.Tag".to_string()));
    }
}
