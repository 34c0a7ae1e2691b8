// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Eligibility gate for schema types.
//!
//! Two levels:
//! - **candidate**: a user type that could take part in a schema (not a
//!   framework root, not reserved, not an array, not excluded);
//! - **eligible**: a candidate that also carries the contract marker.
//!
//! A reachable candidate that is not eligible is a configuration error,
//! reported by the model builder.

use crate::universe::{TypeInfo, TypeKind};

/// Default namespace prefix reserved for built-in types.
pub const DEFAULT_RESERVED_NAMESPACE: &str = "System";

/// Stateless type predicate.
#[derive(Clone, Debug)]
pub struct TypePredicate {
    reserved_namespace_prefixes: Vec<String>,
}

impl TypePredicate {
    pub fn new(reserved_namespace_prefixes: Vec<String>) -> Self {
        Self {
            reserved_namespace_prefixes,
        }
    }

    /// Every eligibility condition except the contract marker.
    pub fn is_candidate(&self, ty: Option<&TypeInfo>) -> bool {
        let Some(ty) = ty else {
            return false;
        };

        !ty.kind().is_framework_root()
            && ty.kind() != TypeKind::Array
            && !ty.namespace().is_empty()
            && !self.is_reserved(ty.namespace())
            && !ty.is_excluded()
    }

    /// Candidate carrying the contract marker.
    pub fn is_eligible(&self, ty: Option<&TypeInfo>) -> bool {
        self.is_candidate(ty) && ty.is_some_and(TypeInfo::has_contract)
    }

    /// Candidate lacking the contract marker.
    pub fn violates_contract(&self, ty: Option<&TypeInfo>) -> bool {
        self.is_candidate(ty) && !ty.is_some_and(TypeInfo::has_contract)
    }

    fn is_reserved(&self, namespace: &str) -> bool {
        self.reserved_namespace_prefixes
            .iter()
            .any(|prefix| namespace.starts_with(prefix.as_str()))
    }
}

impl Default for TypePredicate {
    fn default() -> Self {
        Self::new(vec![DEFAULT_RESERVED_NAMESPACE.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::{TypeDef, TypeRegistry};

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::with_builtins();
        registry
            .register(TypeDef::class("Zoo", "Animal").contract())
            .register(TypeDef::class("Zoo", "Plain"))
            .register(TypeDef::class("Zoo", "Hidden").contract().excluded())
            .register(TypeDef::array("Zoo", "Animal[]").contract())
            .register(TypeDef::class("", "Global").contract())
            .register(TypeDef::class("SystemTools", "Probe").contract())
            .register(TypeDef::enumeration("Zoo", "Diet").contract());
        registry
    }

    #[test]
    fn contract_marked_user_type_is_eligible() {
        let registry = registry();
        let predicate = TypePredicate::default();
        assert!(predicate.is_eligible(registry.get("Zoo.Animal")));
        assert!(predicate.is_eligible(registry.get("Zoo.Diet")));
    }

    #[test]
    fn builtins_and_unknowns_are_rejected() {
        let registry = registry();
        let predicate = TypePredicate::default();
        for name in ["System.Object", "System.ValueType", "System.Enum", "System.String"] {
            assert!(!predicate.is_candidate(registry.get(name)), "{name}");
        }
        assert!(!predicate.is_candidate(registry.get("Zoo.Unregistered")));
        assert!(!predicate.is_candidate(None));
    }

    #[test]
    fn structural_exclusions() {
        let registry = registry();
        let predicate = TypePredicate::default();
        assert!(!predicate.is_candidate(registry.get("Zoo.Hidden")));
        assert!(!predicate.is_candidate(registry.get("Zoo.Animal[]")));
        assert!(!predicate.is_candidate(registry.get("Global")));
        // prefix match, as with the framework namespace itself
        assert!(!predicate.is_candidate(registry.get("SystemTools.Probe")));
    }

    #[test]
    fn unmarked_candidate_is_a_violation() {
        let registry = registry();
        let predicate = TypePredicate::default();
        assert!(predicate.is_candidate(registry.get("Zoo.Plain")));
        assert!(!predicate.is_eligible(registry.get("Zoo.Plain")));
        assert!(predicate.violates_contract(registry.get("Zoo.Plain")));
        assert!(!predicate.violates_contract(registry.get("Zoo.Animal")));
    }

    #[test]
    fn reserved_prefixes_are_configurable() {
        let registry = registry();
        let predicate = TypePredicate::new(vec!["Zoo".to_string()]);
        assert!(!predicate.is_candidate(registry.get("Zoo.Animal")));
        assert!(predicate.is_candidate(registry.get("SystemTools.Probe")));
    }
}
