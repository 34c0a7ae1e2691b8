// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host-populated type registry.
//!
//! The registry is the only view the numbering core has of the type
//! universe. Hosts fill it at startup; nothing is discovered implicitly.

use std::collections::HashMap;

use super::model::{TypeDef, TypeInfo, TypeKind};

/// Module name used for the built-in framework types.
pub const FRAMEWORK_MODULE: &str = "mscorlib";

const BUILTIN_VALUE_TYPES: &[&str] = &[
    "Boolean", "Byte", "SByte", "Int16", "UInt16", "Int32", "UInt32", "Int64", "UInt64", "Single",
    "Double", "Decimal", "Char", "DateTime", "TimeSpan", "Guid",
];

/// Catalogue of known types keyed by fully-qualified name.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeInfo>,
    /// Registration order, kept so scans are reproducible.
    order: Vec<String>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the framework roots and common primitives.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(
            TypeDef::of_kind("System", "Object", TypeKind::ObjectRoot).module(FRAMEWORK_MODULE),
        );
        registry.register(
            TypeDef::of_kind("System", "ValueType", TypeKind::ValueTypeRoot)
                .module(FRAMEWORK_MODULE)
                .extends("System.Object"),
        );
        registry.register(
            TypeDef::of_kind("System", "Enum", TypeKind::EnumRoot)
                .module(FRAMEWORK_MODULE)
                .extends("System.ValueType"),
        );
        registry.register(
            TypeDef::class("System", "String")
                .module(FRAMEWORK_MODULE)
                .extends("System.Object")
                .without_default_constructor(),
        );
        for name in BUILTIN_VALUE_TYPES {
            registry.register(
                TypeDef::value_type("System", *name)
                    .module(FRAMEWORK_MODULE)
                    .extends("System.ValueType"),
            );
        }
        registry
    }

    /// Register (or replace) a type.
    pub fn register(&mut self, def: TypeDef) -> &mut Self {
        let info = def.into_info();
        let key = info.full_name.clone();
        if self.types.insert(key.clone(), info).is_some() {
            log::warn!("[TypeRegistry] replacing previously registered type {}", key);
        } else {
            self.order.push(key);
        }
        self
    }

    /// Look up a type by fully-qualified name.
    pub fn get(&self, full_name: &str) -> Option<&TypeInfo> {
        self.types.get(full_name)
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.types.contains_key(full_name)
    }

    /// All types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeInfo> {
        self.order.iter().filter_map(|name| self.types.get(name))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// True when a value of `candidate` can be used where `base` is expected.
    ///
    /// Follows declared bases and implemented interfaces, transitively.
    /// Unknown names are only assignable to themselves.
    pub fn is_assignable(&self, candidate: &str, base: &str) -> bool {
        let mut pending = vec![candidate];
        let mut seen: Vec<&str> = Vec::new();

        while let Some(current) = pending.pop() {
            if current == base {
                return true;
            }
            if seen.contains(&current) {
                continue;
            }
            seen.push(current);

            if let Some(info) = self.types.get(current) {
                if let Some(parent) = info.base.as_deref() {
                    pending.push(parent);
                }
                pending.extend(info.interfaces.iter().map(String::as_str));
            }
        }
        false
    }
}
