// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared type universes for integration tests.

#![allow(dead_code)]

use wiretag::{MemberDef, TypeDef, TypeName, TypeRegistry};

/// `|stable_hash("Zoo.Animal")| mod 23827`
pub const ANIMAL_ANCHOR: u32 = 18348;

/// Animal { name, age } with subtypes Dog { breed } and Cat { indoor }.
pub fn zoo() -> TypeRegistry {
    let mut registry = TypeRegistry::with_builtins();
    register_zoo(&mut registry);
    registry
}

pub fn register_zoo(registry: &mut TypeRegistry) {
    registry
        .register(
            TypeDef::class("Zoo", "Animal")
                .contract_namespace("urn:zoo")
                .member(MemberDef::property("name", "System.String"))
                .member(MemberDef::property("age", "System.Int32")),
        )
        .register(
            TypeDef::class("Zoo", "Dog")
                .contract_namespace("urn:zoo")
                .extends("Zoo.Animal")
                .member(MemberDef::property("breed", "System.String")),
        )
        .register(
            TypeDef::class("Zoo", "Cat")
                .contract_namespace("urn:zoo")
                .extends("Zoo.Animal")
                .member(MemberDef::property("indoor", "System.Boolean")),
        );
}

/// Zoo plus a third level: Puppy extends Dog.
pub fn zoo_with_puppy() -> TypeRegistry {
    let mut registry = zoo();
    registry.register(
        TypeDef::class("Zoo", "Puppy")
            .contract_namespace("urn:zoo")
            .extends("Zoo.Dog")
            .member(MemberDef::property("toy", "System.String")),
    );
    registry
}

/// Order { id, lines: List<OrderLine> }, OrderLine { sku }.
pub fn shop() -> TypeRegistry {
    let mut registry = TypeRegistry::with_builtins();
    register_shop(&mut registry);
    registry
}

pub fn register_shop(registry: &mut TypeRegistry) {
    registry
        .register(
            TypeDef::class("Shop", "Order")
                .contract_namespace("urn:shop")
                .member(MemberDef::property("id", "System.Int64"))
                .member(MemberDef::property(
                    "lines",
                    TypeName::generic(
                        "System.Collections.Generic.List",
                        [TypeName::new("Shop.OrderLine")],
                    ),
                )),
        )
        .register(
            TypeDef::class("Shop", "OrderLine")
                .contract_namespace("urn:shop")
                .member(MemberDef::property("sku", "System.String")),
        );
}

/// Mutually referencing A { b: B } and B { a: A }.
pub fn cyclic() -> TypeRegistry {
    let mut registry = TypeRegistry::with_builtins();
    registry
        .register(
            TypeDef::class("Graph", "A")
                .contract()
                .member(MemberDef::property("b", "Graph.B")),
        )
        .register(
            TypeDef::class("Graph", "B")
                .contract()
                .member(MemberDef::property("a", "Graph.A")),
        );
    registry
}
