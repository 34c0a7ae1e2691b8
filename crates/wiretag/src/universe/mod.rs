// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Injected type universe: registration model and registry.

mod model;
mod registry;

pub use model::{
    ContractMarker, MemberDef, MemberInfo, MemberKind, TypeDef, TypeInfo, TypeKind, TypeName,
};
pub use registry::{TypeRegistry, FRAMEWORK_MODULE};
