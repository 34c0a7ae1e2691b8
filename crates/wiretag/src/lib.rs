// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # wiretag - stable wire numbers for contract-marked type graphs
//!
//! Derives a binary-serialization schema from a graph of statically
//! declared types without hand-numbering fields. Given a root type,
//! `wiretag` walks every type it references, every subtype of types in its
//! hierarchy and every ancestor, then assigns:
//!
//! - a **field number** to each serialized member, continuing from the
//!   highest number used by the type's ancestors;
//! - a **subtype tag** to each polymorphic subtype, derived from a stable
//!   hash of the hierarchy's rootmost ancestor plus the subtype's lexical
//!   rank.
//!
//! Numbers are recorded in a [`MetadataStore`] during *discovery* and
//! replayed verbatim later, so recompiled models stay wire compatible.
//!
//! ## Architecture
//!
//! ```text
//!   TypeRegistry (host-populated)
//!        |
//!        v
//!   ModelBuilder --- TypePredicate / Ancestors / UniverseScanner
//!        |      \
//!        |       +-- FieldNumberAllocator + SubtypeTagDeriver <-> MetadataStore
//!        v
//!   SchemaModel --> ModelCompiler (SchemaValidator by default)
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use wiretag::{MemberDef, ModelBuilder, TypeDef, TypeMetaData, TypeRegistry};
//!
//! let mut registry = TypeRegistry::with_builtins();
//! registry
//!     .register(
//!         TypeDef::class("Zoo", "Animal")
//!             .contract()
//!             .member(MemberDef::property("name", "System.String")),
//!     )
//!     .register(
//!         TypeDef::class("Zoo", "Dog")
//!             .contract()
//!             .extends("Zoo.Animal")
//!             .member(MemberDef::property("breed", "System.String")),
//!     );
//!
//! let mut store = TypeMetaData::new();
//! let info = ModelBuilder::discovery(&registry, &mut store)
//!     .configure("Zoo.Animal")?
//!     .expect("eligible root");
//!
//! assert_eq!(info.compiled.field_number("Zoo.Dog", "breed"), Some(2));
//! assert!(info.compiled.subtype_tag("Zoo.Animal", "Zoo.Dog").is_some());
//! # Ok::<(), wiretag::SchemaError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod metadata;
pub mod model;
pub mod numbering;
pub mod predicate;
pub mod scanner;
pub mod universe;

pub use builder::{ModelBuilder, ModelInfo, TypeStage};
pub use config::BuilderConfig;
pub use error::{CompileError, ConfigError, ConfigWarning, PersistenceError, SchemaError};
pub use hierarchy::{ancestors_of, Ancestors};
pub use metadata::{FilePersistence, MetadataStore, SharedTypeMetaData, TypeEntry, TypeMetaData};
pub use model::{
    CompiledField, CompiledRecord, CompiledSchema, FieldDecl, ModelCompiler, RecordDecl,
    SchemaModel, SchemaValidator, SubtypeEdge,
};
pub use numbering::NumberingMode;
pub use predicate::TypePredicate;
pub use scanner::UniverseScanner;
pub use universe::{
    ContractMarker, MemberDef, MemberInfo, MemberKind, TypeDef, TypeInfo, TypeKind, TypeName,
    TypeRegistry,
};
