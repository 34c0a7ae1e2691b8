// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Assembled schema model and the compiler seam that consumes it.

mod compiler;
mod schema;

pub use compiler::{CompiledField, CompiledRecord, CompiledSchema, ModelCompiler, SchemaValidator};
pub use schema::{FieldDecl, RecordDecl, SchemaModel, SubtypeEdge};
