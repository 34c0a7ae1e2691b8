// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Model builder: walks the universe reachable from a root type, numbers
//! every record and hands the result to a [`ModelCompiler`](crate::ModelCompiler).

mod core;
mod run;

pub use core::{ModelBuilder, ModelInfo};
pub use run::TypeStage;
