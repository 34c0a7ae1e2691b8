// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire number assignment: member field numbers and subtype base tags.

mod fields;
mod subtypes;

pub use fields::{FieldAssignment, FieldNumberAllocator};
pub use subtypes::{compute_tag, hash_anchor, stable_hash, SubtypeTagDeriver, TAG_MODULUS, TAG_STRIDE};

/// How numbers are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingMode {
    /// Invent numbers and record them in the metadata store.
    Discovery,
    /// Reuse numbers previously recorded by a discovery run.
    Replay,
}

impl NumberingMode {
    pub const fn is_replay(self) -> bool {
        matches!(self, Self::Replay)
    }
}
