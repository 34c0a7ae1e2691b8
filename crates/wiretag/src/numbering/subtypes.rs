// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Subtype base-tag derivation.
//!
//! A subtype's tag is anchored on its hierarchy's rootmost ancestor:
//!
//! ```text
//! tag = (|hash(rootmost)| mod 23827) + rank * 4 + 4
//! ```
//!
//! where `rank` is the subtype's position among the hierarchy's eligible
//! types sorted by fully-qualified name. Hierarchies never share a ranking
//! list, so unrelated hierarchies can evolve independently.

use std::collections::HashMap;

use md5::{Digest, Md5};

use super::NumberingMode;
use crate::error::{ConfigWarning, SchemaError};
use crate::hierarchy::rootmost;
use crate::metadata::MetadataStore;
use crate::scanner::UniverseScanner;
use crate::universe::TypeInfo;

/// Modulus bounding the hash anchor.
pub const TAG_MODULUS: i32 = 23827;

/// Distance between consecutive sibling tags.
pub const TAG_STRIDE: u32 = 4;

/// Run-independent 32-bit hash of a name.
///
/// First four bytes of the MD5 digest, little-endian, as a signed value.
pub fn stable_hash(name: &str) -> i32 {
    let mut hasher = Md5::new();
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    i32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// `|stable_hash(name)| mod TAG_MODULUS`; `None` when the absolute value
/// is not representable.
pub fn hash_anchor(name: &str) -> Option<u32> {
    let positive = stable_hash(name).checked_abs()?;
    u32::try_from(positive % TAG_MODULUS).ok()
}

/// `anchor + rank * TAG_STRIDE + TAG_STRIDE`, checked.
pub fn compute_tag(anchor: u32, rank: usize) -> Option<u32> {
    u32::try_from(rank)
        .ok()?
        .checked_mul(TAG_STRIDE)?
        .checked_add(anchor)?
        .checked_add(TAG_STRIDE)
}

/// Derives subtype tags, caching each hierarchy's ranking for one run.
#[derive(Debug)]
pub struct SubtypeTagDeriver {
    mode: NumberingMode,
    /// Sorted eligible descendants keyed by rootmost ancestor.
    siblings: HashMap<String, Vec<String>>,
}

impl SubtypeTagDeriver {
    pub fn new(mode: NumberingMode) -> Self {
        Self {
            mode,
            siblings: HashMap::new(),
        }
    }

    /// Tag selecting `subtype` on the wire.
    pub fn derive<S: MetadataStore>(
        &mut self,
        scanner: &UniverseScanner<'_>,
        store: &mut S,
        subtype: &TypeInfo,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<u32, SchemaError> {
        let namespace = subtype.metadata_namespace();
        let type_name = subtype.name();

        if self.mode.is_replay() {
            if let Some(number) = store.base_number(namespace, type_name) {
                return Ok(number);
            }
        }

        let anchor_type = rootmost(scanner.registry(), scanner.predicate(), subtype);
        let anchor_name = anchor_type.full_name();
        let rank = self.rank_of(scanner, anchor_name, subtype.full_name());

        let overflow = || SchemaError::TagOverflow {
            rootmost: anchor_name.to_string(),
            subtype: subtype.full_name().to_string(),
        };
        let anchor = hash_anchor(anchor_name).ok_or_else(overflow)?;
        let tag = compute_tag(anchor, rank).ok_or_else(overflow)?;

        log::debug!(
            "[SubtypeTags] {} under {} -> rank {} tag {}",
            subtype.full_name(),
            anchor_name,
            rank,
            tag
        );

        match self.mode {
            NumberingMode::Discovery => store.store_base_number(namespace, type_name, tag),
            NumberingMode::Replay => {
                let warning = ConfigWarning::UnstoredBaseTag {
                    namespace: namespace.to_string(),
                    type_name: type_name.to_string(),
                    tag,
                };
                log::warn!("[SubtypeTags] {}", warning);
                warnings.push(warning);
            }
        }
        Ok(tag)
    }

    fn rank_of(&mut self, scanner: &UniverseScanner<'_>, anchor: &str, subtype: &str) -> usize {
        let siblings = self
            .siblings
            .entry(anchor.to_string())
            .or_insert_with(|| scanner.ranked_descendants(anchor));

        // sorted, except for names appended below
        match siblings.iter().position(|name| name == subtype) {
            Some(rank) => rank,
            None => {
                // Not reachable from the registry (e.g. an ineligible link in
                // between); rank it after everything known this run.
                log::warn!(
                    "[SubtypeTags] {} is not a ranked descendant of {}, appending",
                    subtype,
                    anchor
                );
                siblings.push(subtype.to_string());
                siblings.len() - 1
            }
        }
    }
}
