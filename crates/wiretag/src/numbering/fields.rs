// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member field-number allocation.

use super::NumberingMode;
use crate::error::{ConfigWarning, SchemaError};
use crate::metadata::MetadataStore;
use crate::universe::TypeInfo;

/// One member with its wire field number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    pub member: String,
    pub number: u32,
    pub accessible: bool,
}

/// Assigns field numbers to the members a type declares itself.
///
/// Discovery continues from the highest number recorded for the type's
/// ancestors, so a type's numbers never collide with inherited ones.
/// Replay reuses stored numbers and omits members with no record.
#[derive(Debug, Clone, Copy)]
pub struct FieldNumberAllocator {
    mode: NumberingMode,
    log_misses: bool,
}

impl FieldNumberAllocator {
    pub fn new(mode: NumberingMode, log_misses: bool) -> Self {
        Self { mode, log_misses }
    }

    /// Number the serialized members declared on `ty`.
    ///
    /// `ancestors` are `ty`'s eligible ancestors, nearest first; their
    /// members must already be numbered.
    pub fn allocate<S: MetadataStore>(
        &self,
        ty: &TypeInfo,
        ancestors: &[&TypeInfo],
        store: &mut S,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<Vec<FieldAssignment>, SchemaError> {
        match self.mode {
            NumberingMode::Discovery => Self::discover(ty, ancestors, store),
            NumberingMode::Replay => Ok(self.replay(ty, store, warnings)),
        }
    }

    fn discover<S: MetadataStore>(
        ty: &TypeInfo,
        ancestors: &[&TypeInfo],
        store: &mut S,
    ) -> Result<Vec<FieldAssignment>, SchemaError> {
        let mut counter = ancestors
            .iter()
            .filter_map(|a| store.max_field_number(a.metadata_namespace(), a.name()))
            .max()
            .unwrap_or(0);

        let mut assigned = Vec::new();
        for member in ty.serialized_members() {
            counter = counter
                .checked_add(1)
                .ok_or_else(|| SchemaError::FieldNumberOverflow {
                    type_name: ty.full_name().to_string(),
                    member: member.name().to_string(),
                })?;
            store.store_field_number(ty.metadata_namespace(), ty.name(), member.name(), counter);
            log::debug!(
                "[FieldNumbers] {}.{} = {}",
                ty.full_name(),
                member.name(),
                counter
            );
            assigned.push(FieldAssignment {
                member: member.name().to_string(),
                number: counter,
                accessible: member.is_accessible(),
            });
        }
        Ok(assigned)
    }

    fn replay<S: MetadataStore>(
        &self,
        ty: &TypeInfo,
        store: &S,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Vec<FieldAssignment> {
        let mut assigned = Vec::new();
        for member in ty.serialized_members() {
            match store.field_number(ty.metadata_namespace(), ty.name(), member.name()) {
                Some(number) => assigned.push(FieldAssignment {
                    member: member.name().to_string(),
                    number,
                    accessible: member.is_accessible(),
                }),
                None => {
                    let warning = ConfigWarning::ReplayMiss {
                        namespace: ty.metadata_namespace().to_string(),
                        type_name: ty.name().to_string(),
                        member: member.name().to_string(),
                        kind: member.kind(),
                    };
                    if self.log_misses {
                        log::warn!("[FieldNumbers] {}", warning);
                    }
                    warnings.push(warning);
                }
            }
        }
        assigned
    }
}
