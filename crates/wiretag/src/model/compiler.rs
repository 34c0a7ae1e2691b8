// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compiler seam and the built-in structural validator.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::schema::{RecordDecl, SchemaModel};
use crate::error::CompileError;

/// Consumer of a finished [`SchemaModel`], typically a code or serializer
/// generator for a concrete wire encoding.
pub trait ModelCompiler {
    type Output;

    fn compile(&self, model: &SchemaModel) -> Result<Self::Output, CompileError>;
}

/// Field in a record's effective wire layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledField {
    pub number: u32,
    pub name: String,
    /// Record that declares the field (the record itself or an ancestor).
    pub declared_in: String,
}

/// Flattened record: inherited fields first, then its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRecord {
    pub name: String,
    pub base: Option<String>,
    pub fields: Vec<CompiledField>,
    /// `(tag, subtype)` pairs, ascending by tag.
    pub subtypes: Vec<(u32, String)>,
}

impl CompiledRecord {
    pub fn field_number(&self, name: &str) -> Option<u32> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.number)
    }
}

/// Validated schema with effective per-record layouts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledSchema {
    records: BTreeMap<String, CompiledRecord>,
}

impl CompiledSchema {
    pub fn get(&self, record: &str) -> Option<&CompiledRecord> {
        self.records.get(record)
    }

    /// Number of `field` in `record`'s effective layout.
    pub fn field_number(&self, record: &str, field: &str) -> Option<u32> {
        self.records.get(record)?.field_number(field)
    }

    pub fn subtype_tag(&self, base: &str, subtype: &str) -> Option<u32> {
        self.records
            .get(base)?
            .subtypes
            .iter()
            .find(|(_, name)| name == subtype)
            .map(|(tag, _)| *tag)
    }

    pub fn effective_fields(&self, record: &str) -> &[CompiledField] {
        self.records
            .get(record)
            .map(|r| r.fields.as_slice())
            .unwrap_or(&[])
    }

    pub fn records(&self) -> impl Iterator<Item = &CompiledRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Built-in compiler: validates wire-level consistency and flattens layouts.
///
/// Rejects inaccessible members, dangling record references, duplicate
/// numbers within an effective layout, duplicate subtype tags under one
/// base, and subtype tags that collide with the base's field numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl ModelCompiler for SchemaValidator {
    type Output = CompiledSchema;

    fn compile(&self, model: &SchemaModel) -> Result<CompiledSchema, CompileError> {
        let mut records = BTreeMap::new();

        for record in model.records() {
            check_references(model, record)?;

            if let Some(field) = record.fields().iter().find(|f| !f.accessible) {
                return Err(CompileError::InaccessibleMember {
                    record: record.name().to_string(),
                    member: field.name.clone(),
                });
            }

            let fields = effective_layout(model, record)?;
            let subtypes = check_subtypes(record, &fields)?;

            records.insert(
                record.name().to_string(),
                CompiledRecord {
                    name: record.name().to_string(),
                    base: record.base().map(str::to_string),
                    fields,
                    subtypes,
                },
            );
        }

        Ok(CompiledSchema { records })
    }
}

fn check_references(model: &SchemaModel, record: &RecordDecl) -> Result<(), CompileError> {
    let referenced = record
        .base()
        .into_iter()
        .chain(record.subtypes().iter().map(|edge| edge.subtype.as_str()));
    for name in referenced {
        if !model.contains(name) {
            return Err(CompileError::UndeclaredRecord {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn effective_layout(
    model: &SchemaModel,
    record: &RecordDecl,
) -> Result<Vec<CompiledField>, CompileError> {
    // nearest first, then reversed so ancestors lead
    let mut chain = vec![record];
    let mut seen = HashSet::from([record.name()]);
    let mut current = record;
    while let Some(parent) = current.base().and_then(|base| model.get(base)) {
        if !seen.insert(parent.name()) {
            break;
        }
        chain.push(parent);
        current = parent;
    }
    chain.reverse();

    let mut fields = Vec::new();
    let mut owners: HashMap<u32, String> = HashMap::new();
    for decl in chain {
        for field in decl.fields() {
            let qualified = format!("{}.{}", decl.name(), field.name);
            if let Some(first) = owners.get(&field.number) {
                return Err(CompileError::DuplicateFieldNumber {
                    record: record.name().to_string(),
                    number: field.number,
                    first: first.clone(),
                    second: qualified,
                });
            }
            owners.insert(field.number, qualified);
            fields.push(CompiledField {
                number: field.number,
                name: field.name.clone(),
                declared_in: decl.name().to_string(),
            });
        }
    }
    Ok(fields)
}

fn check_subtypes(
    record: &RecordDecl,
    fields: &[CompiledField],
) -> Result<Vec<(u32, String)>, CompileError> {
    let mut by_tag: BTreeMap<u32, String> = BTreeMap::new();
    for edge in record.subtypes() {
        if let Some(field) = fields.iter().find(|f| f.number == edge.tag) {
            return Err(CompileError::TagCollidesWithField {
                base: record.name().to_string(),
                tag: edge.tag,
                subtype: edge.subtype.clone(),
                field: field.name.clone(),
            });
        }
        if let Some(first) = by_tag.get(&edge.tag) {
            return Err(CompileError::DuplicateSubtypeTag {
                base: record.name().to_string(),
                tag: edge.tag,
                first: first.clone(),
                second: edge.subtype.clone(),
            });
        }
        by_tag.insert(edge.tag, edge.subtype.clone());
    }
    Ok(by_tag.into_iter().collect())
}
