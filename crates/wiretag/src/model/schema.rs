// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema model handed to a [`ModelCompiler`](super::ModelCompiler).

use std::collections::HashMap;

/// One member of a record with its wire number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub number: u32,
    pub name: String,
    /// Whether generated accessors can reach the member.
    pub accessible: bool,
}

/// Polymorphic edge from a base record to one of its subtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtypeEdge {
    pub tag: u32,
    pub subtype: String,
}

/// Wire record for one eligible type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDecl {
    name: String,
    base: Option<String>,
    fields: Vec<FieldDecl>,
    subtypes: Vec<SubtypeEdge>,
}

impl RecordDecl {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base: None,
            fields: Vec::new(),
            subtypes: Vec::new(),
        }
    }

    /// Fully-qualified type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Eligible base record, if any.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Fields declared on this record, in assignment order.
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn subtypes(&self) -> &[SubtypeEdge] {
        &self.subtypes
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_number(&self, name: &str) -> Option<u32> {
        self.field(name).map(|f| f.number)
    }

    pub fn subtype_tag(&self, subtype: &str) -> Option<u32> {
        self.subtypes
            .iter()
            .find(|edge| edge.subtype == subtype)
            .map(|edge| edge.tag)
    }

    pub(crate) fn set_base(&mut self, base: Option<&str>) {
        self.base = base.map(str::to_string);
    }

    pub fn add_field(&mut self, number: u32, name: &str, accessible: bool) -> &mut Self {
        self.fields.push(FieldDecl {
            number,
            name: name.to_string(),
            accessible,
        });
        self
    }

    pub fn add_subtype(&mut self, tag: u32, subtype: &str) -> &mut Self {
        self.subtypes.push(SubtypeEdge {
            tag,
            subtype: subtype.to_string(),
        });
        self
    }
}

/// Ordered collection of records, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaModel {
    records: Vec<RecordDecl>,
    index: HashMap<String, usize>,
}

impl SchemaModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a record (idempotent) and return it for further edits.
    pub fn add(&mut self, name: &str) -> &mut RecordDecl {
        let idx = match self.index.get(name).copied() {
            Some(idx) => idx,
            None => {
                self.records.push(RecordDecl::new(name));
                let idx = self.records.len() - 1;
                self.index.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.records[idx]
    }

    pub fn get(&self, name: &str) -> Option<&RecordDecl> {
        self.index.get(name).map(|idx| &self.records[*idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn records(&self) -> &[RecordDecl] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent_and_ordered() {
        let mut model = SchemaModel::new();
        model.add("Zoo.Animal").add_field(1, "name", true);
        model.add("Zoo.Dog");
        model.add("Zoo.Animal").add_subtype(18356, "Zoo.Dog");

        let names: Vec<_> = model.records().iter().map(RecordDecl::name).collect();
        assert_eq!(names, vec!["Zoo.Animal", "Zoo.Dog"]);

        let animal = model.get("Zoo.Animal").unwrap();
        assert_eq!(animal.field_number("name"), Some(1));
        assert_eq!(animal.subtype_tag("Zoo.Dog"), Some(18356));
        assert_eq!(animal.subtype_tag("Zoo.Cat"), None);
    }
}
