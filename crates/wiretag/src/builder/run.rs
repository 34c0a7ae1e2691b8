// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! One configuration run.
//!
//! A run owns every transient cache (navigated set, registered edges,
//! numbered types, sibling rankings) and is dropped when the root type is
//! configured. Work happens in two passes:
//!
//! 1. `navigate` walks the reachable universe and collects contract
//!    violations without touching the metadata store;
//! 2. `configure_type` numbers each navigated type and fills the model.
//!
//! Numbers invented in pass 2 are buffered and reach the metadata store
//! through `commit` once the model has compiled.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::error::{ConfigWarning, SchemaError};
use crate::hierarchy::ancestors_of;
use crate::metadata::{MetadataStore, StagedWrites, TypeMetaData};
use crate::model::SchemaModel;
use crate::numbering::{FieldNumberAllocator, NumberingMode, SubtypeTagDeriver};
use crate::scanner::UniverseScanner;
use crate::universe::TypeInfo;

/// Configuration progress of one type within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TypeStage {
    Unvisited,
    /// Record and ancestor subtype edges registered.
    BasesConfigured,
    /// Own members numbered.
    FieldsConfigured,
    /// Referenced and polymorphic children navigated.
    ChildrenExpanded,
    /// Root only: model handed to the compiler.
    SerializerPrepared,
}

pub(crate) struct Run<'a, S> {
    scanner: UniverseScanner<'a>,
    store: &'a mut S,
    pending: TypeMetaData,
    allocator: FieldNumberAllocator,
    deriver: SubtypeTagDeriver,
    recursive: bool,
    root: String,

    navigated: HashSet<String>,
    plan: Vec<(String, bool)>,
    offenders: BTreeSet<String>,
    edges: HashSet<String>,
    numbered: HashSet<String>,
    children: HashMap<String, Vec<String>>,
    stages: BTreeMap<String, TypeStage>,

    pub(crate) model: SchemaModel,
    pub(crate) warnings: Vec<ConfigWarning>,
}

impl<'a, S: MetadataStore> Run<'a, S> {
    pub(crate) fn new(
        scanner: UniverseScanner<'a>,
        store: &'a mut S,
        mode: NumberingMode,
        log_replay_misses: bool,
        recursive: bool,
        root: &str,
    ) -> Self {
        Self {
            scanner,
            store,
            pending: TypeMetaData::new(),
            allocator: FieldNumberAllocator::new(mode, log_replay_misses),
            deriver: SubtypeTagDeriver::new(mode),
            recursive,
            root: root.to_string(),
            navigated: HashSet::new(),
            plan: Vec::new(),
            offenders: BTreeSet::new(),
            edges: HashSet::new(),
            numbered: HashSet::new(),
            children: HashMap::new(),
            stages: BTreeMap::new(),
            model: SchemaModel::new(),
            warnings: Vec::new(),
        }
    }

    fn eligible(&self, name: &str) -> Option<&'a TypeInfo> {
        let predicate = self.scanner.predicate();
        self.scanner
            .registry()
            .get(name)
            .filter(|ty| predicate.is_eligible(Some(*ty)))
    }

    fn check_contract(&mut self, ty: Option<&TypeInfo>) {
        if self.scanner.predicate().violates_contract(ty) {
            if let Some(ty) = ty {
                self.offenders.insert(ty.full_name().to_string());
            }
        }
    }

    // ------------------------------------------------------------------
    // Pass 1: navigation and validation
    // ------------------------------------------------------------------

    /// Collect every type reachable from `root` into the plan.
    ///
    /// Depth-first, children in discovery order; a type enters the plan the
    /// first time it is reached.
    pub(crate) fn navigate(&mut self, root: &str, expand_children: bool) {
        let mut worklist = vec![(root.to_string(), expand_children)];

        while let Some((name, expand)) = worklist.pop() {
            if !self.navigated.insert(name.clone()) {
                continue;
            }
            let Some(ty) = self.eligible(&name) else {
                continue;
            };
            self.plan.push((name.clone(), expand));

            let registry = self.scanner.registry();
            let predicate = self.scanner.predicate();
            for ancestor in ancestors_of(registry, predicate, &name) {
                self.check_contract(Some(ancestor));
            }

            if !expand {
                continue;
            }

            let children = self.related_types(ty);
            for child in &children {
                self.check_contract(registry.get(child));
            }
            for child in children.into_iter().rev() {
                if !self.navigated.contains(&child) {
                    log::debug!("[ModelBuilder] {} -> {}", name, child);
                    worklist.push((child, true));
                }
            }
        }
    }

    /// Member-referenced types followed by polymorphic children, deduplicated.
    fn related_types(&mut self, ty: &TypeInfo) -> Vec<String> {
        let mut related = self.scanner.referenced_types(ty);
        let polymorphic = self
            .children
            .entry(ty.full_name().to_string())
            .or_insert_with(|| self.scanner.children_of(ty.full_name()));
        for child in polymorphic.iter() {
            if !related.contains(child) {
                related.push(child.clone());
            }
        }
        related
    }

    pub(crate) fn violations(&self) -> Option<SchemaError> {
        if self.offenders.is_empty() {
            return None;
        }
        Some(SchemaError::EligibilityViolation {
            root: self.root.clone(),
            offenders: self.offenders.iter().cloned().collect(),
        })
    }

    // ------------------------------------------------------------------
    // Pass 2: numbering
    // ------------------------------------------------------------------

    /// Configure every navigated type, in navigation order.
    pub(crate) fn configure_planned(&mut self) -> Result<(), SchemaError> {
        let plan = std::mem::take(&mut self.plan);
        for (name, expand_children) in &plan {
            self.configure_type(name, *expand_children)?;
        }
        self.plan = plan;
        Ok(())
    }

    fn configure_type(&mut self, name: &str, expand_children: bool) -> Result<(), SchemaError> {
        let Some(ty) = self.eligible(name) else {
            return Ok(());
        };
        self.declare(ty);

        let registry = self.scanner.registry();
        let predicate = self.scanner.predicate();
        let ancestors: Vec<&TypeInfo> = ancestors_of(registry, predicate, name).collect();
        for (idx, ancestor) in ancestors.iter().enumerate() {
            self.declare(ancestor);
            let child = if idx == 0 { ty } else { ancestors[idx - 1] };
            self.configure_subtype(ancestor, child)?;
            if !self.recursive {
                break;
            }
        }
        self.advance(name, TypeStage::BasesConfigured);

        self.configure_fields(ty)?;
        self.advance(name, TypeStage::FieldsConfigured);

        if expand_children {
            self.advance(name, TypeStage::ChildrenExpanded);
        }
        Ok(())
    }

    fn declare(&mut self, ty: &TypeInfo) {
        let base = ty.base().filter(|base| self.eligible(base).is_some());
        self.model.add(ty.full_name()).set_base(base);
    }

    fn configure_subtype(&mut self, base: &TypeInfo, child: &TypeInfo) -> Result<(), SchemaError> {
        if self.eligible(base.full_name()).is_none()
            || !self.edges.insert(child.full_name().to_string())
        {
            return Ok(());
        }
        let mut staged = StagedWrites::new(&*self.store, &mut self.pending);
        let tag = self
            .deriver
            .derive(&self.scanner, &mut staged, child, &mut self.warnings)?;
        self.model
            .add(base.full_name())
            .add_subtype(tag, child.full_name());
        Ok(())
    }

    /// Number `ty`'s own members after those of its ancestors.
    fn configure_fields(&mut self, ty: &TypeInfo) -> Result<(), SchemaError> {
        if !self.numbered.insert(ty.full_name().to_string()) {
            return Ok(());
        }
        if let Some(base) = ty.base().and_then(|base| self.eligible(base)) {
            self.configure_fields(base)?;
        }

        let registry = self.scanner.registry();
        let predicate = self.scanner.predicate();
        let ancestors: Vec<&TypeInfo> = ancestors_of(registry, predicate, ty.full_name())
            .filter(|a| predicate.is_eligible(Some(*a)))
            .collect();

        let mut staged = StagedWrites::new(&*self.store, &mut self.pending);
        let assigned = self
            .allocator
            .allocate(ty, &ancestors, &mut staged, &mut self.warnings)?;

        let record = self.model.add(ty.full_name());
        for field in &assigned {
            record.add_field(field.number, &field.member, field.accessible);
        }
        Ok(())
    }

    /// Write the numbers invented by this run to the metadata store.
    pub(crate) fn commit(&mut self) {
        if !self.pending.is_empty() {
            log::debug!(
                "[ModelBuilder] committing numbers for {} types",
                self.pending.type_count()
            );
        }
        StagedWrites::commit(&self.pending, &mut *self.store);
        self.pending = TypeMetaData::new();
    }

    pub(crate) fn advance(&mut self, name: &str, stage: TypeStage) {
        let current = self
            .stages
            .entry(name.to_string())
            .or_insert(TypeStage::Unvisited);
        if stage > *current {
            log::trace!("[ModelBuilder] {} {:?} -> {:?}", name, current, stage);
            *current = stage;
        }
    }

    pub(crate) fn into_parts(
        self,
    ) -> (SchemaModel, Vec<ConfigWarning>, BTreeMap<String, TypeStage>) {
        (self.model, self.warnings, self.stages)
    }
}
