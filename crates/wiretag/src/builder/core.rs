// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `ModelBuilder` entry point.

use std::collections::BTreeMap;

use super::run::{Run, TypeStage};
use crate::config::BuilderConfig;
use crate::error::{ConfigWarning, SchemaError};
use crate::metadata::MetadataStore;
use crate::model::{ModelCompiler, SchemaModel, SchemaValidator};
use crate::numbering::NumberingMode;
use crate::predicate::TypePredicate;
use crate::scanner::UniverseScanner;
use crate::universe::TypeRegistry;

/// Result of configuring one root type.
#[derive(Debug)]
pub struct ModelInfo<O> {
    /// Records assembled for the compiler.
    pub model: SchemaModel,
    /// Compiler output.
    pub compiled: O,
    /// Non-fatal findings (replay misses, unstored tags).
    pub warnings: Vec<ConfigWarning>,
    /// Final stage reached by every configured type.
    pub stages: BTreeMap<String, TypeStage>,
}

/// Builds wire models for root types of a [`TypeRegistry`].
///
/// A builder owns (or borrows, via `&mut S`) its metadata store and runs
/// one configuration at a time. Each [`configure`](Self::configure) call
/// starts from fresh transient caches.
///
/// ```
/// use wiretag::{MemberDef, ModelBuilder, TypeDef, TypeMetaData, TypeRegistry};
///
/// let mut registry = TypeRegistry::with_builtins();
/// registry.register(
///     TypeDef::class("Shop", "Order")
///         .contract()
///         .member(MemberDef::property("id", "System.Int64")),
/// );
///
/// let mut store = TypeMetaData::new();
/// let info = ModelBuilder::discovery(&registry, &mut store)
///     .configure("Shop.Order")?
///     .expect("Shop.Order is eligible");
/// assert_eq!(info.compiled.field_number("Shop.Order", "id"), Some(1));
/// # Ok::<(), wiretag::SchemaError>(())
/// ```
pub struct ModelBuilder<'r, S, C = SchemaValidator> {
    registry: &'r TypeRegistry,
    store: S,
    mode: NumberingMode,
    config: BuilderConfig,
    predicate: TypePredicate,
    compiler: C,
}

impl<'r, S: MetadataStore> ModelBuilder<'r, S, SchemaValidator> {
    /// Builder inventing numbers and recording them in `store`.
    pub fn discovery(registry: &'r TypeRegistry, store: S) -> Self {
        Self::with_mode(registry, store, NumberingMode::Discovery)
    }

    /// Builder reusing numbers previously recorded in `store`.
    pub fn replay(registry: &'r TypeRegistry, store: S) -> Self {
        Self::with_mode(registry, store, NumberingMode::Replay)
    }

    pub fn with_mode(registry: &'r TypeRegistry, store: S, mode: NumberingMode) -> Self {
        let config = BuilderConfig::default();
        Self {
            registry,
            store,
            mode,
            predicate: config.predicate(),
            config,
            compiler: SchemaValidator,
        }
    }
}

impl<'r, S: MetadataStore, C: ModelCompiler> ModelBuilder<'r, S, C> {
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.predicate = config.predicate();
        self.config = config;
        self
    }

    /// Replace the model compiler.
    pub fn with_compiler<C2: ModelCompiler>(self, compiler: C2) -> ModelBuilder<'r, S, C2> {
        ModelBuilder {
            registry: self.registry,
            store: self.store,
            mode: self.mode,
            config: self.config,
            predicate: self.predicate,
            compiler,
        }
    }

    pub fn mode(&self) -> NumberingMode {
        self.mode
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hand the metadata store back.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Configure `root` with the configured `recursive`/`expand_children` defaults.
    pub fn configure(&mut self, root: &str) -> Result<Option<ModelInfo<C::Output>>, SchemaError> {
        let recursive = self.config.recursive;
        let expand_children = self.config.expand_children;
        self.configure_with(root, recursive, expand_children)
    }

    /// Configure `root` and everything reachable from it, then compile.
    ///
    /// Returns `Ok(None)` when `root` is not an eligible type. Contract
    /// violations anywhere in the reachable universe abort the run before
    /// any number is assigned. Numbers reach the store only once the model
    /// has compiled, so a failed run leaves the store unchanged.
    pub fn configure_with(
        &mut self,
        root: &str,
        recursive: bool,
        expand_children: bool,
    ) -> Result<Option<ModelInfo<C::Output>>, SchemaError> {
        if !self.predicate.is_eligible(self.registry.get(root)) {
            log::debug!("[ModelBuilder] {} is not an eligible root, skipping", root);
            return Ok(None);
        }

        let scanner = UniverseScanner::new(
            self.registry,
            &self.predicate,
            &self.config.excluded_module_prefixes,
        );
        let mut run = Run::new(
            scanner,
            &mut self.store,
            self.mode,
            self.config.warn_on_replay_miss,
            recursive,
            root,
        );

        run.navigate(root, expand_children);
        if let Some(violation) = run.violations() {
            log::debug!("[ModelBuilder] {}", violation);
            return Err(violation);
        }

        run.configure_planned()?;

        let compiled = self
            .compiler
            .compile(&run.model)
            .map_err(|source| SchemaError::Compilation {
                root: root.to_string(),
                source,
            })?;
        run.commit();
        run.advance(root, TypeStage::SerializerPrepared);

        let (model, warnings, stages) = run.into_parts();
        log::info!(
            "[ModelBuilder] configured {} ({:?}): {} records, {} warnings",
            root,
            self.mode,
            model.len(),
            warnings.len()
        );

        Ok(Some(ModelInfo {
            model,
            compiled,
            warnings,
            stages,
        }))
    }
}
