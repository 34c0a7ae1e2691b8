// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Builder configuration.
//!
//! Supports both programmatic and file-based (TOML) configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::predicate::{TypePredicate, DEFAULT_RESERVED_NAMESPACE};

/// Model builder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Module-name prefixes never scanned for polymorphic children.
    #[serde(default = "default_excluded_modules")]
    pub excluded_module_prefixes: Vec<String>,

    /// Namespace prefixes reserved for built-in types.
    #[serde(default = "default_reserved_namespaces")]
    pub reserved_namespace_prefixes: Vec<String>,

    /// Register subtype edges for the whole ancestor chain, not just the
    /// nearest ancestor.
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// Follow member types and polymorphic children from the root.
    #[serde(default = "default_true")]
    pub expand_children: bool,

    /// Log replay misses at warn level (they are always collected).
    #[serde(default = "default_true")]
    pub warn_on_replay_miss: bool,
}

fn default_excluded_modules() -> Vec<String> {
    vec![
        "Microsoft".to_string(),
        "System".to_string(),
        "mscorlib".to_string(),
    ]
}

fn default_reserved_namespaces() -> Vec<String> {
    vec![DEFAULT_RESERVED_NAMESPACE.to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            excluded_module_prefixes: default_excluded_modules(),
            reserved_namespace_prefixes: default_reserved_namespaces(),
            recursive: true,
            expand_children: true,
            warn_on_replay_miss: true,
        }
    }
}

impl BuilderConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.excluded_module_prefixes.iter().any(String::is_empty) {
            return Err(ConfigError::Invalid(
                "excluded_module_prefixes must not contain empty prefixes".to_string(),
            ));
        }
        if self.reserved_namespace_prefixes.iter().any(String::is_empty) {
            return Err(ConfigError::Invalid(
                "reserved_namespace_prefixes must not contain empty prefixes".to_string(),
            ));
        }
        Ok(())
    }

    /// Type predicate for this configuration.
    pub fn predicate(&self) -> TypePredicate {
        TypePredicate::new(self.reserved_namespace_prefixes.clone())
    }
}
