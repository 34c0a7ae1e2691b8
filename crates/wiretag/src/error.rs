// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error and warning types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::universe::MemberKind;

/// Fatal failures of a model configuration run.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Reachable types lacking the contract marker (all offenders, sorted).
    #[error(
        "types reachable from {root} do not have a contract marker:\n{}",
        .offenders.join("\n")
    )]
    EligibilityViolation { root: String, offenders: Vec<String> },

    /// Subtype tag arithmetic left the representable range.
    #[error("subtype tag for {subtype} under {rootmost} overflowed")]
    TagOverflow { rootmost: String, subtype: String },

    /// Field counter left the representable range.
    #[error("field number for {type_name}.{member} overflowed")]
    FieldNumberOverflow { type_name: String, member: String },

    /// The model compiler rejected the assembled schema.
    #[error(
        "the model {root} could not be compiled; members reachable from it may be \
         inaccessible or conflicting: {source}"
    )]
    Compilation {
        root: String,
        #[source]
        source: CompileError,
    },
}

/// Structural rejections raised by a [`ModelCompiler`](crate::ModelCompiler).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("{record}: field number {number} used by both {first} and {second}")]
    DuplicateFieldNumber {
        record: String,
        number: u32,
        first: String,
        second: String,
    },

    #[error("{base}: subtype tag {tag} used by both {first} and {second}")]
    DuplicateSubtypeTag {
        base: String,
        tag: u32,
        first: String,
        second: String,
    },

    #[error("{base}: subtype tag {tag} for {subtype} collides with field {field}")]
    TagCollidesWithField {
        base: String,
        tag: u32,
        subtype: String,
        field: String,
    },

    #[error("{record}.{member} is not accessible to generated accessors")]
    InaccessibleMember { record: String, member: String },

    #[error("record {name} is referenced but was never declared")]
    UndeclaredRecord { name: String },

    /// Free-form rejection from an external compiler.
    #[error("{0}")]
    Rejected(String),
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Metadata file persistence failures.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error on {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Non-fatal findings collected during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Replay mode found no stored number for a member; the member is omitted.
    ReplayMiss {
        namespace: String,
        type_name: String,
        member: String,
        kind: MemberKind,
    },
    /// Replay mode found no stored base tag; the derived tag was used but not stored.
    UnstoredBaseTag {
        namespace: String,
        type_name: String,
        tag: u32,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReplayMiss {
                namespace,
                type_name,
                member,
                kind,
            } => write!(
                f,
                "no stored field number for {} {}.{} (namespace '{}'), member omitted",
                kind, type_name, member, namespace
            ),
            Self::UnstoredBaseTag {
                namespace,
                type_name,
                tag,
            } => write!(
                f,
                "no stored base tag for {} (namespace '{}'), derived {} without storing it",
                type_name, namespace, tag
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn eligibility_message_lists_every_offender() {
        let err = SchemaError::EligibilityViolation {
            root: "Shop.Order".into(),
            offenders: vec!["Shop.Address".into(), "Shop.Line".into()],
        };
        let text = err.to_string();
        assert!(text.contains("Shop.Order"));
        assert!(text.ends_with("Shop.Address\nShop.Line"));
    }

    #[test]
    fn compilation_error_keeps_its_cause() {
        let err = SchemaError::Compilation {
            root: "Shop.Order".into(),
            source: CompileError::InaccessibleMember {
                record: "Shop.Line".into(),
                member: "price".into(),
            },
        };
        assert!(err.to_string().contains("Shop.Order"));
        let cause = err.source().map(ToString::to_string);
        assert_eq!(
            cause.as_deref(),
            Some("Shop.Line.price is not accessible to generated accessors")
        );
    }

    #[test]
    fn replay_miss_renders_location() {
        let warning = ConfigWarning::ReplayMiss {
            namespace: "urn:shop".into(),
            type_name: "Order".into(),
            member: "coupon".into(),
            kind: MemberKind::Property,
        };
        assert_eq!(
            warning.to_string(),
            "no stored field number for property Order.coupon (namespace 'urn:shop'), member omitted"
        );
    }
}
