// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type and member descriptions registered by the host application.
//!
//! `TypeDef` and `MemberDef` are the typed registration API: every marker the
//! numbering core cares about (contract, exclusion, serialization,
//! constructibility) is stated explicitly instead of discovered at runtime.

use std::fmt;

/// Structured type reference, possibly generic (`List<Order>`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName {
    path: String,
    args: Vec<TypeName>,
}

impl TypeName {
    /// Non-generic type reference by fully-qualified path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            args: Vec::new(),
        }
    }

    /// Generic instantiation, e.g. `TypeName::generic("List", [TypeName::new("Order")])`.
    pub fn generic(path: impl Into<String>, args: impl IntoIterator<Item = TypeName>) -> Self {
        Self {
            path: path.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Path without generic arguments.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Generic type arguments (empty for non-generic references).
    pub fn args(&self) -> &[TypeName] {
        &self.args
    }

    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }

    /// Fully-qualified name, the key used by [`TypeRegistry`](super::TypeRegistry).
    pub fn qualified(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if self.args.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (idx, arg) in self.args.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str(">")
    }
}

impl From<&str> for TypeName {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for TypeName {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// Shape of a registered type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    ValueType,
    Enum,
    Array,
    /// Universal base object type.
    ObjectRoot,
    /// Root of all value types.
    ValueTypeRoot,
    /// Root of all enumerations.
    EnumRoot,
}

impl TypeKind {
    /// Framework roots never participate in a schema.
    pub const fn is_framework_root(self) -> bool {
        matches!(self, Self::ObjectRoot | Self::ValueTypeRoot | Self::EnumRoot)
    }
}

/// Contract marker declaring a type eligible for serialization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractMarker {
    /// Contract namespace, used as the metadata key namespace.
    pub namespace: Option<String>,
}

/// Whether a member is a field or a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Property,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => f.write_str("field"),
            Self::Property => f.write_str("property"),
        }
    }
}

/// One declared member of a registered type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberInfo {
    pub(crate) name: String,
    pub(crate) kind: MemberKind,
    pub(crate) value_type: TypeName,
    pub(crate) serialized: bool,
    pub(crate) excluded: bool,
    pub(crate) accessible: bool,
}

impl MemberInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn value_type(&self) -> &TypeName {
        &self.value_type
    }

    /// True when the member carries the serialization marker and no exclusion marker.
    pub fn participates(&self) -> bool {
        self.serialized && !self.excluded
    }

    /// Whether generated accessors can reach the member.
    pub fn is_accessible(&self) -> bool {
        self.accessible
    }
}

/// A type in the host's universe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeInfo {
    pub(crate) name: String,
    pub(crate) namespace: String,
    pub(crate) full_name: String,
    pub(crate) module: String,
    pub(crate) kind: TypeKind,
    pub(crate) base: Option<String>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) contract: Option<ContractMarker>,
    pub(crate) excluded: bool,
    pub(crate) default_constructible: bool,
    pub(crate) members: Vec<MemberInfo>,
}

impl TypeInfo {
    /// Short type name (metadata key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaring namespace; empty for global types.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `namespace.name`, or just `name` for global types.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Owning module (assembly/library) name.
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Declared base type, if any.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    pub fn contract(&self) -> Option<&ContractMarker> {
        self.contract.as_ref()
    }

    pub fn has_contract(&self) -> bool {
        self.contract.is_some()
    }

    /// Namespace declared on the contract marker, if any.
    pub fn contract_namespace(&self) -> Option<&str> {
        self.contract
            .as_ref()
            .and_then(|c| c.namespace.as_deref())
            .filter(|ns| !ns.is_empty())
    }

    /// Namespace under which numbers for this type are stored: the contract
    /// namespace, or the declaring namespace when the marker names none.
    pub fn metadata_namespace(&self) -> &str {
        self.contract_namespace().unwrap_or(&self.namespace)
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    pub fn is_default_constructible(&self) -> bool {
        self.default_constructible
    }

    /// Members declared on this type only, in declaration order.
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Declared members taking part in serialization.
    pub fn serialized_members(&self) -> impl Iterator<Item = &MemberInfo> {
        self.members.iter().filter(|m| m.participates())
    }
}

fn join_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}

/// Builder for a [`MemberInfo`].
#[derive(Clone, Debug)]
pub struct MemberDef {
    info: MemberInfo,
}

impl MemberDef {
    /// Serialized public field.
    pub fn field(name: impl Into<String>, value_type: impl Into<TypeName>) -> Self {
        Self::with_kind(name, value_type, MemberKind::Field)
    }

    /// Serialized public property.
    pub fn property(name: impl Into<String>, value_type: impl Into<TypeName>) -> Self {
        Self::with_kind(name, value_type, MemberKind::Property)
    }

    fn with_kind(name: impl Into<String>, value_type: impl Into<TypeName>, kind: MemberKind) -> Self {
        Self {
            info: MemberInfo {
                name: name.into(),
                kind,
                value_type: value_type.into(),
                serialized: true,
                excluded: false,
                accessible: true,
            },
        }
    }

    /// Drop the serialization marker.
    pub fn unmarked(mut self) -> Self {
        self.info.serialized = false;
        self
    }

    /// Attach the exclusion marker.
    pub fn excluded(mut self) -> Self {
        self.info.excluded = true;
        self
    }

    /// Mark the member as not reachable by generated accessors.
    pub fn private(mut self) -> Self {
        self.info.accessible = false;
        self
    }

    pub(crate) fn into_info(self) -> MemberInfo {
        self.info
    }
}

/// Builder for a [`TypeInfo`].
///
/// ```
/// use wiretag::{MemberDef, TypeDef};
///
/// let animal = TypeDef::class("Zoo", "Animal")
///     .contract()
///     .member(MemberDef::property("name", "System.String"))
///     .member(MemberDef::property("age", "System.Int32"));
/// assert_eq!(animal.full_name(), "Zoo.Animal");
/// ```
#[derive(Clone, Debug)]
pub struct TypeDef {
    info: TypeInfo,
}

impl TypeDef {
    /// Reference type with a zero-argument constructor, owned by a module
    /// named after its namespace.
    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_kind(namespace.into(), name.into(), TypeKind::Class)
    }

    pub fn interface(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_kind(namespace.into(), name.into(), TypeKind::Interface)
            .without_default_constructor()
    }

    pub fn value_type(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_kind(namespace.into(), name.into(), TypeKind::ValueType)
    }

    pub fn enumeration(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_kind(namespace.into(), name.into(), TypeKind::Enum)
    }

    pub fn array(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_kind(namespace.into(), name.into(), TypeKind::Array)
    }

    /// Arbitrary kind, used for framework roots and primitives.
    pub fn of_kind(namespace: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        Self::with_kind(namespace.into(), name.into(), kind)
    }

    fn with_kind(namespace: String, name: String, kind: TypeKind) -> Self {
        let full_name = join_name(&namespace, &name);
        Self {
            info: TypeInfo {
                module: namespace.clone(),
                name,
                namespace,
                full_name,
                kind,
                base: None,
                interfaces: Vec::new(),
                contract: None,
                excluded: false,
                default_constructible: true,
                members: Vec::new(),
            },
        }
    }

    pub fn full_name(&self) -> &str {
        &self.info.full_name
    }

    /// Owning module name.
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.info.module = module.into();
        self
    }

    /// Attach the contract marker without a contract namespace.
    pub fn contract(mut self) -> Self {
        self.info.contract = Some(ContractMarker::default());
        self
    }

    /// Attach the contract marker with a contract namespace.
    pub fn contract_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.info.contract = Some(ContractMarker {
            namespace: Some(namespace.into()),
        });
        self
    }

    /// Declared base type (fully-qualified).
    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.info.base = Some(base.into());
        self
    }

    /// Implemented interface (fully-qualified).
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.info.interfaces.push(interface.into());
        self
    }

    /// Attach the exclusion marker.
    pub fn excluded(mut self) -> Self {
        self.info.excluded = true;
        self
    }

    pub fn without_default_constructor(mut self) -> Self {
        self.info.default_constructible = false;
        self
    }

    /// Append a declared member.
    pub fn member(mut self, member: MemberDef) -> Self {
        self.info.members.push(member.into_info());
        self
    }

    pub(crate) fn into_info(self) -> TypeInfo {
        self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_names_render_arguments() {
        let name = TypeName::generic(
            "System.Collections.Generic.Dictionary",
            [TypeName::new("System.String"), TypeName::new("Shop.Order")],
        );
        assert_eq!(
            name.qualified(),
            "System.Collections.Generic.Dictionary<System.String, Shop.Order>"
        );
        assert!(name.is_generic());
        assert!(!TypeName::from("Shop.Order").is_generic());
    }

    #[test]
    fn global_types_have_bare_full_names() {
        let def = TypeDef::class("", "Loose");
        assert_eq!(def.full_name(), "Loose");
    }

    #[test]
    fn metadata_namespace_falls_back_to_declaring_namespace() {
        let plain = TypeDef::class("Zoo", "Cage").contract().into_info();
        assert_eq!(plain.contract_namespace(), None);
        assert_eq!(plain.metadata_namespace(), "Zoo");

        let named = TypeDef::class("Zoo", "Cage")
            .contract_namespace("urn:zoo")
            .into_info();
        assert_eq!(named.contract_namespace(), Some("urn:zoo"));
        assert_eq!(named.metadata_namespace(), "urn:zoo");

        let blank = TypeDef::class("Farm", "Cage")
            .contract_namespace("")
            .into_info();
        assert_eq!(blank.metadata_namespace(), "Farm");
    }

    #[test]
    fn excluded_or_unmarked_members_do_not_participate() {
        let info = TypeDef::class("Zoo", "Keeper")
            .contract()
            .member(MemberDef::field("id", "System.Int32"))
            .member(MemberDef::field("cache", "System.String").unmarked())
            .member(MemberDef::property("secret", "System.String").excluded())
            .into_info();
        let names: Vec<_> = info.serialized_members().map(MemberInfo::name).collect();
        assert_eq!(names, vec!["id"]);
    }
}
