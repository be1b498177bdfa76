//! Type descriptions and the ancestry provider capability.

use std::sync::Arc;

use crate::{MethodToken, Name, TypeId};

/// Whether a type is a class or an interface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    /// Single-inheritance type; may carry a superclass.
    Class,
    /// Multiple-inheritance type; never carries a superclass.
    Interface,
}

/// One type with its direct ancestry and its own declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDescription {
    /// Identity of this type.
    pub id: TypeId,

    /// Binary name (e.g. `java.util.ArrayList`).
    pub name: Name,

    /// Declaring package; `Name::EMPTY` for the default package.
    pub package: Name,

    /// Class or interface.
    pub kind: TypeKind,

    /// Direct superclass. Always `None` for interfaces and for the root class.
    pub super_class: Option<TypeId>,

    /// Directly implemented (class) or extended (interface) interfaces,
    /// in declaration order.
    pub interfaces: Vec<TypeId>,

    /// Methods declared directly on this type, in declaration order.
    pub methods: Vec<Arc<MethodToken>>,
}

impl TypeDescription {
    /// Create a description with no ancestry and no methods.
    pub fn new(id: TypeId, name: Name, kind: TypeKind) -> Self {
        Self {
            id,
            name,
            package: Name::EMPTY,
            kind,
            super_class: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    #[inline]
    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }
}

/// Source of type descriptions for the merge engine.
///
/// Implementations hand out fully materialized descriptions; the engine
/// never asks a provider to load anything lazily, and a missing type is a
/// hard error for the build that asked for it.
pub trait AncestryProvider {
    /// Look up the description of `ty`.
    fn describe(&self, ty: TypeId) -> Option<&TypeDescription>;

    /// Direct superclass of `ty`, if `ty` is known and has one.
    fn super_class(&self, ty: TypeId) -> Option<TypeId> {
        self.describe(ty).and_then(|d| d.super_class)
    }

    /// Direct interfaces of `ty`; empty for unknown types.
    fn interfaces(&self, ty: TypeId) -> &[TypeId] {
        self.describe(ty).map_or(&[], |d| d.interfaces.as_slice())
    }

    /// Methods declared directly on `ty`; empty for unknown types.
    fn declared_methods(&self, ty: TypeId) -> &[Arc<MethodToken>] {
        self.describe(ty).map_or(&[], |d| d.methods.as_slice())
    }
}

