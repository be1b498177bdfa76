//! In-memory ancestry provider.
//!
//! The `TypeTable` stores materialized type descriptions and serves them to
//! the merge engine. It is what a loader fills after reading class files, and
//! what tests build through [`HierarchyBuilder`](crate::HierarchyBuilder).
//!
//! # Design
//!
//! - Descriptions stored once in a `Vec`, lookup maps hold `usize` indices
//! - `TypeId` → index (`FxHashMap`) for the engine's hot path
//! - `Name` → index (`BTreeMap`) for deterministic iteration by name
//! - Local checks at `register`, cross-type checks at `validate`, so types
//!   can be registered in any order

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{AncestryProvider, Name, TypeDescription, TypeId};

/// Error raised while registering or validating type descriptions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("{0} is already registered")]
    DuplicateType(TypeId),

    #[error("{ty} reuses a name already registered for {existing}")]
    DuplicateName { ty: TypeId, existing: TypeId },

    #[error("{0} is a reserved primitive type identity")]
    PrimitiveIdentity(TypeId),

    #[error("interface {0} cannot declare a superclass")]
    InterfaceWithSuperclass(TypeId),

    #[error("{ty} lists a method declared by {declared_by}")]
    ForeignMethod { ty: TypeId, declared_by: TypeId },

    #[error("{0} declares a method with contradictory modifiers")]
    InconsistentFlags(TypeId),

    #[error("class {0} declares a default method")]
    DefaultOnClass(TypeId),

    #[error("{from} refers to unknown type {to}")]
    DanglingReference { from: TypeId, to: TypeId },

    #[error("{ty} extends {super_class}, which is not a class")]
    SuperclassNotClass { ty: TypeId, super_class: TypeId },

    #[error("{ty} implements {listed}, which is not an interface")]
    NotAnInterface { ty: TypeId, listed: TypeId },

    #[error("type hierarchy is cyclic through {0}")]
    CyclicHierarchy(TypeId),
}

/// Registry of type descriptions, usable as an [`AncestryProvider`].
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    /// All registered descriptions, in registration order.
    types: Vec<TypeDescription>,

    /// Type identity → description index.
    by_id: FxHashMap<TypeId, usize>,

    /// Binary name → description index (`BTreeMap` for deterministic iteration).
    by_name: BTreeMap<Name, usize>,
}

impl TypeTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a description after checking everything that can be checked
    /// without looking at other types.
    pub fn register(&mut self, desc: TypeDescription) -> Result<(), TableError> {
        let id = desc.id;
        if id.is_primitive() {
            return Err(TableError::PrimitiveIdentity(id));
        }
        if self.by_id.contains_key(&id) {
            return Err(TableError::DuplicateType(id));
        }
        if let Some(&existing) = self.by_name.get(&desc.name) {
            return Err(TableError::DuplicateName {
                ty: id,
                existing: self.types[existing].id,
            });
        }
        if desc.is_interface() && desc.super_class.is_some() {
            return Err(TableError::InterfaceWithSuperclass(id));
        }
        for method in &desc.methods {
            if method.declaring_type != id {
                return Err(TableError::ForeignMethod {
                    ty: id,
                    declared_by: method.declaring_type,
                });
            }
            if !method.flags.is_consistent() {
                return Err(TableError::InconsistentFlags(id));
            }
            if method.is_default() && desc.is_class() {
                return Err(TableError::DefaultOnClass(id));
            }
        }

        let index = self.types.len();
        self.by_id.insert(id, index);
        self.by_name.insert(desc.name, index);
        self.types.push(desc);
        Ok(())
    }

    /// Check references between registered types: every referenced type
    /// exists, superclasses are classes, implemented types are interfaces,
    /// and the hierarchy has no cycles.
    pub fn validate(&self) -> Result<(), TableError> {
        for desc in &self.types {
            if let Some(super_class) = desc.super_class {
                let target = self.resolve_ref(desc.id, super_class)?;
                if !target.is_class() {
                    return Err(TableError::SuperclassNotClass {
                        ty: desc.id,
                        super_class,
                    });
                }
            }
            for &listed in &desc.interfaces {
                let target = self.resolve_ref(desc.id, listed)?;
                if !target.is_interface() {
                    return Err(TableError::NotAnInterface { ty: desc.id, listed });
                }
            }
        }
        self.check_acyclic()
    }

    fn resolve_ref(&self, from: TypeId, to: TypeId) -> Result<&TypeDescription, TableError> {
        self.get(to)
            .ok_or(TableError::DanglingReference { from, to })
    }

    /// Depth-first search over supertype edges with an explicit stack.
    ///
    /// `on_path` holds the types of the current DFS path; reaching one of
    /// them again closes a cycle.
    fn check_acyclic(&self) -> Result<(), TableError> {
        let mut done: FxHashSet<TypeId> = FxHashSet::default();
        let mut on_path: FxHashSet<TypeId> = FxHashSet::default();

        for root in &self.types {
            if done.contains(&root.id) {
                continue;
            }
            // (type, next edge to explore)
            let mut stack: Vec<(TypeId, usize)> = vec![(root.id, 0)];
            on_path.insert(root.id);

            while let Some(frame) = stack.last_mut() {
                let ty = frame.0;
                let edge = self.supertypes(ty).nth(frame.1);
                frame.1 += 1;
                match edge {
                    Some(parent) if on_path.contains(&parent) => {
                        return Err(TableError::CyclicHierarchy(parent));
                    }
                    Some(parent) if !done.contains(&parent) => {
                        on_path.insert(parent);
                        stack.push((parent, 0));
                    }
                    Some(_) => {}
                    None => {
                        on_path.remove(&ty);
                        done.insert(ty);
                        stack.pop();
                    }
                }
            }
        }
        Ok(())
    }

    /// Direct supertypes: superclass first, then interfaces.
    fn supertypes(&self, ty: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.super_class(ty)
            .into_iter()
            .chain(self.interfaces(ty).iter().copied())
    }

    /// Look up a description by identity.
    #[inline]
    pub fn get(&self, id: TypeId) -> Option<&TypeDescription> {
        self.by_id.get(&id).and_then(|&i| self.types.get(i))
    }

    /// Look up a description by binary name.
    #[inline]
    pub fn get_by_name(&self, name: Name) -> Option<&TypeDescription> {
        self.by_name.get(&name).and_then(|&i| self.types.get(i))
    }

    /// Check if a type is registered.
    #[inline]
    pub fn contains(&self, id: TypeId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Iterate over all descriptions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescription> {
        self.by_name.values().filter_map(|&i| self.types.get(i))
    }

    /// Number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl AncestryProvider for TypeTable {
    fn describe(&self, ty: TypeId) -> Option<&TypeDescription> {
        self.get(ty)
    }
}
