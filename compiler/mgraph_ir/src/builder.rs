//! Fluent construction of type tables.
//!
//! Loaders and tests describe a hierarchy by name; the builder assigns type
//! identities, interns names, derives packages from binary names, and
//! registers each finished type in a [`TypeTable`].
//!
//! ```text
//! let mut h = HierarchyBuilder::new();
//! let top = h.interface("p.Top").default_method("run", &[]).build()?;
//! let sub = h.class("p.Impl").implements(top).build()?;
//! let (table, interner) = h.finish()?;
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{
    MethodFlags, MethodToken, Name, SharedInterner, TableError, TypeDescription, TypeId,
    TypeKind, TypeTable, Visibility,
};

/// Builds a [`TypeTable`] one type at a time.
///
/// Identities are handed out by name, so a type can be referenced (through
/// [`HierarchyBuilder::id_of`]) before it is built.
#[derive(Debug)]
pub struct HierarchyBuilder {
    interner: SharedInterner,
    table: TypeTable,
    ids: FxHashMap<Name, TypeId>,
    next_id: u32,
}

impl HierarchyBuilder {
    /// Create a builder with a fresh interner.
    pub fn new() -> Self {
        Self::with_interner(SharedInterner::new())
    }

    /// Create a builder that interns into an existing interner.
    pub fn with_interner(interner: SharedInterner) -> Self {
        Self {
            interner,
            table: TypeTable::new(),
            ids: FxHashMap::default(),
            next_id: TypeId::FIRST_DYNAMIC,
        }
    }

    /// The identity for a binary name, allocating one on first use.
    pub fn id_of(&mut self, binary_name: &str) -> TypeId {
        let name = self.interner.intern(binary_name);
        *self.ids.entry(name).or_insert_with(|| {
            let id = TypeId::from_raw(self.next_id);
            self.next_id += 1;
            id
        })
    }

    /// Start describing a class.
    pub fn class(&mut self, binary_name: &str) -> TypeBuilder<'_> {
        self.start(binary_name, TypeKind::Class)
    }

    /// Start describing an interface.
    pub fn interface(&mut self, binary_name: &str) -> TypeBuilder<'_> {
        self.start(binary_name, TypeKind::Interface)
    }

    fn start(&mut self, binary_name: &str, kind: TypeKind) -> TypeBuilder<'_> {
        let id = self.id_of(binary_name);
        let mut desc = TypeDescription::new(id, self.interner.intern(binary_name), kind);
        if let Some((package, _)) = binary_name.rsplit_once('.') {
            desc.package = self.interner.intern(package);
        }
        TypeBuilder { owner: self, desc }
    }

    /// The interner names are recorded in.
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// The table built so far.
    pub fn table(&self) -> &TypeTable {
        &self.table
    }

    /// Validate cross-type references and hand out the finished table.
    pub fn finish(self) -> Result<(TypeTable, SharedInterner), TableError> {
        self.table.validate()?;
        Ok((self.table, self.interner))
    }
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Describes one type; registered on [`TypeBuilder::build`].
#[derive(Debug)]
pub struct TypeBuilder<'a> {
    owner: &'a mut HierarchyBuilder,
    desc: TypeDescription,
}

impl TypeBuilder<'_> {
    /// Set the direct superclass.
    #[must_use]
    pub fn extends(mut self, super_class: TypeId) -> Self {
        self.desc.super_class = Some(super_class);
        self
    }

    /// Add a direct interface (implemented by a class, extended by an interface).
    #[must_use]
    pub fn implements(mut self, interface: TypeId) -> Self {
        self.desc.interfaces.push(interface);
        self
    }

    /// Declare a method with full control over its descriptor and modifiers.
    #[must_use]
    pub fn method(
        mut self,
        name: &str,
        params: &[TypeId],
        return_type: TypeId,
        flags: MethodFlags,
        visibility: Visibility,
    ) -> Self {
        let token = MethodToken::new(
            self.desc.id,
            self.owner.interner.intern(name),
            params.iter().copied(),
            return_type,
        )
        .with_flags(flags)
        .with_visibility(visibility);
        self.desc.methods.push(Arc::new(token));
        self
    }

    /// Declare a public concrete `void` method.
    #[must_use]
    pub fn concrete(self, name: &str, params: &[TypeId]) -> Self {
        self.method(
            name,
            params,
            TypeId::VOID,
            MethodFlags::empty(),
            Visibility::Public,
        )
    }

    /// Declare a public abstract `void` method.
    #[must_use]
    pub fn abstract_method(self, name: &str, params: &[TypeId]) -> Self {
        self.method(
            name,
            params,
            TypeId::VOID,
            MethodFlags::ABSTRACT,
            Visibility::Public,
        )
    }

    /// Declare a public default `void` method (interfaces only).
    #[must_use]
    pub fn default_method(self, name: &str, params: &[TypeId]) -> Self {
        self.method(
            name,
            params,
            TypeId::VOID,
            MethodFlags::DEFAULT,
            Visibility::Public,
        )
    }

    /// Register the described type and return its identity.
    pub fn build(self) -> Result<TypeId, TableError> {
        let id = self.desc.id;
        self.owner.table.register(self.desc)?;
        Ok(id)
    }
}
