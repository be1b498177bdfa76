//! Candidate methods.

use std::sync::Arc;

use mgraph_ir::{MethodToken, TypeId};

/// One declaration competing for a dispatch slot.
///
/// Wraps the shared token with the depth at which the walk discovered its
/// declaring type: 0 for the queried type, 1 for its direct supertypes, and
/// so on. Cloning only bumps the token's reference count.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Candidate {
    method: Arc<MethodToken>,
    depth: u32,
}

impl Candidate {
    pub fn new(method: Arc<MethodToken>, depth: u32) -> Self {
        Self { method, depth }
    }

    /// The shared declaration.
    #[inline]
    pub fn method(&self) -> &Arc<MethodToken> {
        &self.method
    }

    #[inline]
    pub fn declaring_type(&self) -> TypeId {
        self.method.declaring_type
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.method.is_abstract()
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        self.method.is_default()
    }

    #[inline]
    pub fn is_bridge(&self) -> bool {
        self.method.is_bridge()
    }

    /// Whether `other` refers to the very same declaration.
    #[inline]
    pub fn same_declaration(&self, other: &Candidate) -> bool {
        Arc::ptr_eq(&self.method, &other.method)
    }
}
