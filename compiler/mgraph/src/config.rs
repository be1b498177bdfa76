//! Fabricator configuration.

/// Which interfaces get a default-method table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum DefaultScope {
    /// Only interfaces the queried type lists directly (the interfaces a
    /// source-level `Interface.super.method()` call may name).
    Direct,
    /// Every interface reachable from the queried type.
    #[default]
    Transitive,
}

/// Knobs for [`Fabricator`](crate::Fabricator).
///
/// The key policy is not configured here; it is the fabricator's key factory
/// type parameter.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FabricatorConfig {
    /// Include the queried type's own static and private methods. Inherited
    /// ones are never included; they are not dispatch targets.
    pub include_non_virtual: bool,

    /// Interfaces that get a default-method table.
    pub default_scope: DefaultScope,
}

impl FabricatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_non_virtual(mut self, include: bool) -> Self {
        self.include_non_virtual = include;
        self
    }

    #[must_use]
    pub fn with_default_scope(mut self, scope: DefaultScope) -> Self {
        self.default_scope = scope;
        self
    }
}
