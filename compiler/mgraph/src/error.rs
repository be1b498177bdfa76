//! Errors raised while building or querying a method graph.

use mgraph_ir::TypeId;

/// Method graph error.
///
/// Ancestry errors abort the build that hit them. `NotADefaultInterface`
/// and `IllegalResolution` signal a caller bug on an otherwise valid graph;
/// neither is ever used for a legitimately unresolved slot, which is a plain
/// [`Resolution::Illegal`](crate::Resolution::Illegal).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The provider has no description for a type the walk reached.
    #[error("no description for {0}")]
    UnknownType(TypeId),

    /// A superclass edge points at an interface.
    #[error("{ty} extends {super_class}, which is not a class")]
    NotAClass { ty: TypeId, super_class: TypeId },

    /// An interface edge points at a class.
    #[error("{ty} implements {listed}, which is not an interface")]
    NotAnInterface { ty: TypeId, listed: TypeId },

    /// The ancestry reaches a type from itself.
    #[error("type hierarchy is cyclic through {0}")]
    CyclicHierarchy(TypeId),

    /// `resolve_default` was asked about an interface outside the graph's
    /// default-method interfaces.
    #[error("{interface} is not a default-method interface of {target}")]
    NotADefaultInterface { target: TypeId, interface: TypeId },

    /// A method was extracted from an `Illegal` resolution.
    #[error("illegal resolution carries no method")]
    IllegalResolution,
}
