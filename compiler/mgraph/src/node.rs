//! Finalized dispatch slots.

use mgraph_ir::MethodType;
use smallvec::SmallVec;

use crate::{Candidate, Resolution, SignatureKey};

/// How a slot finalized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeSort {
    /// Exactly one undominated candidate, and it has a body.
    Resolved,
    /// Exactly one undominated candidate, and it is abstract.
    Abstract,
    /// Several undominated candidates from unrelated interfaces.
    Ambiguous,
}

/// One finalized slot as seen from the queried type.
///
/// Besides the surviving candidates, a node remembers every distinct erased
/// descriptor that was declared for its key anywhere in the ancestry,
/// including declarations that lost. A caller emitting the dispatch needs
/// those to know which bridges the slot must answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub(crate) key: SignatureKey,
    pub(crate) sort: NodeSort,
    pub(crate) candidates: SmallVec<[Candidate; 1]>,
    pub(crate) method_types: SmallVec<[MethodType; 1]>,
}

impl Node {
    #[inline]
    pub fn key(&self) -> &SignatureKey {
        &self.key
    }

    #[inline]
    pub fn sort(&self) -> NodeSort {
        self.sort
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.sort == NodeSort::Resolved
    }

    /// The single surviving candidate; `None` when ambiguous.
    pub fn representative(&self) -> Option<&Candidate> {
        match self.sort {
            NodeSort::Resolved | NodeSort::Abstract => self.candidates.first(),
            NodeSort::Ambiguous => None,
        }
    }

    /// All undominated candidates, in discovery order.
    #[inline]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Every distinct descriptor declared for this slot, in discovery order.
    #[inline]
    pub fn method_types(&self) -> &[MethodType] {
        &self.method_types
    }

    /// Whether the winner is an interface default.
    pub fn is_default(&self) -> bool {
        self.representative().is_some_and(Candidate::is_default)
    }

    /// Whether the winner is a bridge.
    pub fn is_bridge(&self) -> bool {
        self.representative().is_some_and(Candidate::is_bridge)
    }

    /// Dispatch outcome for this slot.
    pub fn resolution(&self) -> Resolution {
        match (self.sort, self.candidates.first()) {
            (NodeSort::Resolved, Some(winner)) => Resolution::ForMethod(winner.clone()),
            _ => Resolution::Illegal,
        }
    }
}
