//! Outcome of a single dispatch lookup.

use crate::{Candidate, GraphError};

/// Which method answers a dispatch, if any.
///
/// `Illegal` covers every case where no single body answers: no candidate,
/// only an abstract one, or an ambiguous set. Callers must pick another
/// strategy (synthesize a bridge, reject the type); the graph never guesses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// No single body answers this dispatch.
    Illegal,
    /// This body answers the dispatch.
    ForMethod(Candidate),
}

impl Resolution {
    #[inline]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::ForMethod(_))
    }

    /// The resolved method.
    ///
    /// Asking an `Illegal` resolution for its method is a caller bug and
    /// reported as [`GraphError::IllegalResolution`].
    pub fn method(&self) -> Result<&Candidate, GraphError> {
        match self {
            Self::ForMethod(candidate) => Ok(candidate),
            Self::Illegal => Err(GraphError::IllegalResolution),
        }
    }

    /// The resolved method, if any.
    #[inline]
    pub fn as_method(&self) -> Option<&Candidate> {
        match self {
            Self::ForMethod(candidate) => Some(candidate),
            Self::Illegal => None,
        }
    }

    /// Consume into the resolved method.
    pub fn into_method(self) -> Result<Candidate, GraphError> {
        match self {
            Self::ForMethod(candidate) => Ok(candidate),
            Self::Illegal => Err(GraphError::IllegalResolution),
        }
    }
}
