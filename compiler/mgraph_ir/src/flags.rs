//! Method modifier flags and visibility.
//!
//! Flags are fixed by the loader when a token is materialized; the merge
//! engine only reads them.

use bitflags::bitflags;

bitflags! {
    /// Modifiers relevant to dispatch resolution.
    ///
    /// `DEFAULT` marks a concrete instance method declared on an interface.
    /// It is mutually exclusive with `ABSTRACT` and `STATIC`; the type table
    /// rejects tokens that combine them.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct MethodFlags: u16 {
        /// No body; occupies a slot without answering it.
        const ABSTRACT = 1 << 0;
        /// Interface-supplied body.
        const DEFAULT = 1 << 1;
        /// Not dispatched on a receiver.
        const STATIC = 1 << 2;
        /// Compiler-generated forwarder between erased signatures.
        const BRIDGE = 1 << 3;
        /// Compiler-generated.
        const SYNTHETIC = 1 << 4;
        /// Cannot be overridden.
        const FINAL = 1 << 5;
    }
}

impl MethodFlags {
    /// Check that no contradictory modifiers are combined.
    #[inline]
    pub fn is_consistent(self) -> bool {
        let default_conflict =
            self.contains(Self::DEFAULT) && self.intersects(Self::ABSTRACT | Self::STATIC);
        let abstract_conflict =
            self.contains(Self::ABSTRACT) && self.intersects(Self::STATIC | Self::FINAL);
        !(default_conflict || abstract_conflict)
    }
}

/// Access level of a declared method.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    /// Visible only inside the declaring type.
    Private,
    /// Visible inside the declaring type's package.
    PackagePrivate,
    /// Visible to subtypes and the declaring package.
    Protected,
    /// Visible everywhere.
    #[default]
    Public,
}

impl Visibility {
    /// Check if this is `Private`.
    #[inline]
    pub fn is_private(self) -> bool {
        self == Self::Private
    }

    /// Check if this is `PackagePrivate`.
    #[inline]
    pub fn is_package_private(self) -> bool {
        self == Self::PackagePrivate
    }
}
