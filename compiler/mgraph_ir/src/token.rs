//! Declared method tokens.

use std::fmt;

use smallvec::SmallVec;

use crate::{MethodFlags, Name, StringInterner, TypeId, Visibility};

/// Erased parameter types, inline for the common short signatures.
pub type ParamList = SmallVec<[TypeId; 4]>;

/// One method as declared by exactly one type.
///
/// Parameter and return types are already erased to raw types. Tokens are
/// created by the loader, wrapped in `Arc`, and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodToken {
    /// The type whose declaration this is.
    pub declaring_type: TypeId,

    /// Method name.
    pub name: Name,

    /// Erased parameter types, in declaration order.
    pub parameters: ParamList,

    /// Erased return type.
    pub return_type: TypeId,

    /// Dispatch-relevant modifiers.
    pub flags: MethodFlags,

    /// Access level.
    pub visibility: Visibility,
}

impl MethodToken {
    /// Create a public, concrete token.
    pub fn new(
        declaring_type: TypeId,
        name: Name,
        parameters: impl IntoIterator<Item = TypeId>,
        return_type: TypeId,
    ) -> Self {
        Self {
            declaring_type,
            name,
            parameters: parameters.into_iter().collect(),
            return_type,
            flags: MethodFlags::empty(),
            visibility: Visibility::Public,
        }
    }

    /// Replace the modifier flags.
    #[must_use]
    pub fn with_flags(mut self, flags: MethodFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Replace the visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(MethodFlags::ABSTRACT)
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        self.flags.contains(MethodFlags::DEFAULT)
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MethodFlags::STATIC)
    }

    #[inline]
    pub fn is_bridge(&self) -> bool {
        self.flags.contains(MethodFlags::BRIDGE)
    }

    /// Whether this method takes part in receiver-based dispatch.
    ///
    /// Static and private methods are bound at the call site and are never
    /// inherited as dispatch targets.
    #[inline]
    pub fn is_virtual(&self) -> bool {
        !self.is_static() && !self.visibility.is_private()
    }

    /// The full erased descriptor of this declaration.
    pub fn method_type(&self) -> MethodType {
        MethodType {
            parameters: self.parameters.clone(),
            return_type: self.return_type,
        }
    }

    /// Render as `Owner.name(params)ret` for diagnostics.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> impl fmt::Display + 'a {
        TokenDisplay {
            token: self,
            interner,
        }
    }
}

struct TokenDisplay<'a> {
    token: &'a MethodToken,
    interner: &'a StringInterner,
}

impl fmt::Display for TokenDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}{}",
            self.token.declaring_type,
            self.interner.lookup(self.token.name),
            self.token.method_type()
        )
    }
}

/// An erased method descriptor: parameter types plus return type.
///
/// Two declarations that share a dispatch slot may still differ here (a
/// covariant override and its bridge); the graph keeps every distinct
/// descriptor seen for a slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodType {
    pub parameters: ParamList,
    pub return_type: TypeId,
}

impl fmt::Display for MethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, "){}", self.return_type)
    }
}
