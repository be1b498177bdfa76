//! Type identity handle.
//!
//! `TypeId` names one type known to an ancestry provider: a class, an
//! interface, or an erased parameter/return type.
//!
//! # Design
//!
//! - 32-bit indices, Copy, O(1) equality
//! - Primitive types have fixed indices (0-8) so keys over `int`/`long`
//!   parameters never need a provider round-trip
//! - Everything from `FIRST_DYNAMIC` up is assigned by the provider

use std::fmt;

/// A 32-bit type identity.
///
/// Types are compared by identity, never structurally: two descriptions of
/// the same class must share one `TypeId`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    // === Primitive Types (indices 0-8) ===

    /// `void` (return position only).
    pub const VOID: Self = Self(0);
    /// `boolean`.
    pub const BOOLEAN: Self = Self(1);
    /// `byte`.
    pub const BYTE: Self = Self(2);
    /// `char`.
    pub const CHAR: Self = Self(3);
    /// `short`.
    pub const SHORT: Self = Self(4);
    /// `int`.
    pub const INT: Self = Self(5);
    /// `long`.
    pub const LONG: Self = Self(6);
    /// `float`.
    pub const FLOAT: Self = Self(7);
    /// `double`.
    pub const DOUBLE: Self = Self(8);

    // === Reserved Range (9-63) ===

    /// First index for provider-assigned types.
    pub const FIRST_DYNAMIC: u32 = 64;

    /// Create a type identity from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a primitive (or `void`).
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    /// Source-level name for primitives, `None` for provider-assigned types.
    #[inline]
    pub const fn primitive_name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("void"),
            1 => Some("boolean"),
            2 => Some("byte"),
            3 => Some("char"),
            4 => Some("short"),
            5 => Some("int"),
            6 => Some("long"),
            7 => Some("float"),
            8 => Some("double"),
            _ => None,
        }
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primitive_name() {
            Some(name) => write!(f, "TypeId::{}", name.to_ascii_uppercase()),
            None => write!(f, "TypeId({})", self.0),
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primitive_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "type#{}", self.0),
        }
    }
}
