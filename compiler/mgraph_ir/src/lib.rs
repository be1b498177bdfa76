//! Method graph IR - type and method descriptions.
//!
//! This crate holds the data the method graph consumes:
//! - `TypeId` handles for classes, interfaces and erased parameter types
//! - `Name` handles for interned identifiers
//! - `MethodToken`: one declared method with its erased signature and flags
//! - `TypeDescription`: one type with its direct ancestry and declarations
//! - `AncestryProvider`: the capability the merge engine walks
//! - `TypeTable`: an in-memory provider, with `HierarchyBuilder` on top
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: strings are `Name(u32)`, types are `TypeId(u32)`
//! - **Erased Up Front**: parameter and return types arrive already erased;
//!   nothing here knows about generic substitution
//! - **Shared, Immutable Tokens**: declarations are `Arc<MethodToken>` so the
//!   graph can reference them from several tables without copying

mod builder;
mod description;
mod flags;
mod interner;
mod name;
mod table;
mod token;
mod type_id;

pub use builder::{HierarchyBuilder, TypeBuilder};
pub use description::{AncestryProvider, TypeDescription, TypeKind};
pub use flags::{MethodFlags, Visibility};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use table::{TableError, TypeTable};
pub use token::{MethodToken, MethodType, ParamList};
pub use type_id::TypeId;

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied handles.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{MethodFlags, Name, TypeId};
    static_assert_size!(TypeId, 4);
    static_assert_size!(Name, 4);
    static_assert_size!(MethodFlags, 2);
}
