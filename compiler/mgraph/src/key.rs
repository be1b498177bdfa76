//! Signature keys and the factories that mint them.
//!
//! A `SignatureKey` names one dispatch slot. Every table the merge engine
//! builds is keyed by it, so two declarations share a slot exactly when their
//! keys are equal, no matter which types declare them.
//!
//! How a declaration maps to a key is a policy, not a rule: the engine only
//! talks to a [`KeyFactory`], and this module ships three of them.

use std::fmt;
use std::hash::{Hash, Hasher};

use mgraph_ir::{MethodToken, Name, ParamList, StringInterner, TypeDescription, TypeId};

/// Identity of a dispatch slot: method name plus erased parameter types.
///
/// Equality compares the name, every parameter positionally, and the
/// optional policy discriminator. The return type only matters when a
/// factory puts it into the discriminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureKey {
    name: Name,
    parameters: ParamList,
    discriminator: Option<Discriminator>,
}

/// Extra identity a key policy can attach on top of name and parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Discriminator {
    /// Erased return type (descriptor-level identity).
    ReturnType(TypeId),
    /// Declaring package of a package-private method.
    Package(Name),
}

impl SignatureKey {
    /// Create a key from a name and erased parameter types.
    pub fn new(name: Name, parameters: impl IntoIterator<Item = TypeId>) -> Self {
        Self {
            name,
            parameters: parameters.into_iter().collect(),
            discriminator: None,
        }
    }

    /// Attach a policy discriminator.
    #[must_use]
    pub fn with_discriminator(mut self, discriminator: Discriminator) -> Self {
        self.discriminator = Some(discriminator);
        self
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    #[inline]
    pub fn parameters(&self) -> &[TypeId] {
        &self.parameters
    }

    #[inline]
    pub fn discriminator(&self) -> Option<Discriminator> {
        self.discriminator
    }

    /// Positional hash over name and parameters:
    /// `h = name; for p in params { h = h * 31 + p }`.
    pub fn slot_hash(&self) -> u32 {
        self.parameters
            .iter()
            .fold(self.name.raw(), |h, p| h.wrapping_mul(31).wrapping_add(p.raw()))
    }

    /// Render as `name(params)` for diagnostics.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> impl fmt::Display + 'a {
        KeyDisplay {
            key: self,
            interner,
        }
    }
}

impl Hash for SignatureKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.slot_hash());
        self.discriminator.hash(state);
    }
}

struct KeyDisplay<'a> {
    key: &'a SignatureKey,
    interner: &'a StringInterner,
}

impl fmt::Display for KeyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.interner.lookup(self.key.name))?;
        for (i, param) in self.key.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")?;
        match self.key.discriminator {
            Some(Discriminator::ReturnType(ret)) => write!(f, "{ret}"),
            Some(Discriminator::Package(package)) => {
                write!(f, " in '{}'", self.interner.lookup(package))
            }
            None => Ok(()),
        }
    }
}

/// Policy mapping a declared method to its dispatch slot.
///
/// `declaring` is the description of `token.declaring_type`, for policies
/// that need more than the token itself.
pub trait KeyFactory: Send + Sync {
    fn make(&self, token: &MethodToken, declaring: &TypeDescription) -> SignatureKey;
}

/// Source-language identity: name and erased parameter types.
///
/// Covariant overrides share a slot with what they override.
#[derive(Copy, Clone, Debug, Default)]
pub struct JavaKeyFactory;

impl KeyFactory for JavaKeyFactory {
    fn make(&self, token: &MethodToken, _declaring: &TypeDescription) -> SignatureKey {
        SignatureKey::new(token.name, token.parameters.iter().copied())
    }
}

/// Descriptor identity: the erased return type is part of the slot.
///
/// Matches how the virtual machine links call sites; a covariant override
/// and its bridge land in different slots.
#[derive(Copy, Clone, Debug, Default)]
pub struct DescriptorKeyFactory;

impl KeyFactory for DescriptorKeyFactory {
    fn make(&self, token: &MethodToken, _declaring: &TypeDescription) -> SignatureKey {
        SignatureKey::new(token.name, token.parameters.iter().copied())
            .with_discriminator(Discriminator::ReturnType(token.return_type))
    }
}

/// Source-language identity, except that package-private methods are
/// additionally scoped to their declaring package.
///
/// A package-private method cannot be overridden from another package, so
/// two such declarations in different packages never share a slot.
#[derive(Copy, Clone, Debug, Default)]
pub struct PackageScopedKeyFactory;

impl KeyFactory for PackageScopedKeyFactory {
    fn make(&self, token: &MethodToken, declaring: &TypeDescription) -> SignatureKey {
        let key = SignatureKey::new(token.name, token.parameters.iter().copied());
        if token.visibility.is_package_private() {
            key.with_discriminator(Discriminator::Package(declaring.package))
        } else {
            key
        }
    }
}
