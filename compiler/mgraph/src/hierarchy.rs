//! Ancestry of one queried type.
//!
//! Collects, in the order the merge engine consumes them:
//! - the superclass chain, most specific first
//! - every reachable interface, each exactly once, depth-first in
//!   declaration order
//! - for each reachable interface, the set of its strict super-interfaces,
//!   which is what interface specificity is decided on
//!
//! Malformed ancestry (unknown types, kind mismatches, cycles) is reported
//! here so the engine can assume a well-formed DAG.

use mgraph_ir::{AncestryProvider, TypeDescription, TypeId};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::GraphError;

/// A type reached by the walk and the depth it was first reached at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Reached {
    pub ty: TypeId,
    pub depth: u32,
}

/// Collected ancestry of one queried type.
#[derive(Debug)]
pub(crate) struct Ancestry<'p> {
    /// The queried type.
    pub target: &'p TypeDescription,

    /// Superclasses, most specific first (depth 1, 2, ...).
    pub super_chain: Vec<(Reached, &'p TypeDescription)>,

    /// Reachable interfaces in discovery order, excluding the target itself.
    pub interfaces: Vec<(Reached, &'p TypeDescription)>,

    /// Strict super-interfaces of every reachable interface.
    supers: FxHashMap<TypeId, FxHashSet<TypeId>>,

    /// Discovery depth of every reached type.
    depths: FxHashMap<TypeId, u32>,
}

impl<'p> Ancestry<'p> {
    /// Walk the ancestry of `target`.
    pub fn collect<P>(provider: &'p P, target: TypeId) -> Result<Self, GraphError>
    where
        P: AncestryProvider + ?Sized,
    {
        let target_desc = describe(provider, target)?;

        let mut ancestry = Ancestry {
            target: target_desc,
            super_chain: Vec::new(),
            interfaces: Vec::new(),
            supers: FxHashMap::default(),
            depths: FxHashMap::default(),
        };
        ancestry.depths.insert(target, 0);

        ancestry.walk_super_chain(provider)?;
        ancestry.walk_interfaces(provider)?;
        ancestry.close_super_interfaces()?;
        Ok(ancestry)
    }

    fn walk_super_chain<P>(&mut self, provider: &'p P) -> Result<(), GraphError>
    where
        P: AncestryProvider + ?Sized,
    {
        let mut current = self.target;
        let mut depth = 0;
        while let Some(super_class) = current.super_class {
            if self.depths.contains_key(&super_class) {
                return Err(GraphError::CyclicHierarchy(super_class));
            }
            let desc = describe(provider, super_class)?;
            if !desc.is_class() {
                return Err(GraphError::NotAClass {
                    ty: current.id,
                    super_class,
                });
            }
            depth += 1;
            self.depths.insert(super_class, depth);
            self.super_chain.push((
                Reached {
                    ty: super_class,
                    depth,
                },
                desc,
            ));
            current = desc;
        }
        Ok(())
    }

    /// Depth-first, pre-order, declaration order; roots are the target's own
    /// interfaces, then each superclass's interfaces in chain order. A type
    /// already visited is skipped, which collapses diamonds.
    fn walk_interfaces<P>(&mut self, provider: &'p P) -> Result<(), GraphError>
    where
        P: AncestryProvider + ?Sized,
    {
        let roots: Vec<(&'p TypeDescription, u32)> = std::iter::once((self.target, 0))
            .chain(self.super_chain.iter().map(|(r, d)| (*d, r.depth)))
            .collect();

        let mut visited: FxHashSet<TypeId> = FxHashSet::default();
        if self.target.is_interface() {
            visited.insert(self.target.id);
        }

        for (owner, owner_depth) in roots {
            // (listing type, listed interface, depth)
            let mut stack: Vec<(TypeId, TypeId, u32)> = owner
                .interfaces
                .iter()
                .rev()
                .map(|&i| (owner.id, i, owner_depth + 1))
                .collect();

            while let Some((lister, iface, depth)) = stack.pop() {
                if !visited.insert(iface) {
                    continue;
                }
                let desc = describe(provider, iface)?;
                if !desc.is_interface() {
                    return Err(GraphError::NotAnInterface {
                        ty: lister,
                        listed: iface,
                    });
                }
                self.depths.entry(iface).or_insert(depth);
                self.interfaces.push((Reached { ty: iface, depth }, desc));
                stack.extend(desc.interfaces.iter().rev().map(|&i| (iface, i, depth + 1)));
            }
        }
        Ok(())
    }

    /// Compute strict super-interface sets; an interface in its own set
    /// closes a cycle.
    fn close_super_interfaces(&mut self) -> Result<(), GraphError> {
        let mut direct: FxHashMap<TypeId, &[TypeId]> = self
            .interfaces
            .iter()
            .map(|(r, d)| (r.ty, d.interfaces.as_slice()))
            .collect();
        if self.target.is_interface() {
            direct.insert(self.target.id, self.target.interfaces.as_slice());
        }

        for &(reached, desc) in &self.interfaces {
            let mut closure: FxHashSet<TypeId> = FxHashSet::default();
            let mut pending: Vec<TypeId> = desc.interfaces.clone();
            while let Some(next) = pending.pop() {
                if closure.insert(next) {
                    pending.extend(direct.get(&next).copied().unwrap_or_default());
                }
            }
            if closure.contains(&reached.ty) {
                return Err(GraphError::CyclicHierarchy(reached.ty));
            }
            self.supers.insert(reached.ty, closure);
        }
        Ok(())
    }

    /// Whether `sub` strictly extends `sup`, directly or transitively.
    #[inline]
    pub fn extends(&self, sub: TypeId, sup: TypeId) -> bool {
        self.supers.get(&sub).is_some_and(|s| s.contains(&sup))
    }

    /// Strict super-interfaces of `iface`, in discovery order.
    pub fn interface_closure(
        &self,
        iface: TypeId,
    ) -> impl Iterator<Item = &(Reached, &'p TypeDescription)> + '_ {
        self.interfaces
            .iter()
            .filter(move |(r, _)| self.extends(iface, r.ty))
    }

    /// Depth at which `ty` was first reached from the target.
    #[inline]
    pub fn depth_of(&self, ty: TypeId) -> u32 {
        self.depths.get(&ty).copied().unwrap_or(0)
    }
}

fn describe<P>(provider: &P, ty: TypeId) -> Result<&TypeDescription, GraphError>
where
    P: AncestryProvider + ?Sized,
{
    provider.describe(ty).ok_or(GraphError::UnknownType(ty))
}
