//! The merge engine.
//!
//! One pass over the ancestry fills an index-addressed table of slots, one
//! per distinct key. Each slot is a small state machine:
//!
//! ```text
//! Unoccupied -> Declared | Class | Interfaces(frontier)
//!            -> { Resolved | Abstract | Ambiguous }
//! ```
//!
//! Declarations arrive strictly in precedence order: the target's own, then
//! the superclass chain outward, then interfaces in discovery order. A slot
//! taken by `Declared` is final. A `Class` slot holding an abstract method
//! is a placeholder: a concrete declaration further up the chain replaces
//! it, while an abstract one never replaces anything. An interface frontier
//! is kept as an antichain under interface reachability, so only the most
//! specific interface declarations survive regardless of discovery order.

use std::sync::Arc;

use mgraph_ir::{MethodToken, MethodType, TypeDescription, TypeId};
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};

use crate::hierarchy::Ancestry;
use crate::{Candidate, DefaultScope, FabricatorConfig, KeyFactory, Node, NodeSort, SignatureKey};

/// Where a declaration came from, relative to the type being merged.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Origin {
    /// Declared by the type itself.
    Declared,
    /// Declared by a superclass.
    Class,
    /// Declared by a reachable interface.
    Interface,
}

/// Occupancy of one slot.
#[derive(Debug)]
enum Slot {
    Unoccupied,
    Declared(Candidate),
    Class(Candidate),
    Interfaces(SmallVec<[Candidate; 2]>),
}

#[derive(Debug)]
struct Bucket {
    key: SignatureKey,
    slot: Slot,
    method_types: SmallVec<[MethodType; 1]>,
}

/// Slot table for one merge, addressed through a key index.
struct Registry<'a, K: ?Sized> {
    keys: &'a K,
    ancestry: &'a Ancestry<'a>,
    buckets: Vec<Bucket>,
    index: FxHashMap<SignatureKey, usize>,
}

impl<'a, K: KeyFactory + ?Sized> Registry<'a, K> {
    fn new(keys: &'a K, ancestry: &'a Ancestry<'a>) -> Self {
        Registry {
            keys,
            ancestry,
            buckets: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    fn bucket(&mut self, key: &SignatureKey) -> &mut Bucket {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                let idx = self.buckets.len();
                self.buckets.push(Bucket {
                    key: key.clone(),
                    slot: Slot::Unoccupied,
                    method_types: SmallVec::new(),
                });
                self.index.insert(key.clone(), idx);
                idx
            }
        };
        &mut self.buckets[idx]
    }

    /// Offer every declaration of `desc` at `depth`.
    ///
    /// Tokens of one type that share a key collapse into a single candidate
    /// (the first non-bridge one); the rest only contribute method types.
    fn offer_type(
        &mut self,
        desc: &TypeDescription,
        depth: u32,
        origin: Origin,
        include_non_virtual: bool,
    ) {
        let mut local: Vec<(SignatureKey, &Arc<MethodToken>)> = Vec::new();
        let mut local_index: FxHashMap<SignatureKey, usize> = FxHashMap::default();

        for token in &desc.methods {
            if !token.is_virtual() && !include_non_virtual {
                continue;
            }
            let key = self.keys.make(token, desc);

            let method_type = token.method_type();
            let bucket = self.bucket(&key);
            if !bucket.method_types.contains(&method_type) {
                bucket.method_types.push(method_type);
            }

            match local_index.get(&key) {
                Some(&idx) => {
                    let held = &mut local[idx].1;
                    if held.is_bridge() && !token.is_bridge() {
                        *held = token;
                    }
                }
                None => {
                    local_index.insert(key.clone(), local.len());
                    local.push((key, token));
                }
            }
        }

        for (key, token) in local {
            self.offer(&key, Candidate::new(Arc::clone(token), depth), origin);
        }
    }

    fn offer(&mut self, key: &SignatureKey, candidate: Candidate, origin: Origin) {
        let ancestry = self.ancestry;
        let slot = &mut self.bucket(key).slot;
        match origin {
            Origin::Declared => {
                if matches!(slot, Slot::Unoccupied | Slot::Interfaces(_)) {
                    *slot = Slot::Declared(candidate);
                }
            }
            Origin::Class => match slot {
                Slot::Unoccupied | Slot::Interfaces(_) => *slot = Slot::Class(candidate),
                // A body further out fills an abstract placeholder, never the reverse.
                Slot::Class(held) if held.is_abstract() && !candidate.is_abstract() => {
                    *held = candidate;
                }
                Slot::Declared(_) | Slot::Class(_) => {}
            },
            Origin::Interface => match slot {
                Slot::Unoccupied => *slot = Slot::Interfaces(smallvec![candidate]),
                Slot::Interfaces(frontier) => insert_most_specific(frontier, candidate, ancestry),
                Slot::Declared(_) | Slot::Class(_) => {}
            },
        }
    }

    fn finish(self) -> Vec<Node> {
        let mut nodes = Vec::with_capacity(self.buckets.len());
        for bucket in self.buckets {
            let candidates: SmallVec<[Candidate; 1]> = match bucket.slot {
                Slot::Unoccupied => continue,
                Slot::Declared(c) | Slot::Class(c) => smallvec![c],
                Slot::Interfaces(frontier) => frontier.into_iter().collect(),
            };
            let sort = match candidates.as_slice() {
                [only] if only.is_abstract() => NodeSort::Abstract,
                [_] => NodeSort::Resolved,
                _ => NodeSort::Ambiguous,
            };

            if sort == NodeSort::Ambiguous {
                let owners: Vec<TypeId> = candidates.iter().map(Candidate::declaring_type).collect();
                debug!(key = ?bucket.key, ?owners, "ambiguous slot");
            } else {
                trace!(key = ?bucket.key, ?sort, "slot finalized");
            }

            nodes.push(Node {
                key: bucket.key,
                sort,
                candidates,
                method_types: bucket.method_types,
            });
        }
        nodes
    }
}

/// Add `candidate` to an interface frontier, keeping only declarations no
/// other member's interface strictly extends.
fn insert_most_specific(
    frontier: &mut SmallVec<[Candidate; 2]>,
    candidate: Candidate,
    ancestry: &Ancestry<'_>,
) {
    let incoming = candidate.declaring_type();
    let dominated = frontier.iter().any(|held| {
        let held = held.declaring_type();
        held == incoming || ancestry.extends(held, incoming)
    });
    if dominated {
        return;
    }
    frontier.retain(|held| !ancestry.extends(incoming, held.declaring_type()));
    frontier.push(candidate);
}

/// Everything a method graph is built from.
#[derive(Debug)]
pub(crate) struct Merged {
    /// One node per key, in first-discovery order.
    pub nodes: Vec<Node>,
    /// Resolved defaults per interface, in discovery order.
    pub default_tables: Vec<(TypeId, FxHashMap<SignatureKey, Candidate>)>,
}

/// Merge the ancestry of one type.
pub(crate) fn merge<K>(ancestry: &Ancestry<'_>, keys: &K, config: &FabricatorConfig) -> Merged
where
    K: KeyFactory + ?Sized,
{
    let mut registry = Registry::new(keys, ancestry);
    registry.offer_type(
        ancestry.target,
        0,
        Origin::Declared,
        config.include_non_virtual,
    );
    for (reached, desc) in &ancestry.super_chain {
        registry.offer_type(desc, reached.depth, Origin::Class, false);
    }
    for (reached, desc) in &ancestry.interfaces {
        registry.offer_type(desc, reached.depth, Origin::Interface, false);
    }
    let nodes = registry.finish();

    let scope: Vec<&TypeDescription> = match config.default_scope {
        DefaultScope::Transitive => ancestry.interfaces.iter().map(|(_, d)| *d).collect(),
        DefaultScope::Direct => ancestry
            .interfaces
            .iter()
            .filter(|(r, _)| ancestry.target.interfaces.contains(&r.ty))
            .map(|(_, d)| *d)
            .collect(),
    };
    let default_tables = scope
        .into_iter()
        .map(|iface| (iface.id, default_table(ancestry, keys, iface)))
        .collect();

    Merged {
        nodes,
        default_tables,
    }
}

/// What `iface` alone would contribute: its own declarations win, its
/// super-interfaces compete as usual, and only bodies are kept. Depths stay
/// relative to the queried type so candidates compare equal to the main
/// table's.
fn default_table<K>(
    ancestry: &Ancestry<'_>,
    keys: &K,
    iface: &TypeDescription,
) -> FxHashMap<SignatureKey, Candidate>
where
    K: KeyFactory + ?Sized,
{
    let mut registry = Registry::new(keys, ancestry);
    registry.offer_type(iface, ancestry.depth_of(iface.id), Origin::Declared, false);
    for (reached, desc) in ancestry.interface_closure(iface.id) {
        registry.offer_type(desc, reached.depth, Origin::Interface, false);
    }
    registry
        .finish()
        .into_iter()
        .filter(|node| node.sort == NodeSort::Resolved)
        .filter_map(|node| {
            let winner = node.candidates.into_iter().next()?;
            Some((node.key, winner))
        })
        .collect()
}
