//! Per-type memoization of method graphs.

use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use mgraph_ir::{AncestryProvider, TypeId};
use parking_lot::Mutex;
use rustc_hash::FxBuildHasher;
use tracing::trace;

use crate::{Fabricator, GraphError, JavaKeyFactory, KeyFactory, MethodGraph};

/// Concurrent cache of finished graphs, keyed by queried type.
///
/// Each type is fabricated at most once. Every type gets its own slot, and a
/// miss builds the graph under that slot's lock only, with no map lock held:
/// concurrent callers asking for the same type wait and then share the
/// result, while callers asking for other types proceed. A provider may
/// itself request other types' graphs from the same cache while a build is
/// running, but never the graph of the type being built. Failed builds are
/// not cached.
///
/// The cache does not watch the provider. When a type's ancestry changes,
/// [`invalidate`](Self::invalidate) it and every type that inherits from it.
/// A build still running when its type is invalidated returns its graph to
/// its callers without caching it.
#[derive(Debug)]
pub struct GraphCache<K = JavaKeyFactory> {
    fabricator: Fabricator<K>,
    slots: DashMap<TypeId, Arc<Slot>, FxBuildHasher>,
}

/// One type's cache entry: the finished graph, once there is one.
#[derive(Debug, Default)]
struct Slot {
    graph: OnceLock<Arc<MethodGraph>>,
    building: Mutex<()>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::with_fabricator(Fabricator::new())
    }
}

impl Default for GraphCache {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: KeyFactory> GraphCache<K> {
    pub fn with_fabricator(fabricator: Fabricator<K>) -> Self {
        GraphCache {
            fabricator,
            slots: DashMap::with_hasher(FxBuildHasher),
        }
    }

    #[inline]
    pub fn fabricator(&self) -> &Fabricator<K> {
        &self.fabricator
    }

    /// The graph of `ty`, fabricated on first request.
    pub fn get_or_fabricate<P>(
        &self,
        provider: &P,
        ty: TypeId,
    ) -> Result<Arc<MethodGraph>, GraphError>
    where
        P: AncestryProvider + ?Sized,
    {
        let existing = self.slots.get(&ty).map(|slot| Arc::clone(slot.value()));
        let slot = existing
            .unwrap_or_else(|| Arc::clone(self.slots.entry(ty).or_default().value()));

        if let Some(graph) = slot.graph.get() {
            trace!(%ty, "graph cache hit");
            return Ok(Arc::clone(graph));
        }

        let building = slot.building.lock();
        // Another caller finished it while this one waited.
        if let Some(graph) = slot.graph.get() {
            trace!(%ty, "graph cache hit");
            return Ok(Arc::clone(graph));
        }

        trace!(%ty, "graph cache miss");
        match self.fabricator.fabricate(provider, ty) {
            Ok(graph) => Ok(Arc::clone(slot.graph.get_or_init(|| Arc::new(graph)))),
            Err(err) => {
                drop(building);
                let failed = self.slots.remove_if(&ty, |_, held| {
                    Arc::ptr_eq(held, &slot) && held.graph.get().is_none()
                });
                if failed.is_some() {
                    trace!(%ty, "dropped failed slot");
                }
                Err(err)
            }
        }
    }

    /// The cached graph of `ty`, without fabricating.
    pub fn get(&self, ty: TypeId) -> Option<Arc<MethodGraph>> {
        self.slots.get(&ty).and_then(|slot| slot.graph.get().cloned())
    }

    /// Drop the cached graph of `ty`; returns whether one was cached.
    pub fn invalidate(&self, ty: TypeId) -> bool {
        self.slots
            .remove(&ty)
            .is_some_and(|(_, slot)| slot.graph.get().is_some())
    }

    /// Drop every cached graph.
    pub fn clear(&self) {
        self.slots.clear();
    }

    /// Number of cached graphs; builds still running are not counted.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.graph.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        !self.slots.iter().any(|slot| slot.graph.get().is_some())
    }
}
