//! Front door of the merge engine.

use mgraph_ir::{AncestryProvider, TypeId};
use rayon::prelude::*;

use crate::hierarchy::Ancestry;
use crate::{merge, FabricatorConfig, GraphError, JavaKeyFactory, KeyFactory, MethodGraph};

/// Builds method graphs with a fixed key policy and configuration.
///
/// A fabricator holds no per-query state; one instance can serve any number
/// of threads.
///
/// ```ignore
/// let graph = Fabricator::new().fabricate(&table, ty)?;
/// let winner = graph.resolve(&key);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Fabricator<K = JavaKeyFactory> {
    keys: K,
    config: FabricatorConfig,
}

impl Fabricator {
    /// Source-language keys, default configuration.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: KeyFactory> Fabricator<K> {
    /// Use `keys` as the key policy.
    pub fn with_keys(keys: K) -> Self {
        Fabricator {
            keys,
            config: FabricatorConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: FabricatorConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn config(&self) -> &FabricatorConfig {
        &self.config
    }

    #[inline]
    pub fn keys(&self) -> &K {
        &self.keys
    }

    /// Build the method graph of `ty`.
    #[tracing::instrument(level = "debug", skip_all, fields(ty = %ty))]
    pub fn fabricate<P>(&self, provider: &P, ty: TypeId) -> Result<MethodGraph, GraphError>
    where
        P: AncestryProvider + ?Sized,
    {
        let ancestry = Ancestry::collect(provider, ty)?;
        tracing::trace!(
            supers = ancestry.super_chain.len(),
            interfaces = ancestry.interfaces.len(),
            "ancestry collected"
        );
        let merged = merge::merge(&ancestry, &self.keys, &self.config);
        let graph = MethodGraph::new(ty, merged);
        tracing::debug!(
            nodes = graph.nodes().len(),
            invokable = graph.invokable_methods().len(),
            "graph built"
        );
        Ok(graph)
    }

    /// Build the graphs of `types` in parallel.
    ///
    /// Each type succeeds or fails on its own; results come back in input
    /// order.
    pub fn fabricate_all<P>(
        &self,
        provider: &P,
        types: &[TypeId],
    ) -> Vec<Result<MethodGraph, GraphError>>
    where
        P: AncestryProvider + Sync + ?Sized,
    {
        types
            .par_iter()
            .map(|&ty| self.fabricate(provider, ty))
            .collect()
    }
}
