//! Method graph - virtual and default-method dispatch resolution.
//!
//! Given one class or interface and a provider of its ancestry, the
//! [`Fabricator`] merges every method declared along the superclass chain
//! and across all reachable interfaces into a [`MethodGraph`]: one
//! finalized slot per [`SignatureKey`], answering which declaration a
//! virtual, super or explicit `Interface.super` call dispatches to.
//!
//! # Merge Rules
//!
//! - The queried type's own declarations win outright
//! - Along the superclass chain the most specific concrete declaration wins;
//!   an abstract re-declaration only holds the slot until a body further up
//!   the chain displaces it, never the reverse
//! - Class declarations dominate interface declarations
//! - Among interfaces only the most specific survive; two unrelated
//!   survivors make the slot ambiguous, never tie-broken
//! - A slot without exactly one concrete survivor resolves `Illegal`
//!
//! # Example
//!
//! ```ignore
//! let mut h = HierarchyBuilder::new();
//! let x = h.interface("p.X").default_method("run", &[]).build()?;
//! let y = h.interface("p.Y").default_method("run", &[]).build()?;
//! let both = h.class("p.Both").implements(x).implements(y).build()?;
//! let (table, interner) = h.finish()?;
//!
//! let graph = Fabricator::new().fabricate(&table, both)?;
//! let run = SignatureKey::new(interner.intern("run"), []);
//! assert_eq!(graph.resolve(&run), Resolution::Illegal);
//! assert!(graph.resolve_default(x, &run)?.is_resolved());
//! ```

mod cache;
mod candidate;
mod config;
mod error;
mod fabricator;
mod graph;
mod hierarchy;
mod key;
mod merge;
mod node;
mod resolution;

pub use cache::GraphCache;
pub use candidate::Candidate;
pub use config::{DefaultScope, FabricatorConfig};
pub use error::GraphError;
pub use fabricator::Fabricator;
pub use graph::MethodGraph;
pub use key::{
    DescriptorKeyFactory, Discriminator, JavaKeyFactory, KeyFactory, PackageScopedKeyFactory,
    SignatureKey,
};
pub use node::{Node, NodeSort};
pub use resolution::Resolution;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for graph construction.
///
/// Safe to call multiple times; only the first call does anything, and only
/// when `RUST_LOG` is set. Enable with `RUST_LOG=mgraph=debug` for one event
/// per graph, `RUST_LOG=mgraph=trace` for one per slot.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Candidate;

    mgraph_ir::static_assert_size!(Candidate, 16);
    mgraph_ir::static_assert_size!(Option<Candidate>, 16);
}
