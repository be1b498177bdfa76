//! The finished, queryable method graph of one type.

use mgraph_ir::TypeId;
use rustc_hash::FxHashMap;

use crate::merge::Merged;
use crate::{Candidate, GraphError, Node, Resolution, SignatureKey};

/// Default methods one interface would contribute on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
struct DefaultTable {
    interface: TypeId,
    methods: FxHashMap<SignatureKey, Candidate>,
}

/// Dispatch tables for one queried type.
///
/// Built once by a [`Fabricator`](crate::Fabricator) and immutable afterwards,
/// so a graph can be shared across threads and queried concurrently.
///
/// # Tables
///
/// - nodes: one per key seen anywhere in the ancestry, in first-discovery
///   order, answering `resolve`
/// - invokable methods: the winner of every resolved node, same order
/// - default tables: per interface, what that interface alone would
///   contribute, answering `resolve_default`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodGraph {
    type_id: TypeId,
    nodes: Vec<Node>,
    index: FxHashMap<SignatureKey, usize>,
    invokable: Vec<Candidate>,
    default_tables: Vec<DefaultTable>,
    default_index: FxHashMap<TypeId, usize>,
}

impl MethodGraph {
    pub(crate) fn new(type_id: TypeId, merged: Merged) -> Self {
        let Merged {
            nodes,
            default_tables,
        } = merged;

        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.key.clone(), i))
            .collect();
        let invokable = nodes
            .iter()
            .filter_map(|node| node.resolution().into_method().ok())
            .collect();

        let default_tables: Vec<DefaultTable> = default_tables
            .into_iter()
            .map(|(interface, methods)| DefaultTable { interface, methods })
            .collect();
        let default_index = default_tables
            .iter()
            .enumerate()
            .map(|(i, table)| (table.interface, i))
            .collect();

        MethodGraph {
            type_id,
            nodes,
            index,
            invokable,
            default_tables,
            default_index,
        }
    }

    /// The queried type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Which method answers a virtual or super call for `key`.
    ///
    /// Unknown keys, abstract slots and ambiguous slots are all
    /// [`Resolution::Illegal`].
    pub fn resolve(&self, key: &SignatureKey) -> Resolution {
        self.locate(key).map_or(Resolution::Illegal, Node::resolution)
    }

    /// Which default method `interface` alone would contribute for `key`,
    /// ignoring overrides by the class and by sibling interfaces.
    ///
    /// `interface` must be one of [`default_interfaces`](Self::default_interfaces);
    /// anything else is [`GraphError::NotADefaultInterface`].
    pub fn resolve_default(
        &self,
        interface: TypeId,
        key: &SignatureKey,
    ) -> Result<Resolution, GraphError> {
        let table = self
            .default_index
            .get(&interface)
            .map(|&i| &self.default_tables[i])
            .ok_or(GraphError::NotADefaultInterface {
                target: self.type_id,
                interface,
            })?;
        Ok(table
            .methods
            .get(key)
            .map_or(Resolution::Illegal, |c| Resolution::ForMethod(c.clone())))
    }

    /// Winner of every slot that resolved to a body, in first-discovery order.
    #[inline]
    pub fn invokable_methods(&self) -> &[Candidate] {
        &self.invokable
    }

    /// The finalized slot for `key`.
    pub fn locate(&self, key: &SignatureKey) -> Option<&Node> {
        self.index.get(key).map(|&i| &self.nodes[i])
    }

    /// Every finalized slot, in first-discovery order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Interfaces `resolve_default` accepts, in discovery order.
    pub fn default_interfaces(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.default_tables.iter().map(|table| table.interface)
    }
}
