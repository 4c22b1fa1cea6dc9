/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::NodeId;
use std::collections::BTreeMap;

/// An immutable undirected graph with arbitrary integer node identifiers.
///
/// Node identifiers are compacted into dense indices assigned in increasing
/// identifier order, so iterating over indices visits identifiers in
/// ascending numeric order. Neighbor lists are stored as given: parallel
/// edges and self-loops are kept, and the insertion order is preserved.
///
/// Visits work on dense indices (see [`index_of`](Self::index_of) and
/// [`id`](Self::id)); the identifier-based methods are for everybody else.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct UndirectedGraph {
    /// The node identifiers, sorted in increasing order.
    ids: Vec<NodeId>,
    /// For each node index, the indices of its neighbors in insertion order.
    succ: Vec<Vec<usize>>,
    /// The total number of neighbor-list entries.
    number_of_arcs: u64,
}

impl UndirectedGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph from a list of undirected edges.
    ///
    /// For each edge `(u, v)`, both endpoints become nodes of the graph,
    /// then `v` is appended to the neighbors of `u` and `u` to the neighbors
    /// of `v`. No deduplication takes place: a self-loop `(u, u)` adds `u`
    /// twice to its own neighbor list.
    pub fn from_edges(edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Self {
        let mut adj: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        for (u, v) in edges {
            adj.entry(u).or_default().push(v);
            adj.entry(v).or_default().push(u);
        }
        Self::from_map(adj)
    }

    /// Creates a graph from an adjacency mapping.
    ///
    /// Neighbor lists are taken verbatim; in particular, they are not
    /// symmetrized. A neighbor that does not appear as a key is added as a
    /// node with no neighbors. If the same key appears more than once, the
    /// lists are concatenated.
    pub fn from_adjacency<S: IntoIterator<Item = NodeId>>(
        adjacency: impl IntoIterator<Item = (NodeId, S)>,
    ) -> Self {
        let mut adj: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        for (node, neighbors) in adjacency {
            let neighbors: Vec<NodeId> = neighbors.into_iter().collect();
            for &v in &neighbors {
                adj.entry(v).or_default();
            }
            adj.entry(node).or_default().extend(neighbors);
        }
        Self::from_map(adj)
    }

    fn from_map(adj: BTreeMap<NodeId, Vec<NodeId>>) -> Self {
        let ids: Vec<NodeId> = adj.keys().copied().collect();
        let mut number_of_arcs = 0;
        let succ = adj
            .into_values()
            .map(|neighbors| {
                number_of_arcs += neighbors.len() as u64;
                neighbors
                    .into_iter()
                    .map(|v| {
                        // Every neighbor has been registered as a key
                        ids.binary_search(&v).unwrap_or_else(|_| unreachable!())
                    })
                    .collect()
            })
            .collect();
        Self {
            ids,
            succ,
            number_of_arcs,
        }
    }

    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.ids.len()
    }

    /// Returns the total number of neighbor-list entries.
    ///
    /// Each edge read from an edge list accounts for two entries.
    pub fn num_arcs(&self) -> u64 {
        self.number_of_arcs
    }

    /// Returns whether `node` is a node of the graph.
    pub fn contains(&self, node: NodeId) -> bool {
        self.index_of(node).is_some()
    }

    /// Returns the dense index of `node`, if present.
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.ids.binary_search(&node).ok()
    }

    /// Returns the identifier of the node with dense index `index`.
    ///
    /// # Panics
    ///
    /// If `index` is not smaller than [`num_nodes`](Self::num_nodes).
    pub fn id(&self, index: usize) -> NodeId {
        self.ids[index]
    }

    /// Returns an iterator over the node identifiers in increasing order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }

    /// Returns the neighbors of `node` in insertion order, or `None` if
    /// `node` is not in the graph.
    pub fn neighbors(&self, node: NodeId) -> Option<impl ExactSizeIterator<Item = NodeId> + '_> {
        self.index_of(node)
            .map(|index| self.succ[index].iter().map(|&v| self.ids[v]))
    }

    /// Returns the number of neighbor-list entries of `node`, or `None` if
    /// `node` is not in the graph.
    pub fn degree(&self, node: NodeId) -> Option<usize> {
        self.index_of(node).map(|index| self.succ[index].len())
    }

    /// Returns the dense indices of the neighbors of the node with index
    /// `index`, in insertion order.
    #[inline(always)]
    pub fn successors(&self, index: usize) -> &[usize] {
        &self.succ[index]
    }
}
