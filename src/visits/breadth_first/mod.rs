/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Level-synchronous breadth-first visits.
//!
//! The visit in [`Seq`] accepts a callback receiving [`Event`]s, among which
//! a [`LevelDone`](Event::LevelDone) event carrying a [`Level`] view is
//! emitted at the end of each level. The free functions [`traverse`],
//! [`traverse_with`], and [`levels`] cover the common cases of collecting the
//! visit order and observing the levels.
//!
//! Neighbors are always expanded in increasing identifier order, and nodes
//! are marked as visited when they are discovered, so the visit order and
//! all levels depend only on the graph and on the start node, and not on the
//! order in which edges were inserted.

use crate::graphs::UndirectedGraph;
use crate::NodeId;
use no_break::{NoBreak, Unbreakable};
use std::ops::ControlFlow::{self, Continue};
use sux::bits::BitVec;
use thiserror::Error;

mod seq;
pub use seq::*;

/// Errors that can happen when starting a visit.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitError {
    #[error("Start node {0} not found in the graph.")]
    StartNotFound(NodeId),
}

/// Types of callback events generated during breadth-first visits.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// This event should be used to set up state at the start of the visit.
    Init {
        /// The start node.
        root: NodeId,
    },
    /// The node has been encountered for the first time: we are traversing a
    /// new tree edge, unless the node is the root.
    Unknown {
        /// The current node.
        node: NodeId,
        /// The node that discovered [node](`Event::Unknown::node`), or `None`
        /// for the root.
        pred: Option<NodeId>,
        /// The distance of the current node from the root.
        distance: usize,
    },
    /// The node has been encountered before: the edge is a self-loop, a
    /// parallel edge, or a non-tree edge.
    Known {
        /// The current node.
        node: NodeId,
        /// The node whose neighbors are being expanded.
        pred: NodeId,
    },
    /// The node has been extracted from the queue and its neighbors are
    /// about to be expanded. These events define the visit order.
    Dequeued {
        /// The current node.
        node: NodeId,
        /// The distance of the current node from the root.
        distance: usize,
    },
    /// All nodes at a given distance have been expanded.
    LevelDone(Level<'a>),
    /// The visit has been completed.
    ///
    /// Note that this event will not happen if the visit is stopped by a
    /// callback returning [`Break`](ControlFlow::Break).
    Done {
        /// The number of nodes visited.
        visited: usize,
    },
}

/// A view on the state of a visit at the end of a level.
///
/// The view is only valid during the callback; use
/// [`to_snapshot`](Self::to_snapshot) to keep it around.
#[derive(Debug, Clone, Copy)]
pub struct Level<'a> {
    graph: &'a UndirectedGraph,
    distance: usize,
    discovered: &'a [usize],
    /// Valid only for visited nodes; the root is its own predecessor.
    pred: &'a [usize],
    visited: &'a BitVec,
}

impl<'a> Level<'a> {
    /// Returns the distance from the root of the nodes expanded in this
    /// level. Nodes discovered in this level are at distance one more.
    pub fn distance(&self) -> usize {
        self.distance
    }

    /// Returns the nodes discovered while expanding this level, in discovery
    /// order.
    pub fn discovered(&self) -> impl ExactSizeIterator<Item = NodeId> + 'a {
        let graph = self.graph;
        self.discovered.iter().map(move |&node| graph.id(node))
    }

    /// Returns the parent of `node`, if `node` has been discovered so far.
    ///
    /// The root has parent `None`.
    pub fn parent(&self, node: NodeId) -> Option<Option<NodeId>> {
        let index = self.graph.index_of(node)?;
        self.visited[index].then(|| self.parent_of(index))
    }

    /// Returns all nodes discovered so far with their parents, in increasing
    /// node order.
    ///
    /// This method scans all nodes of the graph.
    pub fn parents(&self) -> impl Iterator<Item = (NodeId, Option<NodeId>)> + '_ {
        (0..self.graph.num_nodes())
            .filter(|&index| self.visited[index])
            .map(|index| (self.graph.id(index), self.parent_of(index)))
    }

    fn parent_of(&self, index: usize) -> Option<NodeId> {
        let pred = self.pred[index];
        (pred != index).then(|| self.graph.id(pred))
    }

    /// Returns an owned copy of this view.
    pub fn to_snapshot(&self) -> LevelSnapshot {
        LevelSnapshot {
            distance: self.distance,
            discovered: self.discovered().collect(),
            parents: self.parents().collect(),
        }
    }
}

/// An owned copy of a [`Level`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LevelSnapshot {
    /// The distance from the root of the nodes expanded in the level.
    pub distance: usize,
    /// The nodes discovered while expanding the level, in discovery order.
    pub discovered: Vec<NodeId>,
    /// All nodes discovered so far with their parents, in increasing node
    /// order.
    pub parents: Vec<(NodeId, Option<NodeId>)>,
}

/// Visits `graph` breadth-first from `start`, calling `on_level` at the end
/// of each level, and returns the visit order.
pub fn traverse_with(
    graph: &UndirectedGraph,
    start: NodeId,
    mut on_level: impl FnMut(&Level<'_>),
) -> Result<Vec<NodeId>, VisitError> {
    let mut order = Vec::new();
    Seq::new(graph)
        .visit(start, |event| -> ControlFlow<Unbreakable, ()> {
            match event {
                Event::Dequeued { node, .. } => order.push(node),
                Event::LevelDone(level) => on_level(&level),
                _ => {}
            }
            Continue(())
        })?
        .continue_value_no_break();
    Ok(order)
}

/// Visits `graph` breadth-first from `start` and returns the visit order.
///
/// # Examples
///
/// ```
/// use bfs_levels::prelude::*;
///
/// let graph = UndirectedGraph::from_edges([(1, 2), (1, 3), (2, 4)]);
/// assert_eq!(breadth_first::traverse(&graph, 1)?, vec![1, 2, 3, 4]);
/// assert!(breadth_first::traverse(&graph, 99).is_err());
/// # Ok::<(), breadth_first::VisitError>(())
/// ```
pub fn traverse(graph: &UndirectedGraph, start: NodeId) -> Result<Vec<NodeId>, VisitError> {
    traverse_with(graph, start, |_| {})
}

/// Visits `graph` breadth-first from `start` and returns the visit order
/// together with a snapshot of every level.
pub fn levels(
    graph: &UndirectedGraph,
    start: NodeId,
) -> Result<(Vec<NodeId>, Vec<LevelSnapshot>), VisitError> {
    let mut snapshots = Vec::new();
    let order = traverse_with(graph, start, |level| snapshots.push(level.to_snapshot()))?;
    Ok((order, snapshots))
}
