/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{Event, Level, VisitError};
use crate::graphs::UndirectedGraph;
use crate::NodeId;
use nonmax::NonMaxUsize;
use std::{collections::VecDeque, ops::ControlFlow};
use sux::bits::BitVec;

/// A sequential, level-synchronous breadth-first visit.
///
/// Nodes are marked as visited when they are discovered, rather than when
/// they are extracted from the queue, so no node is ever enqueued twice, even
/// in the presence of self-loops or parallel edges. The neighbors of each
/// extracted node are expanded in increasing identifier order.
///
/// At the end of each level the callback receives an
/// [`Event::LevelDone`] carrying the nodes discovered during the level and
/// the parent of every node discovered so far.
///
/// Each call to [`visit`](Self::visit) starts from a clean state, so the same
/// instance can be used for multiple visits of the same graph.
///
/// # Examples
///
/// Let's compute the distances from 1:
///
/// ```
/// use bfs_levels::prelude::*;
/// use std::ops::ControlFlow::Continue;
/// use no_break::NoBreak;
///
/// let graph = UndirectedGraph::from_edges([(1, 2), (2, 3), (3, 1), (2, 4)]);
/// let mut visit = breadth_first::Seq::new(&graph);
/// let mut d = [0; 5];
/// visit.visit(
///     1,
///     |event| {
///          if let breadth_first::Event::Unknown { node, distance, .. } = event {
///              d[node as usize] = distance;
///          }
///          Continue::<no_break::Unbreakable, ()>(())
///     },
/// )?.continue_value_no_break();
///
/// assert_eq!(d, [0, 0, 1, 1, 2]);
/// # Ok::<(), breadth_first::VisitError>(())
/// ```
///
/// Callbacks can stop the visit early by returning
/// [`Break`](ControlFlow::Break); here we find the first level discovering
/// node 4:
///
/// ```
/// use bfs_levels::prelude::*;
/// use std::ops::ControlFlow::{Break, Continue};
///
/// let graph = UndirectedGraph::from_edges([(1, 2), (2, 3), (3, 4), (4, 5)]);
/// let mut visit = breadth_first::Seq::new(&graph);
/// let res = visit.visit(1, |event| match event {
///     breadth_first::Event::LevelDone(level) if level.discovered().any(|n| n == 4) => {
///         Break(level.distance())
///     }
///     _ => Continue(()),
/// })?;
/// assert_eq!(res, Break(2));
/// # Ok::<(), breadth_first::VisitError>(())
/// ```
pub struct Seq<'a> {
    graph: &'a UndirectedGraph,
    visited: BitVec,
    /// The node that discovered each visited node; the root is its own
    /// predecessor.
    pred: Vec<usize>,
    /// The visit queue. [`NonMaxUsize`] is used to avoid storage for the
    /// option variant tag of [`VecDeque::pop_front`].
    queue: VecDeque<NonMaxUsize>,
    /// The nodes discovered in the current level.
    discovered: Vec<usize>,
    /// Scratch space for sorting neighbors.
    succ: Vec<usize>,
}

impl<'a> Seq<'a> {
    /// Creates a new sequential visit.
    ///
    /// # Arguments
    /// * `graph`: an immutable reference to the graph to visit.
    pub fn new(graph: &'a UndirectedGraph) -> Self {
        let num_nodes = graph.num_nodes();
        Self {
            graph,
            visited: BitVec::new(num_nodes),
            pred: vec![0; num_nodes],
            queue: VecDeque::new(),
            discovered: Vec::new(),
            succ: Vec::new(),
        }
    }

    /// Visits the graph from `root`.
    ///
    /// # Errors
    ///
    /// [`VisitError::StartNotFound`] if `root` is not a node of the graph;
    /// in this case the callback is never called.
    pub fn visit<E, C: FnMut(Event<'_>) -> ControlFlow<E, ()>>(
        &mut self,
        root: NodeId,
        mut callback: C,
    ) -> Result<ControlFlow<E, ()>, VisitError> {
        let root_index = self
            .graph
            .index_of(root)
            .ok_or(VisitError::StartNotFound(root))?;
        self.reset();
        Ok(self.visit_from(root_index, &mut callback))
    }

    fn visit_from<E, C: FnMut(Event<'_>) -> ControlFlow<E, ()>>(
        &mut self,
        root: usize,
        callback: &mut C,
    ) -> ControlFlow<E, ()> {
        let graph = self.graph;
        callback(Event::Init {
            root: graph.id(root),
        })?;

        self.visited.set(root, true);
        self.pred[root] = root;
        self.queue
            .push_back(NonMaxUsize::new(root).expect("node index should never be usize::MAX"));
        callback(Event::Unknown {
            node: graph.id(root),
            pred: None,
            distance: 0,
        })?;

        let mut distance = 0;
        let mut visited = 1;
        // Nodes of the current level still in the queue
        let mut remaining = self.queue.len();

        while let Some(current) = self.queue.pop_front() {
            let current = current.get();
            callback(Event::Dequeued {
                node: graph.id(current),
                distance,
            })?;

            self.succ.clear();
            self.succ.extend_from_slice(graph.successors(current));
            // Indices are assigned in increasing identifier order
            self.succ.sort_unstable();

            for &succ in &self.succ {
                if !self.visited[succ] {
                    self.visited.set(succ, true);
                    self.pred[succ] = current;
                    self.discovered.push(succ);
                    callback(Event::Unknown {
                        node: graph.id(succ),
                        pred: Some(graph.id(current)),
                        distance: distance + 1,
                    })?;
                    self.queue.push_back(
                        NonMaxUsize::new(succ).expect("node index should never be usize::MAX"),
                    );
                } else {
                    callback(Event::Known {
                        node: graph.id(succ),
                        pred: graph.id(current),
                    })?;
                }
            }

            remaining -= 1;
            if remaining == 0 {
                callback(Event::LevelDone(Level {
                    graph,
                    distance,
                    discovered: &self.discovered,
                    pred: &self.pred,
                    visited: &self.visited,
                }))?;
                log::debug!(
                    "Level {}: {} nodes discovered",
                    distance,
                    self.discovered.len()
                );
                visited += self.discovered.len();
                self.discovered.clear();
                remaining = self.queue.len();
                distance += 1;
            }
        }

        callback(Event::Done { visited })
    }

    fn reset(&mut self) {
        self.queue.clear();
        self.discovered.clear();
        self.visited.fill(false);
    }
}
