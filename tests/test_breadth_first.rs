/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use bfs_levels::prelude::*;
use no_break::{NoBreak, Unbreakable};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::ops::ControlFlow::{self, Continue};

/// Textbook distances from `start`, without any ordering guarantee.
fn correct_distances(graph: &UndirectedGraph, start: NodeId) -> BTreeMap<NodeId, usize> {
    let mut distances = BTreeMap::new();
    let mut queue = VecDeque::new();
    distances.insert(start, 0);
    queue.push_back(start);
    while let Some(node) = queue.pop_front() {
        let d = distances[&node];
        for succ in graph.neighbors(node).unwrap() {
            distances.entry(succ).or_insert_with(|| {
                queue.push_back(succ);
                d + 1
            });
        }
    }
    distances
}

fn random_edges(rng: &mut SmallRng, num_nodes: i64, num_edges: usize) -> Vec<(NodeId, NodeId)> {
    (0..num_edges)
        .map(|_| {
            (
                rng.random_range(0..num_nodes),
                rng.random_range(0..num_nodes),
            )
        })
        .collect()
}

#[test]
fn test_basic() -> Result<()> {
    let graph =
        UndirectedGraph::from_adjacency([(1, vec![2, 3]), (2, vec![1, 4]), (3, vec![1]), (4, vec![2])]);
    assert_eq!(breadth_first::traverse(&graph, 1)?, vec![1, 2, 3, 4]);
    Ok(())
}

#[test]
fn test_disconnected() -> Result<()> {
    let graph =
        UndirectedGraph::from_adjacency([(1, vec![2]), (2, vec![1]), (3, vec![4]), (4, vec![3])]);
    assert_eq!(breadth_first::traverse(&graph, 1)?, vec![1, 2]);
    assert_eq!(breadth_first::traverse(&graph, 4)?, vec![4, 3]);
    Ok(())
}

#[test]
fn test_isolated_start() -> Result<()> {
    let graph = UndirectedGraph::from_adjacency([(5, vec![])]);
    let (order, levels) = breadth_first::levels(&graph, 5)?;
    assert_eq!(order, vec![5]);
    assert_eq!(
        levels,
        vec![breadth_first::LevelSnapshot {
            distance: 0,
            discovered: vec![],
            parents: vec![(5, None)],
        }]
    );
    Ok(())
}

#[test]
fn test_self_loop() -> Result<()> {
    let graph = UndirectedGraph::from_adjacency([(1, vec![1, 2]), (2, vec![1])]);
    let order = breadth_first::traverse(&graph, 1)?;
    assert_eq!(order, vec![1, 2]);
    assert_eq!(order.len(), 2);
    Ok(())
}

#[test]
fn test_unsorted_neighbors() -> Result<()> {
    let graph = UndirectedGraph::from_adjacency([
        (1, vec![3, 2]),
        (2, vec![1]),
        (3, vec![1, 4]),
        (4, vec![3]),
    ]);
    assert_eq!(breadth_first::traverse(&graph, 1)?, vec![1, 2, 3, 4]);
    Ok(())
}

#[test]
fn test_start_not_found() {
    let graph = UndirectedGraph::from_adjacency([(1, vec![2]), (2, vec![1])]);
    assert_eq!(
        breadth_first::traverse(&graph, 99),
        Err(breadth_first::VisitError::StartNotFound(99))
    );
    let mut called = false;
    let res = breadth_first::traverse_with(&graph, 99, |_| called = true);
    assert!(res.is_err());
    assert!(!called);
}

#[test]
fn test_negative_nodes() -> Result<()> {
    let graph = UndirectedGraph::from_edges([(-1, 0), (0, -7), (-1, 3)]);
    let (order, levels) = breadth_first::levels(&graph, -1)?;
    assert_eq!(order, vec![-1, 0, 3, -7]);
    // A node named -1 is not confused with the root marker
    assert_eq!(
        levels[1].parents,
        vec![(-7, Some(0)), (-1, None), (0, Some(-1)), (3, Some(-1))]
    );
    Ok(())
}

#[test]
fn test_levels() -> Result<()> {
    let graph = UndirectedGraph::from_edges([(1, 2), (1, 3), (2, 4), (3, 4), (4, 5)]);
    let (order, levels) = breadth_first::levels(&graph, 1)?;
    assert_eq!(order, vec![1, 2, 3, 4, 5]);
    assert_eq!(levels.len(), 4);

    assert_eq!(levels[0].distance, 0);
    assert_eq!(levels[0].discovered, vec![2, 3]);
    assert_eq!(levels[0].parents, vec![(1, None), (2, Some(1)), (3, Some(1))]);

    // 4 is discovered by 2, not by 3
    assert_eq!(levels[1].discovered, vec![4]);
    assert_eq!(
        levels[1].parents,
        vec![(1, None), (2, Some(1)), (3, Some(1)), (4, Some(2))]
    );

    assert_eq!(levels[2].discovered, vec![5]);
    assert!(levels[3].discovered.is_empty());
    assert_eq!(levels[3].parents.len(), 5);
    Ok(())
}

#[test]
fn test_parent_lookup() -> Result<()> {
    let graph = UndirectedGraph::from_edges([(1, 2), (2, 3), (7, 8)]);
    let mut seen = Vec::new();
    breadth_first::traverse_with(&graph, 2, |level| {
        seen.push((
            level.distance(),
            level.parent(1),
            level.parent(2),
            level.parent(7),
            level.parent(42),
        ));
    })?;
    assert_eq!(
        seen,
        vec![
            (0, Some(Some(2)), Some(None), None, None),
            (1, Some(Some(2)), Some(None), None, None),
        ]
    );
    Ok(())
}

#[test]
fn test_duplicate_edges() -> Result<()> {
    let simple = UndirectedGraph::from_edges([(1, 2), (2, 3), (1, 4)]);
    let multi =
        UndirectedGraph::from_edges([(1, 2), (2, 1), (1, 2), (2, 3), (3, 3), (1, 4), (4, 4), (1, 1)]);
    assert_eq!(breadth_first::levels(&simple, 1)?, breadth_first::levels(&multi, 1)?);
    Ok(())
}

#[test]
fn test_random_graphs() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..20 {
        let edges = random_edges(&mut rng, 100, 120);
        let graph = UndirectedGraph::from_edges(edges.iter().copied());
        let start = edges[0].0;
        let expected = correct_distances(&graph, start);

        let mut distances = BTreeMap::new();
        let mut order = Vec::new();
        breadth_first::Seq::new(&graph)
            .visit(start, |event| -> ControlFlow<Unbreakable, ()> {
                match event {
                    breadth_first::Event::Unknown { node, distance, .. } => {
                        assert!(distances.insert(node, distance).is_none());
                    }
                    breadth_first::Event::Dequeued { node, distance } => {
                        assert_eq!(distances.get(&node), Some(&distance));
                        order.push(node);
                    }
                    _ => {}
                }
                Continue(())
            })?
            .continue_value_no_break();

        assert_eq!(distances, expected);
        assert_eq!(order[0], start);
        assert_eq!(order.len(), order.iter().collect::<HashSet<_>>().len());
        assert_eq!(
            order.iter().copied().collect::<HashSet<_>>(),
            expected.keys().copied().collect::<HashSet<_>>()
        );
        // Distances are non-decreasing along the visit order
        assert!(order.windows(2).all(|w| expected[&w[0]] <= expected[&w[1]]));
    }
    Ok(())
}

#[test]
fn test_edge_order_invariance() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(1);
    for _ in 0..10 {
        let mut edges = random_edges(&mut rng, 50, 80);
        let start = edges[0].1;
        let expected = breadth_first::levels(&UndirectedGraph::from_edges(edges.iter().copied()), start)?;
        for _ in 0..5 {
            edges.shuffle(&mut rng);
            let flipped = edges
                .iter()
                .map(|&(u, v)| if rng.random_bool(0.5) { (v, u) } else { (u, v) });
            let graph = UndirectedGraph::from_edges(flipped);
            assert_eq!(breadth_first::levels(&graph, start)?, expected);
        }
    }
    Ok(())
}

#[test]
fn test_parent_map_grows() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(2);
    let edges = random_edges(&mut rng, 200, 300);
    let graph = UndirectedGraph::from_edges(edges.iter().copied());
    let (order, levels) = breadth_first::levels(&graph, edges[0].0)?;

    let mut previous: BTreeMap<NodeId, Option<NodeId>> = BTreeMap::new();
    for level in &levels {
        let current: BTreeMap<_, _> = level.parents.iter().copied().collect();
        // Rendered in increasing node order
        assert!(level.parents.windows(2).all(|w| w[0].0 < w[1].0));
        // Entries are never removed or overwritten
        for (node, parent) in &previous {
            assert_eq!(current.get(node), Some(parent));
        }
        // New entries are exactly the nodes discovered in this level
        let new = current
            .keys()
            .filter(|node| !previous.contains_key(node))
            .copied()
            .collect::<HashSet<_>>();
        assert_eq!(new, level.discovered.iter().copied().collect::<HashSet<_>>());
        previous = current;
    }
    assert_eq!(previous.len(), order.len());
    Ok(())
}
