/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Loading of undirected graphs from textual edge lists.
//!
//! Each non-blank line of an edge list contains exactly two integers
//! separated by whitespace, representing an undirected edge. Blank lines
//! are skipped; anything else is an error.

use super::UndirectedGraph;
use crate::NodeId;
use dsi_progress_logger::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can happen while loading an edge list.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not read edge list {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Line {line}: expected two nodes, found {found} fields in {content:?}")]
    WrongArity {
        line: usize,
        found: usize,
        content: String,
    },
    #[error("Line {line}: cannot parse {token:?} as a node")]
    InvalidNode {
        line: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },
}

/// Parses a single line into an edge.
///
/// Returns `Ok(None)` on blank lines. `line_num` is one-based and used only
/// for error reporting.
pub fn parse_edge(line: &str, line_num: usize) -> Result<Option<(NodeId, NodeId)>, LoadError> {
    let vals = line.split_whitespace().collect::<Vec<_>>();
    match vals.as_slice() {
        [] => Ok(None),
        [src, dst] => Ok(Some((parse_node(src, line_num)?, parse_node(dst, line_num)?))),
        _ => Err(LoadError::WrongArity {
            line: line_num,
            found: vals.len(),
            content: line.to_string(),
        }),
    }
}

fn parse_node(token: &str, line_num: usize) -> Result<NodeId, LoadError> {
    token
        .parse::<NodeId>()
        .map_err(|source| LoadError::InvalidNode {
            line: line_num,
            token: token.to_string(),
            source,
        })
}

/// Reads an edge list from `reader` and builds the corresponding graph.
///
/// `path` is only used to decorate I/O errors.
fn read_edge_list(reader: impl BufRead, path: &Path) -> Result<UndirectedGraph, LoadError> {
    let mut pl = ProgressLogger::default();
    pl.item_name("line");
    pl.start("Reading edge list...");

    let mut edges = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        if let Some(edge) = parse_edge(&line, line_num + 1)? {
            edges.push(edge);
        }
        pl.light_update();
    }
    pl.done();

    let graph = UndirectedGraph::from_edges(edges.iter().copied());
    log::info!(
        "Edges read: {}, nodes: {}",
        edges.len(),
        graph.num_nodes()
    );
    Ok(graph)
}

/// Parses an edge list from a [`BufRead`].
pub fn parse_edge_list(reader: impl BufRead) -> Result<UndirectedGraph, LoadError> {
    read_edge_list(reader, Path::new("-"))
}

/// Loads an edge list from the file at `path`.
pub fn load_edge_list(path: impl AsRef<Path>) -> Result<UndirectedGraph, LoadError> {
    let path = path.as_ref();
    log::info!("Loading edge list from {}", path.display());
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    read_edge_list(BufReader::new(file), path)
}
