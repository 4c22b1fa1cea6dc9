/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

pub mod edge_list;

mod undirected;
pub use undirected::UndirectedGraph;

pub mod prelude {
    pub use super::edge_list::{load_edge_list, parse_edge_list, LoadError};
    pub use super::UndirectedGraph;
}
