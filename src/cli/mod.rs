/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Command-line interface.
//!
//! The binary reads an edge list, visits it breadth-first from a start node,
//! and prints on standard output the nodes discovered in each level together
//! with the current parent map, followed by the visit order. Logging goes to
//! standard error.

use crate::graphs::edge_list::load_edge_list;
use crate::visits::breadth_first::{self, Event, Level};
use crate::NodeId;
use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use jiff::fmt::friendly::{Designator, Spacing, SpanPrinter};
use jiff::SpanRound;
use std::io::{BufWriter, Write};
use std::ops::ControlFlow::{Break, Continue};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

pub mod build_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));

    pub fn version_string() -> String {
        format!(
            "{}
git info: {} {} {}
build info: built for {} with {}",
            PKG_VERSION,
            GIT_VERSION.unwrap_or(""),
            GIT_COMMIT_HASH.unwrap_or(""),
            match GIT_DIRTY {
                None => "",
                Some(true) => "(dirty)",
                Some(false) => "(clean)",
            },
            TARGET,
            RUSTC_VERSION
        )
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "bfs-levels",
    version = build_info::version_string(),
    after_help = "Environment (noteworthy environment variables used):
RUST_LOG: configuration for env_logger; logs are written on standard error.
  Use `warn` to silence progress information."
)]
/// Breadth-first visits an undirected graph, printing for each level the
/// nodes discovered and the parent of every node discovered so far, and
/// finally the visit order.
pub struct Cli {
    /// The edge list: one edge per line, given by two integers separated by
    /// whitespace.
    pub input: PathBuf,
    /// The node to start the visit from.
    #[arg(allow_negative_numbers = true)]
    pub start: NodeId,
}

/// Initializes an [`env_logger`] writing on standard error, with default
/// level `info`, prefixing records with a timestamp and the elapsed time.
pub fn init_envlogger() -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    let start = std::time::Instant::now();
    builder.format(move |buf, record| {
        let Ok(ts) = jiff::Timestamp::try_from(SystemTime::now()) else {
            return Err(std::io::Error::other("Failed to get timestamp"));
        };
        let style = buf.default_level_style(record.level());
        writeln!(
            buf,
            "{} {} {style}{}{style:#} [{:?}] {} - {}",
            ts.strftime("%F %T%.3f"),
            format_elapsed(start.elapsed()),
            record.level(),
            std::thread::current().id(),
            record.target(),
            record.args()
        )
    });
    builder.try_init()?;
    Ok(())
}

/// Formats a duration compactly, e.g., `1h2m3.456s`.
fn format_elapsed(elapsed: Duration) -> String {
    let printer = SpanPrinter::new()
        .spacing(Spacing::None)
        .designator(Designator::Compact);
    let span_round = SpanRound::new()
        .largest(jiff::Unit::Day)
        .smallest(jiff::Unit::Millisecond)
        .days_are_24_hours();
    let span = jiff::Span::new()
        .seconds(elapsed.as_secs() as i64)
        .milliseconds(elapsed.subsec_millis() as i64);
    match span.round(span_round) {
        Ok(span) => printer.span_to_string(&span),
        Err(_) => format!("{:.3}s", elapsed.as_secs_f64()),
    }
}

/// Writes the nodes discovered in a level and the current parent map.
///
/// The root has no parent and is printed as `root:-1`.
pub fn write_level(out: &mut impl Write, level: &Level<'_>) -> std::io::Result<()> {
    writeln!(
        out,
        "Visited this iteration: {}",
        level.discovered().join(" ")
    )?;
    writeln!(
        out,
        "Parent array: {}",
        level
            .parents()
            .map(|(node, parent)| format!("{}:{}", node, parent.unwrap_or(-1)))
            .join(" ")
    )
}

/// Writes the visit order, one node per line, after a header.
pub fn write_order(out: &mut impl Write, order: &[NodeId]) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "BFS Traversal Order:")?;
    for node in order {
        writeln!(out, "{}", node)?;
    }
    Ok(())
}

/// Loads the graph, visits it, and writes the results on `out`.
pub fn run(args: Cli, mut out: impl Write) -> Result<()> {
    let graph = load_edge_list(&args.input)
        .with_context(|| format!("Could not load graph from {}", args.input.display()))?;

    log::info!("Visiting from node {}...", args.start);
    let mut order = Vec::new();
    let res = breadth_first::Seq::new(&graph).visit(args.start, |event| {
        match event {
            Event::Dequeued { node, .. } => order.push(node),
            Event::LevelDone(level) => {
                if let Err(err) = write_level(&mut out, &level) {
                    return Break(err);
                }
            }
            Event::Done { visited } => {
                log::info!("Visited {} of {} nodes", visited, graph.num_nodes())
            }
            _ => {}
        }
        Continue(())
    })?;
    if let Break(err) = res {
        return Err(err).context("Could not write level");
    }

    write_order(&mut out, &order)?;
    out.flush()?;
    Ok(())
}

/// The entry point of the command-line interface.
///
/// Argument errors are reported by [`clap`], which exits before any file is
/// read.
pub fn main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let start = std::time::Instant::now();
    let args = Cli::parse_from(args);
    run(args, BufWriter::new(std::io::stdout().lock()))?;
    log::info!("The command took {}", format_elapsed(start.elapsed()));
    Ok(())
}
