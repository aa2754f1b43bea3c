use petgraph::algo::connected_components;
use petgraph::dot::{Config, Dot};
use petgraph::graph::UnGraph;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::records::read_records;

/// An undirected edge between two vertex indices.
pub type Edge = (usize, usize);

/// An edge as read from a file. Indices may be negative; such edges name no
/// vertex and are dropped by the embedding filter.
pub type RawEdge = (i64, i64);

/// Undirected graph over the vertices `0..node_count`, stored as a set of
/// normalized `(low, high)` edges so that each pair appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    node_count: usize,
    edges: BTreeSet<Edge>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub average_degree: f64,
    pub connected_components: usize,
}

impl EdgeList {
    pub fn new(node_count: usize) -> Self {
        EdgeList {
            node_count,
            edges: BTreeSet::new(),
        }
    }

    /// Path `0 - 1 - ... - (node_count - 1)`, which keeps every vertex reachable.
    pub fn chain(node_count: usize) -> Self {
        let mut graph = EdgeList::new(node_count);
        for i in 0..node_count.saturating_sub(1) {
            graph.insert(i, i + 1);
        }
        graph
    }

    /// Builds a graph from raw edges, sizing the vertex set to the largest
    /// index seen.
    pub fn from_edges(edges: &[Edge]) -> Self {
        let node_count = edges
            .iter()
            .map(|&(u, v)| u.max(v) + 1)
            .max()
            .unwrap_or(0);

        let mut graph = EdgeList::new(node_count);
        for &(u, v) in edges {
            graph.insert(u, v);
        }
        graph
    }

    /// Inserts the normalized pair. Returns `false` for self-loops and for
    /// pairs already present.
    pub fn insert(&mut self, u: usize, v: usize) -> bool {
        if u == v {
            return false;
        }
        self.node_count = self.node_count.max(u.max(v) + 1);
        self.edges.insert((u.min(v), u.max(v)))
    }

    pub fn contains(&self, u: usize, v: usize) -> bool {
        self.edges.contains(&(u.min(v), u.max(v)))
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }

    pub fn average_degree(&self) -> f64 {
        if self.node_count == 0 {
            return 0.0;
        }
        2.0 * self.edges.len() as f64 / self.node_count as f64
    }

    pub fn to_petgraph(&self) -> UnGraph<usize, ()> {
        let mut graph = UnGraph::<usize, ()>::with_capacity(self.node_count, self.edges.len());
        let nodes: Vec<_> = (0..self.node_count).map(|i| graph.add_node(i)).collect();
        for &(u, v) in &self.edges {
            graph.add_edge(nodes[u], nodes[v], ());
        }
        graph
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            node_count: self.node_count,
            edge_count: self.edges.len(),
            average_degree: self.average_degree(),
            connected_components: connected_components(&self.to_petgraph()),
        }
    }
}

/// Writes one `"{u} {v}"` line per edge, with no header.
pub fn write_edges<P: AsRef<Path>>(graph: &EdgeList, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    for edge in graph.edges() {
        writer.serialize(edge)?;
    }
    writer.flush()?;

    debug!(edges = graph.len(), path = %path.as_ref().display(), "wrote edge list");
    Ok(())
}

/// Reads an edge list in input order. Pairs are kept as written, so
/// duplicates, self-loops and negative indices in the file survive.
pub fn read_edges<P: AsRef<Path>>(path: P) -> Result<Vec<RawEdge>> {
    let edges: Vec<RawEdge> = read_records(path.as_ref(), 2)?;
    debug!(edges = edges.len(), path = %path.as_ref().display(), "read edge list");
    Ok(edges)
}

pub fn export_to_graphviz<P: AsRef<Path>>(graph: &EdgeList, path: P) -> Result<()> {
    let graph = graph.to_petgraph();
    let viz = Dot::with_attr_getters(
        &graph,
        &[Config::EdgeNoLabel, Config::NodeNoLabel],
        &|_, _| String::new(),
        &|_, (_, vertex)| format!("label=\"{}\"", vertex),
    );

    std::fs::write(path, format!("{:?}", viz))?;
    Ok(())
}
