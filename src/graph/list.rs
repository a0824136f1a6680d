use std::{
    collections::{btree_map::Entry, BTreeMap},
    fmt,
};

use itertools::Itertools;
use log::{debug, trace};

use super::{DiGraph, Edge, VVertices, Vertex, CELL_WIDTH};
use crate::graph::matrix::MatrixGraph;

pub type Neighbourhood = VVertices;

/// Adjacency list with a forward and a backward index.
///
/// Both maps always have the same keys, and `n` is in `outgoing[v]` exactly when `v` is
/// in `incoming[n]`. The keys are ordered, so [DiGraph::vertices] is ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListGraph {
    outgoing: BTreeMap<Vertex, Neighbourhood>,
    incoming: BTreeMap<Vertex, Neighbourhood>,
}

impl ListGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the vertices and both neighbourhoods of every vertex out of `source`.
    ///
    /// The neighbourhoods are taken as they are, since every [DiGraph] already keeps them
    /// free of duplicates. `source` is borrowed for the whole copy, so it cannot change
    /// in between.
    pub fn from_graph(source: &dyn DiGraph) -> Self {
        let mut ret = Self::default();
        for vertex in source.vertices() {
            ret.outgoing.insert(vertex, source.next_vertices(vertex));
            ret.incoming.insert(vertex, source.prev_vertices(vertex));
        }
        debug!(
            "copied {} vertices and {} edges into a list graph",
            ret.vertex_count(),
            ret.edge_count()
        );
        ret
    }

    /// Borrowing version of [DiGraph::next_vertices].
    pub fn successors(&self, vertex: Vertex) -> &[Vertex] {
        self.outgoing.get(&vertex).map(Vec::as_slice).unwrap_or_default()
    }

    /// Borrowing version of [DiGraph::prev_vertices].
    pub fn predecessors(&self, vertex: Vertex) -> &[Vertex] {
        self.incoming.get(&vertex).map(Vec::as_slice).unwrap_or_default()
    }

    fn insert(&mut self, vertex: Vertex) {
        if let Entry::Vacant(e) = self.outgoing.entry(vertex) {
            trace!("new vertex {vertex}");
            e.insert(Neighbourhood::new());
            self.incoming.insert(vertex, Neighbourhood::new());
        }
    }
}

// the fan-out is expected to be small, so a linear scan is fine
fn link(map: &mut BTreeMap<Vertex, Neighbourhood>, vertex: Vertex, neighbour: Vertex) {
    let neighbours = map.entry(vertex).or_default();
    if !neighbours.contains(&neighbour) {
        neighbours.push(neighbour);
    }
}

impl DiGraph for ListGraph {
    fn add_edge(&mut self, from: Vertex, to: Vertex) {
        self.insert(from);
        self.insert(to);
        link(&mut self.outgoing, from, to);
        link(&mut self.incoming, to, from);
        trace!("edge {from} -> {to}");
    }

    fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    fn vertices(&self) -> VVertices {
        self.outgoing.keys().copied().collect()
    }

    fn next_vertices(&self, vertex: Vertex) -> VVertices {
        self.successors(vertex).to_vec()
    }

    fn prev_vertices(&self, vertex: Vertex) -> VVertices {
        self.predecessors(vertex).to_vec()
    }

    fn render(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        for (vertex, neighbours) in self.outgoing.iter() {
            write!(out, "{vertex:>width$}: ", width = CELL_WIDTH)?;
            for neighbour in neighbours.iter().sorted() {
                write!(out, "{neighbour:>width$}", width = CELL_WIDTH)?;
            }
            writeln!(out)?;
        }
        writeln!(out)
    }

    fn contains_vertex(&self, vertex: Vertex) -> bool {
        self.outgoing.contains_key(&vertex)
    }

    fn has_edge(&self, from: Vertex, to: Vertex) -> bool {
        self.successors(from).contains(&to)
    }

    fn edge_count(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }
}

impl fmt::Display for ListGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl From<&MatrixGraph> for ListGraph {
    fn from(matrix: &MatrixGraph) -> Self {
        Self::from_graph(matrix)
    }
}

impl FromIterator<Edge> for ListGraph {
    fn from_iter<I: IntoIterator<Item = Edge>>(edges: I) -> Self {
        let mut ret = Self::default();
        ret.extend(edges);
        ret
    }
}

impl Extend<Edge> for ListGraph {
    fn extend<I: IntoIterator<Item = Edge>>(&mut self, edges: I) {
        for (from, to) in edges {
            self.add_edge(from, to);
        }
    }
}
