use std::fmt;

use hashbrown::HashSet;

// some of the following type aliases are only used in a few places, but they serve as
// documentation and orientation for variable names
pub type Vertex = i64;
pub type Edge = (Vertex, Vertex);

// V for vector
pub type VVertices = Vec<Vertex>;
// H for hash
pub type HVertices = HashSet<Vertex>;
pub type HEdges = HashSet<Edge>;

/// Width of one cell when rendering a graph.
pub const CELL_WIDTH: usize = 4;

/// The small graph the demo binary builds and prints.
pub const SAMPLE_EDGES: [Edge; 9] =
    [(0, 4), (0, 3), (1, 2), (1, 4), (1, 5), (2, 3), (2, 5), (5, 3), (5, 4)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum InvalidGraph {
    #[error("Vertex {0} is listed more than once")]
    DuplicateVertex(Vertex),
    #[error("Graph reports {reported} vertices but lists {listed}")]
    VertexCountMismatch { reported: usize, listed: usize },
    #[error("Vertex {0} lists the neighbour {1} more than once")]
    DuplicateNeighbour(Vertex, Vertex),
    #[error("Vertex {0} lists the neighbour {1} which is not a vertex of the graph")]
    UnknownNeighbour(Vertex, Vertex),
    #[error("The edge {0} -> {1} is only known to one of its endpoints")]
    AsymmetricEdge(Vertex, Vertex),
    #[error("Matrix has {rows} rows but there are {vertices} vertices")]
    MatrixRows { rows: usize, vertices: usize },
    #[error("Matrix row {row} has {columns} columns but there are {vertices} vertices")]
    MatrixColumns { row: usize, columns: usize, vertices: usize },
}

/// A directed graph without any associated data.
///
/// Vertices are created implicitly by [DiGraph::add_edge] and are never removed. Queries
/// on a vertex that is not part of the graph are not an error, they simply have an empty
/// result.
///
/// The trait is object safe, so that one representation can be built from any other one
/// through a `&dyn DiGraph` (cf. `ListGraph::from_graph` and `MatrixGraph::from_graph`).
pub trait DiGraph {
    /// Add the edge `from -> to`, inserting the endpoints if they are new. Adding an
    /// existing edge again does nothing.
    fn add_edge(&mut self, from: Vertex, to: Vertex);

    fn vertex_count(&self) -> usize;

    /// All vertices, each exactly once. The order depends on the representation, but it
    /// is stable as long as the graph is not modified.
    fn vertices(&self) -> VVertices;

    /// The targets of all edges starting in `vertex`.
    fn next_vertices(&self, vertex: Vertex) -> VVertices;

    /// The sources of all edges ending in `vertex`.
    fn prev_vertices(&self, vertex: Vertex) -> VVertices;

    /// Write a human-readable dump of the graph into `out`.
    fn render(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Probably want to override this, since the default lists all vertices.
    fn contains_vertex(&self, vertex: Vertex) -> bool {
        self.vertices().contains(&vertex)
    }

    fn has_edge(&self, from: Vertex, to: Vertex) -> bool {
        self.next_vertices(from).contains(&to)
    }

    fn edge_count(&self) -> usize {
        self.vertices()
            .into_iter()
            .map(|vertex| self.next_vertices(vertex).len())
            .sum()
    }

    /// Edges grouped by their source, in the order of [DiGraph::vertices].
    fn edges(&self) -> Vec<Edge> {
        self.vertices()
            .into_iter()
            .flat_map(|from| {
                self.next_vertices(from).into_iter().map(move |to| (from, to))
            })
            .collect()
    }

    /// The edges as a set, i.e., independent of any order the representation imposes.
    fn edge_set(&self) -> HEdges {
        self.edges().into_iter().collect()
    }

    /// Check whether the graph upholds the invariants every representation promises.
    fn check(&self) -> Result<(), InvalidGraph> {
        let vertices = self.vertices();
        let mut known = HVertices::with_capacity(vertices.len());
        for &vertex in vertices.iter() {
            if !known.insert(vertex) {
                return Err(InvalidGraph::DuplicateVertex(vertex));
            }
        }
        if vertices.len() != self.vertex_count() {
            return Err(InvalidGraph::VertexCountMismatch {
                reported: self.vertex_count(),
                listed: vertices.len(),
            });
        }

        for &vertex in vertices.iter() {
            let next = self.next_vertices(vertex);
            check_neighbourhood(vertex, &next, &known)?;
            for &to in next.iter() {
                if !self.prev_vertices(to).contains(&vertex) {
                    return Err(InvalidGraph::AsymmetricEdge(vertex, to));
                }
            }

            let prev = self.prev_vertices(vertex);
            check_neighbourhood(vertex, &prev, &known)?;
            for &from in prev.iter() {
                if !self.next_vertices(from).contains(&vertex) {
                    return Err(InvalidGraph::AsymmetricEdge(from, vertex));
                }
            }
        }
        Ok(())
    }
}

fn check_neighbourhood(
    vertex: Vertex,
    neighbours: &[Vertex],
    known: &HVertices,
) -> Result<(), InvalidGraph> {
    let mut seen = HVertices::with_capacity(neighbours.len());
    for &neighbour in neighbours {
        if !known.contains(&neighbour) {
            return Err(InvalidGraph::UnknownNeighbour(vertex, neighbour));
        }
        if !seen.insert(neighbour) {
            return Err(InvalidGraph::DuplicateNeighbour(vertex, neighbour));
        }
    }
    Ok(())
}

pub mod list;
pub mod matrix;

mod impl_petgraph;

#[cfg(test)]
pub mod test_utils {
    use rand::Rng;

    use super::*;

    pub const SCENARIO: [Edge; 9] = SAMPLE_EDGES;

    macro_rules! collect {
        (edges; $(($from:expr, $to:expr)),* $(,)?) => {
            vec![$(($from, $to)),*]
        };
        (set; $(($from:expr, $to:expr)),* $(,)?) => {
            $crate::graph::HEdges::from_iter([$(($from, $to)),*])
        };
        (vertices; $($vertex:expr),* $(,)?) => {
            $crate::graph::HVertices::from_iter([$($vertex),*])
        };
    }
    pub(crate) use collect;

    pub fn build<G: DiGraph + Default>(edges: impl IntoIterator<Item = Edge>) -> G {
        let mut graph = G::default();
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    /// `len` edges between (not necessarily distinct) vertices in `-max..=max`; negative
    /// keys are fine, since keys are opaque.
    pub fn random_edges(len: usize, max: Vertex, rng: &mut impl Rng) -> Vec<Edge> {
        (0..len)
            .map(|_| (rng.gen_range(-max..=max), rng.gen_range(-max..=max)))
            .collect()
    }

    pub fn sorted(mut vertices: VVertices) -> VVertices {
        vertices.sort_unstable();
        vertices
    }

    pub fn as_set(vertices: VVertices) -> HVertices {
        vertices.into_iter().collect()
    }

    // just a naive test whether the utils compile, more or less
    #[test]
    fn macros() {
        assert_eq!(vec![(1, 2), (2, 3)], collect!(edges; (1, 2), (2, 3),));
        assert_eq!(
            HEdges::from_iter([(1, 2), (2, 3)]),
            collect!(set; (2, 3), (1, 2), (1, 2))
        );
        assert_eq!(HVertices::from_iter([3, 1]), collect!(vertices; 1, 3));
    }
}
