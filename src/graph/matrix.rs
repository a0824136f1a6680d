use std::fmt;

use bitvec::{order::Lsb0, vec::BitVec};
use indexmap::IndexSet;
use log::{debug, trace};

use super::{DiGraph, Edge, InvalidGraph, VVertices, Vertex, CELL_WIDTH};
use crate::graph::list::ListGraph;

pub type Row = BitVec<usize, Lsb0>;

/// Dense adjacency matrix.
///
/// Vertices get the indices 0, 1, 2, ... in the order in which they are first seen; the
/// [IndexSet] is both the map from vertex to index and the list of vertices in index
/// order. `matrix[i][j]` is set if there is an edge from the vertex with index `i` to the
/// vertex with index `j`.
///
/// The matrix is always square with side [DiGraph::vertex_count] (cf.
/// [MatrixGraph::check_shape]); it only grows and growing keeps all existing cells.
#[derive(Clone, Debug, Default)]
pub struct MatrixGraph {
    order: IndexSet<Vertex>,
    matrix: Vec<Row>,
}

// IndexSet's PartialEq ignores the order, but for us the order determines the meaning of
// the matrix
impl PartialEq for MatrixGraph {
    fn eq(&self, other: &Self) -> bool {
        self.order.iter().eq(other.order.iter()) && self.matrix == other.matrix
    }
}

impl Eq for MatrixGraph {}

impl MatrixGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay every edge of `source` in the order given by `source.vertices()` and
    /// `source.next_vertices(..)`.
    ///
    /// The indices are therefore assigned in the traversal order of `source`, which is
    /// not necessarily the index order if `source` is a [MatrixGraph] itself. `source` is
    /// borrowed for the whole replay, so it cannot change in between.
    pub fn from_graph(source: &dyn DiGraph) -> Self {
        let mut ret = Self::default();
        let vertices = source.vertices();
        for &vertex in vertices.iter() {
            for next in source.next_vertices(vertex) {
                ret.add_edge(vertex, next);
            }
        }
        // only an implementor that can hold edgeless vertices needs this
        for vertex in vertices {
            ret.insert(vertex);
        }
        ret.grow(ret.order.len());
        debug!(
            "replayed {} vertices and {} edges into a matrix graph",
            ret.vertex_count(),
            ret.edge_count()
        );
        ret
    }

    pub fn index_of(&self, vertex: Vertex) -> Option<usize> {
        self.order.get_index_of(&vertex)
    }

    /// The current side length of the matrix.
    pub fn side(&self) -> usize {
        self.matrix.len()
    }

    pub fn check_shape(&self) -> Result<(), InvalidGraph> {
        let vertices = self.order.len();
        if self.matrix.len() != vertices {
            return Err(InvalidGraph::MatrixRows { rows: self.matrix.len(), vertices });
        }
        for (row, cells) in self.matrix.iter().enumerate() {
            if cells.len() != vertices {
                return Err(InvalidGraph::MatrixColumns {
                    row,
                    columns: cells.len(),
                    vertices,
                });
            }
        }
        Ok(())
    }

    fn insert(&mut self, vertex: Vertex) -> usize {
        let (idx, new) = self.order.insert_full(vertex);
        if new {
            trace!("new vertex {vertex} at index {idx}");
        }
        idx
    }

    /// Resize to `side`, keeping all cells and filling the new ones with `false`.
    fn grow(&mut self, side: usize) {
        let old = self.matrix.len();
        if side <= old {
            return;
        }
        for row in self.matrix.iter_mut() {
            row.resize(side, false);
        }
        self.matrix.resize_with(side, || Row::repeat(false, side));
        debug!("grew matrix from {old} to {side}");
    }

    fn vertex_at(&self, idx: usize) -> Option<Vertex> {
        self.order.get_index(idx).copied()
    }
}

impl DiGraph for MatrixGraph {
    fn add_edge(&mut self, from: Vertex, to: Vertex) {
        let from_idx = self.insert(from);
        let to_idx = self.insert(to);
        // grow before touching any cell, so that both indices are covered
        self.grow(self.order.len());
        self.matrix[from_idx].set(to_idx, true);
        trace!("edge {from} -> {to} at ({from_idx}, {to_idx})");
    }

    fn vertex_count(&self) -> usize {
        self.order.len()
    }

    fn vertices(&self) -> VVertices {
        self.order.iter().copied().collect()
    }

    fn next_vertices(&self, vertex: Vertex) -> VVertices {
        let Some(row) = self.index_of(vertex).and_then(|idx| self.matrix.get(idx)) else {
            return VVertices::new();
        };
        row.iter_ones().filter_map(|col| self.vertex_at(col)).collect()
    }

    fn prev_vertices(&self, vertex: Vertex) -> VVertices {
        let Some(col) = self.index_of(vertex) else {
            return VVertices::new();
        };
        self.matrix
            .iter()
            .enumerate()
            .filter(|(_, row)| row.get(col).is_some_and(|bit| *bit))
            .filter_map(|(idx, _)| self.vertex_at(idx))
            .collect()
    }

    fn render(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{:width$}", "", width = CELL_WIDTH)?;
        for vertex in self.order.iter() {
            write!(out, "{vertex:>width$}", width = CELL_WIDTH)?;
        }
        writeln!(out)?;

        for (vertex, row) in self.order.iter().zip(self.matrix.iter()) {
            write!(out, "{vertex:>width$}", width = CELL_WIDTH)?;
            for cell in row.iter().by_vals() {
                write!(out, "{:>width$}", u8::from(cell), width = CELL_WIDTH)?;
            }
            writeln!(out)?;
        }
        writeln!(out)
    }

    fn contains_vertex(&self, vertex: Vertex) -> bool {
        self.order.contains(&vertex)
    }

    fn has_edge(&self, from: Vertex, to: Vertex) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(from), Some(to)) => self
                .matrix
                .get(from)
                .and_then(|row| row.get(to).map(|bit| *bit))
                .unwrap_or(false),
            _ => false,
        }
    }

    fn edge_count(&self) -> usize {
        self.matrix.iter().map(|row| row.count_ones()).sum()
    }
}

impl fmt::Display for MatrixGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl From<&ListGraph> for MatrixGraph {
    fn from(list: &ListGraph) -> Self {
        Self::from_graph(list)
    }
}

impl FromIterator<Edge> for MatrixGraph {
    fn from_iter<I: IntoIterator<Item = Edge>>(edges: I) -> Self {
        let mut ret = Self::default();
        ret.extend(edges);
        ret
    }
}

impl Extend<Edge> for MatrixGraph {
    fn extend<I: IntoIterator<Item = Edge>>(&mut self, edges: I) {
        for (from, to) in edges {
            self.add_edge(from, to);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::graph::test_utils::*;

    #[test]
    fn indices_in_first_seen_order() {
        let graph: MatrixGraph =
            collect!(edges; (10, -4), (7, 10), (-4, 3)).into_iter().collect();
        assert_eq!(graph.vertices(), vec![10, -4, 7, 3]);
        assert_eq!(graph.index_of(7), Some(2));
        assert_eq!(graph.index_of(3), Some(3));
        assert_eq!(graph.index_of(0), None);
        assert_eq!(graph.next_vertices(10), vec![-4]);
        assert_eq!(graph.prev_vertices(10), vec![7]);
    }

    #[test]
    fn stays_square() {
        let mut rng = Pcg64::seed_from_u64(3);
        let mut graph = MatrixGraph::new();
        assert_eq!(graph.check_shape(), Ok(()));
        for (from, to) in random_edges(200, 25, &mut rng) {
            graph.add_edge(from, to);
            assert_eq!(graph.side(), graph.vertex_count());
            assert_eq!(graph.check_shape(), Ok(()));
        }
    }

    #[test]
    fn growing_keeps_cells() {
        let mut graph: MatrixGraph =
            collect!(edges; (0, 1), (1, 0)).into_iter().collect();
        assert_eq!(graph.side(), 2);
        graph.add_edge(2, 3);
        assert_eq!(graph.side(), 4);
        assert!(graph.has_edge(0, 1));
        assert!(graph.has_edge(1, 0));
        assert!(graph.has_edge(2, 3));
        assert!(!graph.has_edge(0, 0));
        assert!(!graph.has_edge(3, 2));
        assert!(!graph.has_edge(0, 3));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn detects_bad_shape() {
        let mut graph: MatrixGraph = SCENARIO.into_iter().collect();
        graph.matrix[2].push(false);
        assert_eq!(
            graph.check_shape(),
            Err(InvalidGraph::MatrixColumns { row: 2, columns: 7, vertices: 6 })
        );
        graph.matrix.pop();
        assert_eq!(
            graph.check_shape(),
            Err(InvalidGraph::MatrixRows { rows: 5, vertices: 6 })
        );
    }

    #[test]
    fn replay_follows_source_order() {
        let list: ListGraph = collect!(edges; (5, 1), (1, 2)).into_iter().collect();
        let matrix = MatrixGraph::from(&list);
        // the list yields 1 before 5, so 1 gets the first index
        assert_eq!(matrix.vertices(), vec![1, 2, 5]);
        assert_eq!(matrix.edge_set(), list.edge_set());

        let direct: MatrixGraph = collect!(edges; (5, 1), (1, 2)).into_iter().collect();
        assert_eq!(direct.vertices(), vec![5, 1, 2]);
        assert_ne!(direct, matrix);
        assert_eq!(MatrixGraph::from_graph(&direct), direct);
    }

    #[test]
    fn render() {
        let graph: MatrixGraph = SCENARIO.into_iter().collect();
        let expected = "       0   4   3   1   2   5\n\
                        \x20  0   0   1   1   0   0   0\n\
                        \x20  4   0   0   0   0   0   0\n\
                        \x20  3   0   0   0   0   0   0\n\
                        \x20  1   0   1   0   0   1   1\n\
                        \x20  2   0   0   1   0   0   1\n\
                        \x20  5   0   1   1   0   0   0\n\
                        \n";
        assert_eq!(graph.to_string(), expected);
    }
}
