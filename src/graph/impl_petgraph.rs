//! petgraph's visitor traits, so that its traversals (e.g. [petgraph::visit::Dfs]) run
//! directly on our representations.

use std::{collections::HashSet, iter::Copied, slice, vec};

use petgraph::{
    visit::{
        GraphBase, GraphProp, IntoNeighbors, IntoNeighborsDirected, IntoNodeIdentifiers,
        NodeCount, Visitable,
    },
    Directed, Direction,
};

use super::{list::ListGraph, matrix::MatrixGraph, DiGraph, Edge, Vertex};

macro_rules! impl_visit {
    ($graph:ty) => {
        impl GraphBase for $graph {
            type NodeId = Vertex;
            type EdgeId = Edge;
        }

        impl GraphProp for $graph {
            type EdgeType = Directed;
        }

        impl NodeCount for $graph {
            fn node_count(&self) -> usize {
                self.vertex_count()
            }
        }

        impl Visitable for $graph {
            type Map = HashSet<Vertex>;

            fn visit_map(&self) -> Self::Map {
                HashSet::with_capacity(self.vertex_count())
            }

            fn reset_map(&self, map: &mut Self::Map) {
                map.clear();
            }
        }

        impl<'a> IntoNodeIdentifiers for &'a $graph {
            type NodeIdentifiers = vec::IntoIter<Vertex>;

            fn node_identifiers(self) -> Self::NodeIdentifiers {
                self.vertices().into_iter()
            }
        }
    };
}
impl_visit!(ListGraph);
impl_visit!(MatrixGraph);

// the list can hand out its neighbourhoods without collecting them first
impl<'a> IntoNeighbors for &'a ListGraph {
    type Neighbors = Copied<slice::Iter<'a, Vertex>>;

    fn neighbors(self, a: Vertex) -> Self::Neighbors {
        self.successors(a).iter().copied()
    }
}

impl<'a> IntoNeighborsDirected for &'a ListGraph {
    type NeighborsDirected = Copied<slice::Iter<'a, Vertex>>;

    fn neighbors_directed(self, n: Vertex, d: Direction) -> Self::NeighborsDirected {
        match d {
            Direction::Outgoing => self.successors(n),
            Direction::Incoming => self.predecessors(n),
        }
        .iter()
        .copied()
    }
}

impl<'a> IntoNeighbors for &'a MatrixGraph {
    type Neighbors = vec::IntoIter<Vertex>;

    fn neighbors(self, a: Vertex) -> Self::Neighbors {
        self.next_vertices(a).into_iter()
    }
}

impl<'a> IntoNeighborsDirected for &'a MatrixGraph {
    type NeighborsDirected = vec::IntoIter<Vertex>;

    fn neighbors_directed(self, n: Vertex, d: Direction) -> Self::NeighborsDirected {
        match d {
            Direction::Outgoing => self.next_vertices(n),
            Direction::Incoming => self.prev_vertices(n),
        }
        .into_iter()
    }
}
