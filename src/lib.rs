//! A directed graph with two interchangeable representations: an adjacency list
//! ([graph::list::ListGraph]) and an adjacency matrix ([graph::matrix::MatrixGraph]).
//! Both implement [graph::DiGraph] and can be built from any other [graph::DiGraph].

#![forbid(unsafe_code)]

pub mod graph;
