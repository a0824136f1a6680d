use dual_graph::graph::{list::ListGraph, matrix::MatrixGraph, DiGraph, SAMPLE_EDGES};
use env_logger::Env;
use log::info;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut matrix = MatrixGraph::new();
    for (from, to) in SAMPLE_EDGES {
        matrix.add_edge(from, to);
    }
    info!(
        "matrix graph: {} vertices, {} edges",
        matrix.vertex_count(),
        matrix.edge_count()
    );
    print!("{matrix}");

    let list = ListGraph::from(&matrix);
    info!("converted to a list graph with {} vertices", list.vertex_count());
    print!("{list}");

    let back = MatrixGraph::from(&list);
    info!("converted back to a matrix graph with {} vertices", back.vertex_count());
    print!("{back}");
}
