#![forbid(unsafe_code)]

//! Layered graph layout for component diagrams.
//!
//! A compact dagre-style pipeline: rank assignment (longest path over an
//! acyclic view), in-rank ordering (barycenter sweeps), then coordinate
//! assignment. Deterministic for a given input order; cycles and self
//! edges are tolerated rather than rejected.

pub mod model;
mod order;
mod position;
mod rank;

pub use model::{
    LayoutConfig, LayoutEdge, LayoutGraph, LayoutNode, LayoutResult, Point, PositionedNode,
    RankDir, RoutedEdge,
};

use rustc_hash::FxHashMap;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runs the full pipeline over `graph`.
///
/// Output positions are node centers (dagre convention). Edges whose
/// endpoints are not declared nodes are dropped from the routed output;
/// callers own referential integrity of their inputs.
pub fn layout(graph: &LayoutGraph, config: &LayoutConfig) -> LayoutResult {
    let index: FxHashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let indexed_edges: Vec<(usize, usize)> = graph
        .edges
        .iter()
        .filter_map(|e| {
            let v = *index.get(e.source.as_str())?;
            let w = *index.get(e.target.as_str())?;
            Some((v, w))
        })
        .collect();

    let ranks = rank::assign(graph.nodes.len(), &indexed_edges);
    let layers = order::arrange(&ranks, &indexed_edges);
    let (centers, width, height) = position::assign(&graph.nodes, &layers, config);

    let mut order_of = vec![0usize; graph.nodes.len()];
    for layer in &layers {
        for (i, &v) in layer.iter().enumerate() {
            order_of[v] = i;
        }
    }

    let nodes = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| PositionedNode {
            id: n.id.clone(),
            x: centers[i].x,
            y: centers[i].y,
            width: n.width,
            height: n.height,
            rank: ranks[i],
            order: order_of[i],
        })
        .collect();

    let edges = graph
        .edges
        .iter()
        .filter_map(|e| {
            let v = *index.get(e.source.as_str())?;
            let w = *index.get(e.target.as_str())?;
            Some(RoutedEdge {
                source: e.source.clone(),
                target: e.target.clone(),
                label: e.label.clone(),
                points: vec![centers[v], centers[w]],
            })
        })
        .collect();

    LayoutResult {
        nodes,
        edges,
        width,
        height,
    }
}
