//! Coordinate assignment: ranks along the flow axis, ordered nodes across
//! it, each rank centered against the widest rank.

use crate::model::{LayoutConfig, LayoutNode, Point, RankDir};

/// Assigns a center position to every node. `layers` is the per-rank order
/// from the ordering pass.
pub(crate) fn assign(
    nodes: &[LayoutNode],
    layers: &[Vec<usize>],
    config: &LayoutConfig,
) -> (Vec<Point>, f64, f64) {
    let mut centers = vec![Point { x: 0.0, y: 0.0 }; nodes.len()];

    // In flow terms: "breadth" is the axis a rank extends along, "depth"
    // advances rank by rank. TB maps breadth→x/depth→y, LR the reverse.
    let breadth_size = |n: &LayoutNode| match config.rankdir {
        RankDir::TB => n.width,
        RankDir::LR => n.height,
    };
    let depth_size = |n: &LayoutNode| match config.rankdir {
        RankDir::TB => n.height,
        RankDir::LR => n.width,
    };

    let mut rank_breadths: Vec<f64> = Vec::with_capacity(layers.len());
    for layer in layers {
        let total: f64 = layer.iter().map(|&v| breadth_size(&nodes[v])).sum();
        let gaps = config.nodesep * layer.len().saturating_sub(1) as f64;
        rank_breadths.push(total + gaps);
    }
    let max_breadth = rank_breadths.iter().copied().fold(0.0, f64::max);

    let mut depth_cursor = 0.0;
    let mut max_depth = 0.0;
    for (li, layer) in layers.iter().enumerate() {
        let rank_depth = layer
            .iter()
            .map(|&v| depth_size(&nodes[v]))
            .fold(0.0, f64::max);
        let depth_center = depth_cursor + rank_depth / 2.0;

        let mut breadth_cursor = (max_breadth - rank_breadths[li]) / 2.0;
        for &v in layer {
            let b = breadth_size(&nodes[v]);
            let breadth_center = breadth_cursor + b / 2.0;
            centers[v] = match config.rankdir {
                RankDir::TB => Point {
                    x: config.marginx + breadth_center,
                    y: config.marginy + depth_center,
                },
                RankDir::LR => Point {
                    x: config.marginx + depth_center,
                    y: config.marginy + breadth_center,
                },
            };
            breadth_cursor += b + config.nodesep;
        }

        depth_cursor += rank_depth;
        max_depth = depth_cursor;
        if li + 1 < layers.len() {
            depth_cursor += config.ranksep;
        }
    }

    let (total_w, total_h) = match config.rankdir {
        RankDir::TB => (
            max_breadth + 2.0 * config.marginx,
            max_depth + 2.0 * config.marginy,
        ),
        RankDir::LR => (
            max_depth + 2.0 * config.marginx,
            max_breadth + 2.0 * config.marginy,
        ),
    };
    (centers, total_w, total_h)
}
