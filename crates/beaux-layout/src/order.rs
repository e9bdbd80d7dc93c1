//! In-rank ordering: barycenter sweeps to reduce edge crossings.
//!
//! Initial order is input order per rank; a fixed number of alternating
//! down/up sweeps then sorts each rank by the mean position of its
//! neighbors in the adjacent rank. Fixed iteration count keeps the result
//! deterministic without a crossing-count convergence check.

const SWEEPS: usize = 4;

/// Produces per-rank node orderings. `ranks` maps node index to rank;
/// edges are `(source, target)` index pairs.
pub(crate) fn arrange(ranks: &[i32], edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let max_rank = ranks.iter().copied().max().unwrap_or(0);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); (max_rank + 1) as usize];
    for (v, &r) in ranks.iter().enumerate() {
        layers[r as usize].push(v);
    }

    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); ranks.len()];
    let mut succs: Vec<Vec<usize>> = vec![Vec::new(); ranks.len()];
    for &(v, w) in edges {
        if v == w {
            continue;
        }
        succs[v].push(w);
        preds[w].push(v);
    }

    // Position of each node within its layer, maintained across sweeps.
    let mut pos = vec![0usize; ranks.len()];
    let sync_pos = |layers: &[Vec<usize>], pos: &mut [usize]| {
        for layer in layers {
            for (i, &v) in layer.iter().enumerate() {
                pos[v] = i;
            }
        }
    };
    sync_pos(&layers, &mut pos);

    for sweep in 0..SWEEPS {
        let downward = sweep % 2 == 0;
        let layer_count = layers.len();
        for li in 0..layer_count {
            let li = if downward { li } else { layer_count - 1 - li };
            let neighbors: &[Vec<usize>] = if downward { &preds } else { &succs };
            let mut keyed: Vec<(f64, usize)> = layers[li]
                .iter()
                .map(|&v| (barycenter(v, neighbors, &pos), v))
                .collect();
            keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            layers[li] = keyed.into_iter().map(|(_, v)| v).collect();
            for (i, &v) in layers[li].iter().enumerate() {
                pos[v] = i;
            }
        }
    }

    layers
}

/// Mean neighbor position; nodes without neighbors keep their slot.
fn barycenter(v: usize, neighbors: &[Vec<usize>], pos: &[usize]) -> f64 {
    let adj = &neighbors[v];
    if adj.is_empty() {
        return pos[v] as f64;
    }
    adj.iter().map(|&n| pos[n] as f64).sum::<f64>() / adj.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncrosses_a_two_rank_swap() {
        // Rank 0: a b; rank 1: c d with a->d, b->c crossing once.
        let ranks = vec![0, 0, 1, 1];
        let layers = arrange(&ranks, &[(0, 3), (1, 2)]);
        assert_eq!(layers.len(), 2);
        // After sweeps, c should sit under b and d under a (or the
        // symmetric arrangement): the pair order differs between ranks.
        let top: Vec<usize> = layers[0].clone();
        let bottom: Vec<usize> = layers[1].clone();
        let top_pos_a = top.iter().position(|&v| v == 0).unwrap();
        let bottom_pos_d = bottom.iter().position(|&v| v == 3).unwrap();
        assert_eq!(top_pos_a, bottom_pos_d);
    }

    #[test]
    fn isolated_nodes_keep_their_slot() {
        let ranks = vec![0, 0, 0];
        let layers = arrange(&ranks, &[]);
        assert_eq!(layers[0], vec![0, 1, 2]);
    }
}
