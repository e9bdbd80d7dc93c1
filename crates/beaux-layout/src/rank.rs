//! Rank assignment: longest-path ranks over an acyclic view of the graph.
//!
//! Cycles are tolerated: a DFS marks the edges that close a cycle and
//! ranking ignores them, so every node still receives a rank. The edges
//! themselves stay in the routed output.

/// Assigns a rank to every node. Edges are `(source, target)` index pairs
/// into the node list. Ranks are normalized to start at 0.
pub(crate) fn assign(node_count: usize, edges: &[(usize, usize)]) -> Vec<i32> {
    let forward = acyclic_edges(node_count, edges);

    let mut succs: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut indegree = vec![0usize; node_count];
    for &(v, w) in &forward {
        succs[v].push(w);
        indegree[w] += 1;
    }

    // Kahn order over the acyclic subgraph; rank(w) = max(rank(v) + 1).
    let mut ranks = vec![0i32; node_count];
    let mut queue: Vec<usize> = (0..node_count).filter(|&v| indegree[v] == 0).collect();
    let mut head = 0;
    while head < queue.len() {
        let v = queue[head];
        head += 1;
        for &w in &succs[v] {
            if ranks[v] + 1 > ranks[w] {
                ranks[w] = ranks[v] + 1;
            }
            indegree[w] -= 1;
            if indegree[w] == 0 {
                queue.push(w);
            }
        }
    }

    let min = ranks.iter().copied().min().unwrap_or(0);
    if min != 0 {
        for r in &mut ranks {
            *r -= min;
        }
    }
    ranks
}

/// Returns the subset of `edges` that does not close a cycle, discovered by
/// an iterative three-color DFS. Self edges are always excluded.
fn acyclic_edges(node_count: usize, edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut succs: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for &(v, w) in edges {
        if v != w {
            succs[v].push(w);
        }
    }

    const WHITE: u8 = 0;
    const GRAY: u8 = 1;
    const BLACK: u8 = 2;

    let mut color = vec![WHITE; node_count];
    let mut keep = Vec::with_capacity(edges.len());
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..node_count {
        if color[root] != WHITE {
            continue;
        }
        color[root] = GRAY;
        stack.push((root, 0));
        while let Some(&mut (v, ref mut next)) = stack.last_mut() {
            if *next < succs[v].len() {
                let w = succs[v][*next];
                *next += 1;
                match color[w] {
                    WHITE => {
                        color[w] = GRAY;
                        keep.push((v, w));
                        stack.push((w, 0));
                    }
                    GRAY => {
                        // Back edge: closes a cycle, skip for ranking.
                    }
                    _ => {
                        keep.push((v, w));
                    }
                }
            } else {
                color[v] = BLACK;
                stack.pop();
            }
        }
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_a_simple_chain() {
        let ranks = assign(3, &[(0, 1), (1, 2)]);
        assert_eq!(ranks, vec![0, 1, 2]);
    }

    #[test]
    fn rank_is_longest_path_over_diamonds() {
        // 0 -> 1 -> 3, 0 -> 2 -> 3 with an extra hop 1 -> 2.
        let ranks = assign(4, &[(0, 1), (0, 2), (1, 3), (2, 3), (1, 2)]);
        assert_eq!(ranks[0], 0);
        assert_eq!(ranks[1], 1);
        assert_eq!(ranks[2], 2);
        assert_eq!(ranks[3], 3);
    }

    #[test]
    fn cycles_still_rank_every_node() {
        let ranks = assign(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(ranks.len(), 3);
        assert!(ranks.iter().all(|&r| r >= 0));
        assert_eq!(ranks.iter().copied().min(), Some(0));
    }

    #[test]
    fn self_edges_do_not_affect_ranks() {
        let ranks = assign(2, &[(0, 0), (0, 1)]);
        assert_eq!(ranks, vec![0, 1]);
    }
}
