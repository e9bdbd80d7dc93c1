use beaux_layout::{LayoutConfig, LayoutGraph, RankDir, layout};

fn card_graph() -> LayoutGraph {
    let mut g = LayoutGraph::new();
    for id in ["a", "b", "c", "d", "e"] {
        g.add_node(id, 200.0, 80.0);
    }
    g.add_edge("a", "b", None);
    g.add_edge("a", "c", None);
    g.add_edge("b", "d", None);
    g.add_edge("c", "d", None);
    g.add_edge("d", "e", Some("done".to_string()));
    g
}

fn node<'a>(
    res: &'a beaux_layout::LayoutResult,
    id: &str,
) -> &'a beaux_layout::PositionedNode {
    res.nodes.iter().find(|n| n.id == id).unwrap()
}

#[test]
fn ranks_respect_edge_direction() {
    let res = layout(&card_graph(), &LayoutConfig::default());
    for e in &res.edges {
        let v = node(&res, &e.source);
        let w = node(&res, &e.target);
        assert!(
            w.rank > v.rank,
            "edge {} -> {} ranks {} -> {}",
            e.source,
            e.target,
            v.rank,
            w.rank
        );
    }
}

#[test]
fn tb_ranks_advance_down_the_y_axis() {
    let res = layout(&card_graph(), &LayoutConfig::default());
    assert!(node(&res, "b").y > node(&res, "a").y);
    assert!(node(&res, "d").y > node(&res, "b").y);
    assert!(node(&res, "e").y > node(&res, "d").y);
}

#[test]
fn lr_ranks_advance_along_the_x_axis() {
    let config = LayoutConfig {
        rankdir: RankDir::LR,
        ..LayoutConfig::default()
    };
    let res = layout(&card_graph(), &config);
    assert!(node(&res, "b").x > node(&res, "a").x);
    assert!(node(&res, "e").x > node(&res, "d").x);
}

#[test]
fn siblings_keep_the_configured_node_separation() {
    let config = LayoutConfig {
        nodesep: 80.0,
        ranksep: 100.0,
        ..LayoutConfig::default()
    };
    let res = layout(&card_graph(), &config);
    let b = node(&res, "b");
    let c = node(&res, "c");
    assert_eq!(b.rank, c.rank);
    let gap = (b.x - c.x).abs() - 200.0;
    assert!((gap - 80.0).abs() < 1e-9, "gap was {gap}");
}

#[test]
fn adjacent_ranks_keep_the_configured_rank_separation() {
    let config = LayoutConfig {
        ranksep: 100.0,
        ..LayoutConfig::default()
    };
    let res = layout(&card_graph(), &config);
    let a = node(&res, "a");
    let b = node(&res, "b");
    // Centers of 80-high cards one rank apart: 80 + ranksep between centers.
    assert!(((b.y - a.y) - 180.0).abs() < 1e-9);
}

#[test]
fn margins_shift_the_whole_drawing() {
    let config = LayoutConfig {
        marginx: 50.0,
        marginy: 50.0,
        ..LayoutConfig::default()
    };
    let res = layout(&card_graph(), &config);
    for n in &res.nodes {
        assert!(n.x - n.width / 2.0 >= 50.0 - 1e-9);
        assert!(n.y - n.height / 2.0 >= 50.0 - 1e-9);
    }
}

#[test]
fn unknown_edge_endpoints_are_dropped_from_routing() {
    let mut g = LayoutGraph::new();
    g.add_node("a", 200.0, 80.0);
    g.add_edge("a", "ghost", None);
    let res = layout(&g, &LayoutConfig::default());
    assert_eq!(res.nodes.len(), 1);
    assert!(res.edges.is_empty());
}

#[test]
fn cyclic_input_still_positions_every_node() {
    let mut g = LayoutGraph::new();
    for id in ["x", "y", "z"] {
        g.add_node(id, 200.0, 80.0);
    }
    g.add_edge("x", "y", None);
    g.add_edge("y", "z", None);
    g.add_edge("z", "x", None);
    let res = layout(&g, &LayoutConfig::default());
    assert_eq!(res.nodes.len(), 3);
    assert_eq!(res.edges.len(), 3);
}

#[test]
fn layout_is_deterministic_for_identical_input() {
    let a = layout(&card_graph(), &LayoutConfig::default());
    let b = layout(&card_graph(), &LayoutConfig::default());
    for (m, n) in a.nodes.iter().zip(b.nodes.iter()) {
        assert_eq!(m.id, n.id);
        assert_eq!(m.x, n.x);
        assert_eq!(m.y, n.y);
    }
}
