//! Input/output types for the layout pipeline.
//!
//! These are intentionally lightweight and `Clone`-friendly so callers can
//! snapshot layout results in deterministic tests.

use serde::Serialize;

/// Flow direction of the layered layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankDir {
    /// Top to bottom: ranks advance along the y axis.
    #[default]
    TB,
    /// Left to right: ranks advance along the x axis.
    LR,
}

/// Separation constants and margins, in the same units as node sizes.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub rankdir: RankDir,
    /// Gap between adjacent nodes within one rank.
    pub nodesep: f64,
    /// Gap between adjacent ranks.
    pub ranksep: f64,
    pub marginx: f64,
    pub marginy: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            nodesep: 50.0,
            ranksep: 50.0,
            marginx: 0.0,
            marginy: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A node to lay out. `width`/`height` are the rendered footprint.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

/// A directed edge between node ids. Endpoints that do not resolve to a
/// declared node are dropped from the routed output.
#[derive(Debug, Clone)]
pub struct LayoutEdge {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
}

/// The graph handed to [`crate::layout`].
#[derive(Debug, Clone, Default)]
pub struct LayoutGraph {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

impl LayoutGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: impl Into<String>, width: f64, height: f64) {
        self.nodes.push(LayoutNode {
            id: id.into(),
            width,
            height,
        });
    }

    pub fn add_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        label: Option<String>,
    ) {
        self.edges.push(LayoutEdge {
            source: source.into(),
            target: target.into(),
            label,
        });
    }
}

/// A node with its assigned center position.
#[derive(Debug, Clone, Serialize)]
pub struct PositionedNode {
    pub id: String,
    /// Center coordinates (dagre convention; callers convert to top-left).
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rank: i32,
    pub order: usize,
}

/// A routed edge: straight segments through `points` (endpoint centers).
#[derive(Debug, Clone, Serialize)]
pub struct RoutedEdge {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub points: Vec<Point>,
}

/// Output of the full pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutResult {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<RoutedEdge>,
    /// Total extent of the laid-out graph, margins included.
    pub width: f64,
    pub height: f64,
}
