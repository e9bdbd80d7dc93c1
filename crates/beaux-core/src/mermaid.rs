//! Mermaid flowchart import: a lenient parser for a constrained subset,
//! fed through the layered layout to produce positioned diagram nodes.
//!
//! Supported: `graph`/`flowchart` headers with `TD`/`TB`/`LR` directions,
//! bracketed node definitions (`ID[Label]` and the common shape variants),
//! and edge lines using `-->`, `---`, `==>` or `--x` with an optional
//! `|label|` annotation. Anything else is silently skipped; this is a
//! deliberate subset, not a full grammar.

use indexmap::IndexMap;
use tracing::debug;

use beaux_layout::{LayoutConfig, LayoutGraph, RankDir, layout};

use crate::error::{Error, Result};
use crate::geom::Point;
use crate::model::{ComponentNode, Connection, NODE_HEIGHT, NODE_WIDTH, NodeType};

const NODE_SEP: f64 = 80.0;
const RANK_SEP: f64 = 100.0;
const PADDING: f64 = 50.0;

/// Edge connectors, checked in this priority order on position ties.
const CONNECTORS: [&str; 4] = ["-->", "---", "==>", "--x"];

#[derive(Debug, Clone, PartialEq)]
pub struct FlowVertex {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowEdge {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub connector: String,
}

#[derive(Debug, Clone)]
pub struct FlowGraph {
    pub direction: RankDir,
    /// Declaration order preserved; implicit endpoints included.
    pub vertices: IndexMap<String, FlowVertex>,
    pub edges: Vec<FlowEdge>,
}

/// Parses flowchart source text. Empty input or input yielding zero
/// vertices is an error; unparseable lines are skipped.
pub fn parse_flowchart(source: &str) -> Result<FlowGraph> {
    if source.trim().is_empty() {
        return Err(Error::MermaidParse("mermaid input is empty".to_string()));
    }

    let mut direction = RankDir::TB;
    let mut vertices: IndexMap<String, FlowVertex> = IndexMap::new();
    let mut edges: Vec<FlowEdge> = Vec::new();

    // Statements separate on newlines; trailing `;` separators are also
    // tolerated.
    for raw_line in source.lines().flat_map(|l| l.split(';')) {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        if let Some(rest) = line
            .strip_prefix("graph")
            .or_else(|| line.strip_prefix("flowchart"))
        {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                direction = parse_direction(rest.trim());
                continue;
            }
        }

        if let Some((connector, pos)) = find_connector(line) {
            let (source_str, rest) = line.split_at(pos);
            let rest = &rest[connector.len()..];

            let Some(source) = parse_node_token(source_str.trim()) else {
                continue;
            };
            let (label, target_str) = split_edge_label(rest.trim());
            let Some(target) = parse_node_token(target_str.trim()) else {
                continue;
            };

            let source_id = source.id.clone();
            let target_id = target.id.clone();
            declare(&mut vertices, source);
            declare(&mut vertices, target);

            edges.push(FlowEdge {
                source: source_id,
                target: target_id,
                label,
                connector: connector.to_string(),
            });
            continue;
        }

        // Standalone node definition, e.g. `A[Node Label]`. Bare words are
        // not declarations; they fall through as skipped lines.
        if let Some(vertex) = parse_node_token(line) {
            if vertex.label != vertex.id {
                declare(&mut vertices, vertex);
            }
        }
    }

    if vertices.is_empty() {
        return Err(Error::MermaidParse(
            "mermaid diagram appears empty or could not be parsed".to_string(),
        ));
    }

    debug!(
        vertices = vertices.len(),
        edges = edges.len(),
        "parsed mermaid flowchart"
    );
    Ok(FlowGraph {
        direction,
        vertices,
        edges,
    })
}

/// Parses, lays out, and converts flowchart text into canvas contents.
///
/// Layout centers become top-left node positions; node types are inferred
/// from labels (always overridable after import); self-loops are skipped
/// per the uniform connection policy. Errors leave nothing for the caller
/// to apply, so canvas state stays untouched on failure.
pub fn import_flowchart(source: &str) -> Result<(Vec<ComponentNode>, Vec<Connection>)> {
    let graph = parse_flowchart(source)?;

    let mut layout_graph = LayoutGraph::new();
    for vertex in graph.vertices.values() {
        layout_graph.add_node(vertex.id.clone(), NODE_WIDTH, NODE_HEIGHT);
    }
    for edge in &graph.edges {
        layout_graph.add_edge(edge.source.clone(), edge.target.clone(), edge.label.clone());
    }

    let config = LayoutConfig {
        rankdir: graph.direction,
        nodesep: NODE_SEP,
        ranksep: RANK_SEP,
        marginx: PADDING,
        marginy: PADDING,
    };
    let laid_out = layout(&layout_graph, &config);

    let nodes = laid_out
        .nodes
        .iter()
        .map(|n| {
            let label = graph
                .vertices
                .get(&n.id)
                .map(|v| v.label.clone())
                .unwrap_or_else(|| n.id.clone());
            let node_type = infer_node_type(&label);
            ComponentNode {
                id: n.id.clone(),
                name: label,
                position: Point::new(n.x - n.width / 2.0, n.y - n.height / 2.0),
                color: node_type.default_color().to_string(),
                node_type,
                code: String::new(),
                notes: String::new(),
                is_code_collapsed: true,
            }
        })
        .collect();

    let connections = graph
        .edges
        .iter()
        .enumerate()
        .filter(|(_, e)| e.source != e.target)
        .map(|(index, e)| Connection {
            id: format!("e{index}-{}-{}", e.source, e.target),
            source_id: e.source.clone(),
            target_id: e.target.clone(),
            label: e.label.clone().unwrap_or_default(),
        })
        .collect();

    Ok((nodes, connections))
}

/// Heuristic node-type inference from a label; best-effort default only.
pub fn infer_node_type(label: &str) -> NodeType {
    let lower = label.to_lowercase();
    if lower.contains("page") || lower.contains("screen") {
        NodeType::Page
    } else if lower.starts_with("use") || lower.contains("hook") {
        NodeType::Hook
    } else if lower.contains("util") || lower.contains("helper") {
        NodeType::Util
    } else if lower.contains("note") {
        NodeType::Notes
    } else {
        NodeType::Component
    }
}

fn strip_inline_comment(line: &str) -> &str {
    match line.find("%%") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn parse_direction(token: &str) -> RankDir {
    match token.split_whitespace().next() {
        Some("LR") => RankDir::LR,
        _ => RankDir::TB,
    }
}

/// Earliest connector occurrence; list order breaks position ties so
/// `-->` wins over `---` on shared prefixes.
fn find_connector(line: &str) -> Option<(&'static str, usize)> {
    let mut best: Option<(&'static str, usize)> = None;
    for connector in CONNECTORS {
        if let Some(pos) = line.find(connector) {
            if best.map_or(true, |(_, bp)| pos < bp) {
                best = Some((connector, pos));
            }
        }
    }
    best
}

/// Splits an optional leading `|label|` annotation off the target side of
/// an edge line.
fn split_edge_label(rest: &str) -> (Option<String>, &str) {
    let Some(after_open) = rest.strip_prefix('|') else {
        return (None, rest);
    };
    match after_open.find('|') {
        Some(close) => {
            let label = after_open[..close].trim().to_string();
            (Some(label), &after_open[close + 1..])
        }
        None => (None, rest),
    }
}

/// Parses a node token: a word identifier with an optional bracketed label
/// in any of the common shape variants.
fn parse_node_token(token: &str) -> Option<FlowVertex> {
    let id_len = token
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(token.len());
    if id_len == 0 {
        return None;
    }
    let id = &token[..id_len];
    let rest = &token[id_len..];

    let label = extract_bracketed(rest).unwrap_or_else(|| id.to_string());
    Some(FlowVertex {
        id: id.to_string(),
        label,
    })
}

/// Label text inside `[..]`, `((..))`, `(..)`, `{..}` or `>..]`.
fn extract_bracketed(rest: &str) -> Option<String> {
    let pairs: [(&str, &str); 5] = [("((", "))"), ("[", "]"), ("(", ")"), ("{", "}"), (">", "]")];
    for (open, close) in pairs {
        if let Some(inner) = rest.strip_prefix(open) {
            if let Some(end) = inner.find(close) {
                let text = inner[..end].trim();
                if !text.is_empty() {
                    return Some(text.to_string());
                }
            }
        }
    }
    None
}

fn declare(vertices: &mut IndexMap<String, FlowVertex>, vertex: FlowVertex) {
    match vertices.get_mut(&vertex.id) {
        Some(existing) => {
            // A bracketed definition upgrades an implicit declaration.
            if existing.label == existing.id && vertex.label != vertex.id {
                existing.label = vertex.label;
            }
        }
        None => {
            vertices.insert(vertex.id.clone(), vertex);
        }
    }
}
