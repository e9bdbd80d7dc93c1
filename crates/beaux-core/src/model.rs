//! The diagram data model: typed node cards, directed connections, and the
//! JSON document that bundles them for persistence and exchange.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::Point;

/// Fixed rendered width of a node card, in canvas units.
pub const NODE_WIDTH: f64 = 200.0;
/// Default rendered height of a collapsed card.
pub const NODE_HEIGHT: f64 = 80.0;

/// Closed set of architectural element kinds. The type drives the default
/// color and sidebar grouping only; no other behavior branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Component,
    Page,
    Hook,
    Util,
    Notes,
}

impl NodeType {
    pub const ALL: [NodeType; 5] = [
        NodeType::Component,
        NodeType::Page,
        NodeType::Hook,
        NodeType::Util,
        NodeType::Notes,
    ];

    /// Default card color for the type, as a hex string.
    pub fn default_color(self) -> &'static str {
        match self {
            NodeType::Component => "#3b82f6",
            NodeType::Page => "#10b981",
            NodeType::Hook => "#8b5cf6",
            NodeType::Util => "#f59e0b",
            NodeType::Notes => "#ec4899",
        }
    }
}

/// A positioned, typed, user-editable card on the canvas.
///
/// `position` is the top-left anchor in canvas space. Width is fixed at
/// [`NODE_WIDTH`]; rendered height grows with visible content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    pub id: String,
    pub name: String,
    pub position: Point,
    pub color: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub notes: String,
    /// Whether the card hides its code panel. Document state, distinct from
    /// the view-only expanded set kept by the canvas engine.
    #[serde(default = "default_collapsed")]
    pub is_code_collapsed: bool,
}

fn default_collapsed() -> bool {
    true
}

impl ComponentNode {
    pub fn new(name: impl Into<String>, node_type: NodeType, position: Point) -> Self {
        Self {
            id: fresh_id(),
            name: name.into(),
            position,
            color: node_type.default_color().to_string(),
            node_type,
            code: String::new(),
            notes: String::new(),
            is_code_collapsed: true,
        }
    }

    /// Center of the card at its default height.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + NODE_WIDTH / 2.0,
            self.position.y + NODE_HEIGHT / 2.0,
        )
    }
}

/// A directed, optionally labeled edge between two node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(default)]
    pub label: String,
}

impl Connection {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            label: String::new(),
        }
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source_id == node_id || self.target_id == node_id
    }
}

/// The unit of persistence and JSON import/export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramDocument {
    pub nodes: Vec<ComponentNode>,
    pub connections: Vec<Connection>,
    #[serde(default = "default_document_name")]
    pub name: String,
    #[serde(default = "Utc::now")]
    pub last_saved: DateTime<Utc>,
}

pub(crate) fn default_document_name() -> String {
    "Untitled diagram".to_string()
}

impl DiagramDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            name: name.into(),
            last_saved: Utc::now(),
        }
    }
}

/// Opaque unique id for nodes, connections, and saved documents.
pub(crate) fn fresh_id() -> String {
    Uuid::new_v4().simple().to_string()
}
