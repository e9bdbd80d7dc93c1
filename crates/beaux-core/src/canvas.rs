//! The canvas interaction engine.
//!
//! Owns the node/connection state, the interaction mode (select, drag,
//! connect), the viewport, and the undo/redo history. All operations run
//! synchronously and either fully succeed or leave state untouched; every
//! committed mutation pushes one full snapshot onto the history.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geom::{ConnectionPath, Point, Viewport, connection_path};
use crate::history::History;
use crate::model::{
    ComponentNode, Connection, DiagramDocument, NODE_HEIGHT, NODE_WIDTH, NodeType,
    default_document_name,
};

/// Extra rendered height of a card showing its code panel.
const CODE_PANEL_HEIGHT: f64 = 120.0;
/// Minimum vertical gap the collision nudge maintains between cards.
const MIN_NODE_GAP: f64 = 20.0;
/// Hit-test padding around a card, canvas units.
const HIT_PAD: f64 = 5.0;

/// One undoable point in time: a deep copy of the committed model.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub nodes: Vec<ComponentNode>,
    pub connections: Vec<Connection>,
}

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Idle,
    Connecting {
        source_id: String,
    },
    Dragging {
        node_id: String,
        grab_offset: Point,
        moved: bool,
    },
}

#[derive(Debug)]
pub struct CanvasEngine {
    nodes: Vec<ComponentNode>,
    connections: Vec<Connection>,
    document_name: String,
    selected_node: Option<String>,
    selected_connection: Option<String>,
    mode: Mode,
    viewport: Viewport,
    container_size: (f64, f64),
    pointer: Point,
    expanded: FxHashSet<String>,
    history: History<Snapshot>,
    feedback: Vec<String>,
}

impl Default for CanvasEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasEngine {
    pub fn new() -> Self {
        let mut engine = Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            document_name: default_document_name(),
            selected_node: None,
            selected_connection: None,
            mode: Mode::Idle,
            viewport: Viewport::default(),
            container_size: (800.0, 600.0),
            pointer: Point::default(),
            expanded: FxHashSet::default(),
            history: History::new(),
            feedback: Vec::new(),
        };
        engine.commit();
        engine
    }

    // --- accessors ---------------------------------------------------------

    pub fn nodes(&self) -> &[ComponentNode] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    pub fn set_document_name(&mut self, name: impl Into<String>) {
        self.document_name = name.into();
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_container_size(&mut self, width: f64, height: f64) {
        self.container_size = (width, height);
    }

    pub fn selected_node(&self) -> Option<&str> {
        self.selected_node.as_deref()
    }

    pub fn selected_connection(&self) -> Option<&str> {
        self.selected_connection.as_deref()
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self.mode, Mode::Connecting { .. })
    }

    /// Source node of the pending connection gesture, if one is active.
    pub fn pending_connection_source(&self) -> Option<&str> {
        match &self.mode {
            Mode::Connecting { source_id } => Some(source_id),
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Drains the transient user-feedback messages recorded since the last
    /// call (toast texts for the host UI).
    pub fn take_feedback(&mut self) -> Vec<String> {
        std::mem::take(&mut self.feedback)
    }

    fn node(&self, id: &str) -> Option<&ComponentNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut ComponentNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    // --- history -----------------------------------------------------------

    fn commit(&mut self) {
        self.history.push(Snapshot {
            nodes: self.nodes.clone(),
            connections: self.connections.clone(),
        });
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.nodes = snapshot.nodes;
        self.connections = snapshot.connections;
        self.mode = Mode::Idle;
        if let Some(id) = &self.selected_node {
            if !self.nodes.iter().any(|n| &n.id == id) {
                self.selected_node = None;
            }
        }
        if let Some(id) = &self.selected_connection {
            if !self.connections.iter().any(|c| &c.id == id) {
                self.selected_connection = None;
            }
        }
    }

    /// Steps back one history entry; `false` at the boundary.
    pub fn undo(&mut self) -> bool {
        match self.history.undo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Steps forward one history entry; `false` at the boundary.
    pub fn redo(&mut self) -> bool {
        match self.history.redo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    // --- node lifecycle ----------------------------------------------------

    /// Adds a node centered in the current viewport. Whitespace-only names
    /// are rejected before any mutation.
    pub fn add_node(&mut self, name: &str, node_type: NodeType) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "component name cannot be empty".to_string(),
            ));
        }

        let screen_center = Point::new(self.container_size.0 / 2.0, self.container_size.1 / 2.0);
        let center = self.viewport.screen_to_canvas(screen_center);
        let position = Point::new(center.x - NODE_WIDTH / 2.0, center.y - NODE_HEIGHT / 2.0);

        let node = ComponentNode::new(name, node_type, position);
        let id = node.id.clone();
        debug!(node = %id, name, "add node");
        self.nodes.push(node);
        self.commit();
        Ok(id)
    }

    /// Removes the node and every connection touching it, atomically, as
    /// one history entry.
    pub fn delete_node(&mut self, id: &str) -> Result<()> {
        if self.node(id).is_none() {
            return Err(Error::UnknownNode(id.to_string()));
        }
        debug!(node = %id, "delete node");
        self.nodes.retain(|n| n.id != id);
        self.connections.retain(|c| !c.touches(id));
        if self.selected_node.as_deref() == Some(id) {
            self.selected_node = None;
        }
        if let Some(sel) = &self.selected_connection {
            if !self.connections.iter().any(|c| &c.id == sel) {
                self.selected_connection = None;
            }
        }
        self.expanded.remove(id);
        self.commit();
        Ok(())
    }

    /// Applies an inline edit (name, color, type, code, notes) as one
    /// history entry. The id is immutable; emptying the name is rejected
    /// and the edit rolled back.
    pub fn edit_node(
        &mut self,
        id: &str,
        edit: impl FnOnce(&mut ComponentNode),
    ) -> Result<()> {
        let Some(index) = self.nodes.iter().position(|n| n.id == id) else {
            return Err(Error::UnknownNode(id.to_string()));
        };
        let before = self.nodes[index].clone();
        edit(&mut self.nodes[index]);
        self.nodes[index].id = before.id.clone();
        if self.nodes[index].name.trim().is_empty() {
            self.nodes[index] = before;
            return Err(Error::InvalidInput(
                "component name cannot be empty".to_string(),
            ));
        }
        if self.nodes[index] != before {
            self.commit();
        }
        Ok(())
    }

    // --- drag gesture ------------------------------------------------------

    /// Starts dragging a node. `pointer` is in canvas space; the node keeps
    /// its grab offset so it does not jump under the cursor.
    pub fn begin_drag(&mut self, id: &str, pointer: Point) -> Result<()> {
        let Some(node) = self.node(id) else {
            return Err(Error::UnknownNode(id.to_string()));
        };
        let grab_offset = Point::new(pointer.x - node.position.x, pointer.y - node.position.y);
        self.selected_node = Some(id.to_string());
        self.selected_connection = None;
        self.mode = Mode::Dragging {
            node_id: id.to_string(),
            grab_offset,
            moved: false,
        };
        Ok(())
    }

    /// Tracks the pointer in canvas space. While dragging, moves the node
    /// without recording history; while connecting, feeds the live preview
    /// path.
    pub fn pointer_moved(&mut self, pointer: Point) {
        self.pointer = pointer;
        if let Mode::Dragging {
            node_id,
            grab_offset,
            moved,
        } = &mut self.mode
        {
            let position = Point::new(pointer.x - grab_offset.x, pointer.y - grab_offset.y);
            let id = node_id.clone();
            *moved = true;
            if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
                node.position = position;
            }
        }
    }

    /// Ends the drag gesture, coalescing the whole movement into exactly
    /// one history entry. A drag that never moved records nothing.
    pub fn end_drag(&mut self) {
        if let Mode::Dragging { moved, .. } = &self.mode {
            let moved = *moved;
            self.mode = Mode::Idle;
            if moved {
                self.commit();
            }
        }
    }

    // --- connection gesture ------------------------------------------------

    /// Enters connecting mode with `source_id` as the pending source.
    pub fn start_connection(&mut self, source_id: &str) -> Result<()> {
        let Some(node) = self.node(source_id) else {
            return Err(Error::UnknownNode(source_id.to_string()));
        };
        self.feedback.push(format!(
            "Select another component to connect from {}",
            node.name
        ));
        self.selected_node = Some(source_id.to_string());
        self.mode = Mode::Connecting {
            source_id: source_id.to_string(),
        };
        Ok(())
    }

    /// Completes the pending connection on `target_id`.
    ///
    /// Connecting a node to itself is rejected with user feedback and the
    /// gesture exits without mutation. Duplicate edges are allowed.
    pub fn complete_connection(&mut self, target_id: &str) -> Result<String> {
        let Mode::Connecting { source_id } = self.mode.clone() else {
            return Err(Error::InvalidInput(
                "no connection gesture in progress".to_string(),
            ));
        };
        self.mode = Mode::Idle;

        if target_id == source_id {
            self.feedback
                .push("A component cannot connect to itself".to_string());
            return Err(Error::SelfConnection);
        }
        let Some(target) = self.node(target_id) else {
            return Err(Error::UnknownNode(target_id.to_string()));
        };
        let target_name = target.name.clone();
        let source_name = self
            .node(&source_id)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| source_id.clone());

        let connection = Connection::new(source_id, target_id);
        let id = connection.id.clone();
        debug!(connection = %id, "create connection");
        self.connections.push(connection);
        self.commit();
        self.feedback
            .push(format!("Connected {source_name} to {target_name}"));
        Ok(id)
    }

    /// Cancels the pending connection gesture (empty-canvas completion).
    pub fn cancel_connection(&mut self) {
        if self.is_connecting() {
            self.mode = Mode::Idle;
        }
    }

    /// Live preview path from the pending source's center to the pointer.
    /// Purely visual; never part of the committed model.
    pub fn live_connection_path(&self) -> Option<ConnectionPath> {
        let source_id = self.pending_connection_source()?;
        let center = self.node_center(source_id);
        Some(connection_path(center, self.pointer))
    }

    pub fn delete_connection(&mut self, id: &str) -> Result<()> {
        if !self.connections.iter().any(|c| c.id == id) {
            return Err(Error::UnknownConnection(id.to_string()));
        }
        self.connections.retain(|c| c.id != id);
        if self.selected_connection.as_deref() == Some(id) {
            self.selected_connection = None;
        }
        self.commit();
        Ok(())
    }

    pub fn set_connection_label(&mut self, id: &str, label: &str) -> Result<()> {
        let Some(connection) = self.connections.iter_mut().find(|c| c.id == id) else {
            return Err(Error::UnknownConnection(id.to_string()));
        };
        if connection.label != label {
            connection.label = label.to_string();
            self.commit();
        }
        Ok(())
    }

    // --- selection ---------------------------------------------------------

    /// Node and connection selection are mutually exclusive.
    pub fn select_node(&mut self, id: Option<&str>) {
        self.selected_node = id.map(str::to_string);
        if id.is_some() {
            self.selected_connection = None;
        }
    }

    pub fn select_connection(&mut self, id: Option<&str>) {
        self.selected_connection = id.map(str::to_string);
        if id.is_some() {
            self.selected_node = None;
        }
    }

    /// Background click: clears both selections and cancels any pending
    /// connection gesture.
    pub fn background_clicked(&mut self) {
        self.selected_node = None;
        self.selected_connection = None;
        self.cancel_connection();
    }

    // --- viewport ----------------------------------------------------------

    /// Pans the canvas. Viewport state is not undoable.
    pub fn pan_canvas(&mut self, delta: Point) {
        self.viewport.pan(delta);
    }

    /// Adjusts zoom by `delta`, clamped to `[0.5, 2.0]`. Never undoable.
    pub fn set_zoom(&mut self, delta: f64) {
        self.viewport.adjust_zoom(delta);
    }

    // --- view state --------------------------------------------------------

    /// Toggles the view-only expanded state of a node (sidebar detail
    /// panel). Never recorded in history or the persisted document.
    pub fn toggle_expand(&mut self, id: &str) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        if !self.expanded.insert(id.to_string()) {
            self.expanded.remove(id);
        }
        true
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flips the persisted code-panel collapse flag on a node, then nudges
    /// overlapping cards below it to keep a minimum gap. The flag is
    /// document state, so the flip and any nudged positions commit as one
    /// history entry.
    pub fn toggle_code_collapsed(&mut self, id: &str) -> Result<()> {
        let Some(node) = self.node_mut(id) else {
            return Err(Error::UnknownNode(id.to_string()));
        };
        node.is_code_collapsed = !node.is_code_collapsed;
        self.nudge_below(id);
        self.commit();
        Ok(())
    }

    // --- geometry ----------------------------------------------------------

    /// Rendered height of a card given its collapse state.
    pub fn rendered_height(&self, node: &ComponentNode) -> f64 {
        if !node.is_code_collapsed && !node.code.is_empty() {
            NODE_HEIGHT + CODE_PANEL_HEIGHT
        } else {
            NODE_HEIGHT
        }
    }

    /// Center of a node's card; the zero point if the id does not resolve
    /// (dangling endpoints render as degenerate anchors, never a failure).
    pub fn node_center(&self, id: &str) -> Point {
        match self.node(id) {
            Some(node) => Point::new(
                node.position.x + NODE_WIDTH / 2.0,
                node.position.y + self.rendered_height(node) / 2.0,
            ),
            None => Point::default(),
        }
    }

    /// Curved path geometry for a committed connection.
    pub fn connection_geometry(&self, connection: &Connection) -> ConnectionPath {
        connection_path(
            self.node_center(&connection.source_id),
            self.node_center(&connection.target_id),
        )
    }

    /// Topmost node whose padded card bounds contain the canvas-space point.
    pub fn hit_test(&self, point: Point) -> Option<&ComponentNode> {
        self.nodes.iter().rev().find(|node| {
            let height = self.rendered_height(node);
            point.x >= node.position.x - HIT_PAD
                && point.x <= node.position.x + NODE_WIDTH + HIT_PAD
                && point.y >= node.position.y - HIT_PAD
                && point.y <= node.position.y + height + HIT_PAD
        })
    }

    /// Best-effort packing: cards below `anchor_id` that overlap it
    /// horizontally are pushed down to keep [`MIN_NODE_GAP`]. Advisory
    /// only; manual drags can still overlap cards.
    fn nudge_below(&mut self, anchor_id: &str) {
        let Some(anchor) = self.node(anchor_id) else {
            return;
        };
        let anchor_x = anchor.position.x;
        let anchor_top = anchor.position.y;
        let mut placed = vec![(anchor_x, anchor_top + self.rendered_height(anchor))];

        let mut below: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.id != anchor_id && n.position.y > anchor_top)
            .map(|(i, _)| i)
            .collect();
        below.sort_by(|&a, &b| {
            self.nodes[a]
                .position
                .y
                .total_cmp(&self.nodes[b].position.y)
        });

        for index in below {
            let x = self.nodes[index].position.x;
            let mut top = self.nodes[index].position.y;
            for &(px, pbottom) in &placed {
                let overlaps = x < px + NODE_WIDTH && px < x + NODE_WIDTH;
                if overlaps && top < pbottom + MIN_NODE_GAP {
                    top = pbottom + MIN_NODE_GAP;
                }
            }
            self.nodes[index].position.y = top;
            let bottom = top + self.rendered_height(&self.nodes[index]);
            placed.push((x, bottom));
        }
    }

    // --- bulk import / documents -------------------------------------------

    /// Replaces the committed model wholesale (Mermaid import, JSON load),
    /// as one history entry. Callers validate their input first; a failed
    /// parse must never reach this method.
    pub fn replace_contents(&mut self, nodes: Vec<ComponentNode>, connections: Vec<Connection>) {
        debug!(
            nodes = nodes.len(),
            connections = connections.len(),
            "replace canvas contents"
        );
        self.nodes = nodes;
        self.connections = connections;
        self.selected_node = None;
        self.selected_connection = None;
        self.mode = Mode::Idle;
        self.expanded.clear();
        self.commit();
    }

    /// Loads a document: contents, name, one history entry.
    pub fn load_document(&mut self, document: DiagramDocument) {
        self.document_name = document.name;
        self.replace_contents(document.nodes, document.connections);
    }

    /// Snapshots the committed model as a document for saving/export.
    pub fn document(&self) -> DiagramDocument {
        DiagramDocument {
            nodes: self.nodes.clone(),
            connections: self.connections.clone(),
            name: self.document_name.clone(),
            last_saved: chrono::Utc::now(),
        }
    }
}
