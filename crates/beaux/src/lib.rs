#![forbid(unsafe_code)]

//! `beaux` is a headless diagram canvas engine for component-architecture
//! sketches: typed component cards, labeled connections, snapshot-based
//! undo/redo, Mermaid flowchart import with automatic layout, and JSON
//! persistence over a pluggable key-value store.
//!
//! The crate is UI-free. A host shell feeds pointer and keyboard input to
//! [`CanvasEngine`] and renders whatever the engine reports back; nothing
//! here draws.
//!
//! ```
//! use beaux::{CanvasEngine, NodeType};
//!
//! let mut engine = CanvasEngine::new();
//! let button = engine.add_node("Button", NodeType::Component).unwrap();
//! let page = engine.add_node("HomePage", NodeType::Page).unwrap();
//! engine.start_connection(&button).unwrap();
//! engine.complete_connection(&page).unwrap();
//! assert_eq!(engine.connections().len(), 1);
//! engine.undo();
//! assert!(engine.connections().is_empty());
//! ```

pub use beaux_core::*;

/// Layered graph layout, exposed for hosts that want to position nodes
/// without going through the Mermaid importer.
pub mod layout {
    pub use beaux_layout::{
        LayoutConfig, LayoutEdge, LayoutGraph, LayoutNode, LayoutResult, Point, PositionedNode,
        RankDir, RoutedEdge, layout,
    };
}
