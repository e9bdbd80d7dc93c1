#![forbid(unsafe_code)]

//! Component-diagram core (headless).
//!
//! The engine behind a visual component-architecture sketching tool:
//! - a node/connection data model with JSON persistence,
//! - a canvas interaction engine (drag, pan, zoom, connect) with bounded
//!   undo/redo history,
//! - Mermaid flowchart import through a layered layout,
//! - a code-to-preview transformation shim,
//! - the request/response surface of an AI component generator.
//!
//! Everything is synchronous and single-writer: one owner mutates canvas
//! state, and no operation suspends mid-way.

pub mod canvas;
pub mod error;
pub mod generate;
pub mod geom;
pub mod history;
pub mod mermaid;
pub mod model;
pub mod persist;
pub mod preview;

pub use canvas::{CanvasEngine, Snapshot};
pub use error::{Error, Result};
pub use geom::{ConnectionPath, Point, Viewport, ZOOM_MAX, ZOOM_MIN, connection_path};
pub use history::{HISTORY_CAPACITY, History};
pub use model::{ComponentNode, Connection, DiagramDocument, NODE_HEIGHT, NODE_WIDTH, NodeType};
pub use persist::{
    CatalogEntry, DocumentStore, KeyValueStore, MemoryStore, export_json, import_json,
};
pub use preview::{PreviewComponent, transform};

#[cfg(test)]
mod tests;
