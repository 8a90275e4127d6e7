//! Mind-map diagram model.
//!
//! Nodes, connector lines and free texts live in arenas owned by
//! [`MindMap`] and refer to each other by id. The FLTK canvas in
//! `ui::mind_map` only draws this model and forwards pointer events to it.

pub mod canvas;
pub mod document;
pub mod gesture;
pub mod handle;
pub mod line;
pub mod node;
pub mod text;

pub use canvas::{ContextTarget, DEFAULT_ROOT_TEXT, Hit, MindMap, Mode, PressOutcome, Selection};
pub use document::{DiagramDocument, LinkData, NodeData, TextData};
pub use gesture::DragState;
pub use handle::{HandlePosition, HandleRole, InteractionPoint};
pub use line::{LineId, LineKind, MindMapLine};
pub use node::{MindMapNode, NodeId, ShapeKind};
pub use text::{FreeText, TextId};
