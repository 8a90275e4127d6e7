//! On-disk diagram format.
//!
//! ```json
//! {
//!   "root":  { "text": "Center", "pos": {"x": 0, "y": 0}, "width": 120,
//!              "height": 80, "shape_type": "ellipse", "children": [ ... ] },
//!   "nodes": [ ...free node trees... ],
//!   "texts": [ { "text": "note", "pos": {"x": 10, "y": 20} } ],
//!   "links": [ { "start": 1, "end": 2 } ]
//! }
//! ```
//!
//! `links` refer to nodes by pre-order index: the root tree first, then each
//! free tree in order. Files without `links` load with no user drawn lines.

use serde::{Deserialize, Serialize};

use super::node::{DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, ShapeKind};
use crate::app::domain::geometry::Point;
use crate::app::infrastructure::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub text: String,
    pub pos: Point,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub shape_type: ShapeKind,
    pub children: Vec<NodeData>,
}

fn default_width() -> f64 {
    DEFAULT_NODE_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_NODE_HEIGHT
}

impl NodeData {
    /// Number of nodes in this subtree, itself included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(NodeData::count).sum::<usize>()
    }

    fn validate(&self) -> Result<()> {
        if !self.pos.is_finite() {
            return Err(AppError::Document(format!("node '{}' has an invalid position", self.text)));
        }
        let valid_size = |v: f64| v.is_finite() && v > 0.0;
        if !valid_size(self.width) || !valid_size(self.height) {
            return Err(AppError::Document(format!(
                "node '{}' has invalid size {}x{}",
                self.text, self.width, self.height
            )));
        }
        self.children.iter().try_for_each(NodeData::validate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    pub text: String,
    pub pos: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkData {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramDocument {
    pub root: NodeData,
    #[serde(default)]
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub texts: Vec<TextData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<LinkData>,
}

impl DiagramDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: DiagramDocument = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn node_count(&self) -> usize {
        self.root.count() + self.nodes.iter().map(NodeData::count).sum::<usize>()
    }

    pub fn validate(&self) -> Result<()> {
        self.root.validate()?;
        self.nodes.iter().try_for_each(NodeData::validate)?;
        if let Some(text) = self.texts.iter().find(|t| !t.pos.is_finite()) {
            return Err(AppError::Document(format!("text '{}' has an invalid position", text.text)));
        }
        let count = self.node_count();
        for link in &self.links {
            if link.start >= count || link.end >= count {
                return Err(AppError::Document(format!(
                    "link {} -> {} refers past the {} nodes in the file",
                    link.start, link.end, count
                )));
            }
            if link.start == link.end {
                return Err(AppError::Document(format!("link {} connects a node to itself", link.start)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_file_uses_defaults() {
        let json = r#"{"root": {"text": "Center", "pos": {"x": 0, "y": 0}, "children": []}}"#;
        let doc = DiagramDocument::from_json(json).unwrap();
        assert_eq!(doc.root.width, 120.0);
        assert_eq!(doc.root.height, 80.0);
        assert_eq!(doc.root.shape_type, ShapeKind::Ellipse);
        assert!(doc.nodes.is_empty());
        assert!(doc.texts.is_empty());
        assert!(doc.links.is_empty());
    }

    #[test]
    fn test_missing_root_is_error() {
        assert!(DiagramDocument::from_json(r#"{"nodes": [], "texts": []}"#).is_err());
    }

    #[test]
    fn test_unknown_shape_is_error() {
        let json = r#"{"root": {"text": "c", "pos": {"x": 0, "y": 0}, "shape_type": "star", "children": []}}"#;
        assert!(matches!(DiagramDocument::from_json(json), Err(AppError::Json(_))));
    }

    #[test]
    fn test_non_numeric_position_is_error() {
        let json = r#"{"root": {"text": "c", "pos": {"x": "left", "y": 0}, "children": []}}"#;
        assert!(DiagramDocument::from_json(json).is_err());
    }

    #[test]
    fn test_non_positive_size_is_error() {
        let json = r#"{"root": {"text": "c", "pos": {"x": 0, "y": 0}, "width": 0, "children": []}}"#;
        assert!(matches!(DiagramDocument::from_json(json), Err(AppError::Document(_))));
    }

    #[test]
    fn test_link_out_of_range_is_error() {
        let json = r#"{
            "root": {"text": "c", "pos": {"x": 0, "y": 0}, "children": [
                {"text": "a", "pos": {"x": 150, "y": 0}, "children": []}
            ]},
            "links": [{"start": 0, "end": 5}]
        }"#;
        assert!(matches!(DiagramDocument::from_json(json), Err(AppError::Document(_))));
    }

    #[test]
    fn test_node_count_spans_free_trees() {
        let leaf = |text: &str| NodeData {
            text: text.into(),
            pos: Point::default(),
            width: 120.0,
            height: 80.0,
            shape_type: ShapeKind::Rect,
            children: Vec::new(),
        };
        let mut root = leaf("root");
        root.children.push(leaf("a"));
        let doc = DiagramDocument {
            root,
            nodes: vec![leaf("free")],
            texts: Vec::new(),
            links: Vec::new(),
        };
        assert_eq!(doc.node_count(), 3);
        let json = doc.to_json().unwrap();
        assert!(json.contains("\"shape_type\": \"rect\""));
        assert!(!json.contains("links"));
    }
}
