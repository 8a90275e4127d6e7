//! The mind-map canvas model: arenas, selection, tool mode and the pointer
//! gesture state machine.

use std::collections::{BTreeMap, HashMap};

use super::document::{DiagramDocument, LinkData, NodeData, TextData};
use super::gesture::{DragState, resize_dimensions};
use super::handle::{HandleRole, InteractionPoint, handles_for};
use super::line::{LINE_HIT_TOLERANCE, LineId, LineKind, MindMapLine, distance_to_segment};
use super::node::{DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, MIN_NODE_HEIGHT, MIN_NODE_WIDTH, MindMapNode, NodeId, ShapeKind};
use super::text::{FreeText, TEXT_HEIGHT, TextId};
use crate::app::domain::geometry::Point;
use crate::app::infrastructure::error::{AppError, Result};

/// Horizontal distance between a parent and its children.
const CHILD_OFFSET_X: f64 = 150.0;
/// Vertical spacing between siblings.
const CHILD_SPACING_Y: f64 = 80.0;
/// Marquees smaller than this in both directions are treated as a click.
const MIN_MARQUEE: f64 = 2.0;

/// Text of the root node every new canvas starts with.
pub const DEFAULT_ROOT_TEXT: &str = "Central Topic";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Select,
    CreateNode,
    CreateLine,
    CreateText,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Select => "Select",
            Mode::CreateNode => "Node",
            Mode::CreateLine => "Line",
            Mode::CreateText => "Text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Node(NodeId),
    Text(TextId),
    Line(LineId),
}

/// Topmost item under a canvas position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Handle(InteractionPoint),
    Node(NodeId),
    Text(TextId),
    Line(LineId),
}

/// What the widget should do after a primary press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressOutcome {
    Nothing,
    /// Ask for text, then call [`MindMap::create_free_node`].
    PromptFreeNode(Point),
    /// Ask for text, then call [`MindMap::create_free_text`].
    PromptFreeText(Point),
    GestureStarted,
    Selected(Selection),
    SelectionCleared,
}

/// Item a context menu was opened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextTarget {
    RootNode(NodeId),
    Node(NodeId),
    Text(TextId),
    Line(LineId),
    Empty,
}

#[derive(Debug, Clone)]
pub struct MindMap {
    nodes: BTreeMap<NodeId, MindMapNode>,
    lines: BTreeMap<LineId, MindMapLine>,
    texts: BTreeMap<TextId, FreeText>,
    root: Option<NodeId>,
    mode: Mode,
    shape: ShapeKind,
    node_width: f64,
    node_height: f64,
    selection: Vec<Selection>,
    drag: Option<DragState>,
    next_id: u64,
}

impl Default for MindMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MindMap {
    pub fn new() -> Self {
        Self::with_node_defaults(ShapeKind::default(), DEFAULT_NODE_WIDTH, DEFAULT_NODE_HEIGHT)
    }

    pub fn with_node_defaults(shape: ShapeKind, width: f64, height: f64) -> Self {
        Self {
            nodes: BTreeMap::new(),
            lines: BTreeMap::new(),
            texts: BTreeMap::new(),
            root: None,
            mode: Mode::default(),
            shape,
            node_width: width.max(MIN_NODE_WIDTH),
            node_height: height.max(MIN_NODE_HEIGHT),
            selection: Vec::new(),
            drag: None,
            next_id: 1,
        }
    }

    /// A canvas holding only a root labelled [`DEFAULT_ROOT_TEXT`].
    pub fn with_default_root(shape: ShapeKind, width: f64, height: f64) -> Self {
        let mut map = Self::with_node_defaults(shape, width, height);
        map.new_root(DEFAULT_ROOT_TEXT);
        map
    }

    fn next_raw_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // --- Accessors ---

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch tool. Any gesture in progress is dropped.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.drag = None;
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.shape = shape;
    }

    pub fn node_size(&self) -> (f64, f64) {
        (self.node_width, self.node_height)
    }

    /// Size used for nodes created from now on.
    pub fn set_node_size(&mut self, width: f64, height: f64) {
        self.node_width = width.max(MIN_NODE_WIDTH);
        self.node_height = height.max(MIN_NODE_HEIGHT);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&MindMapNode> {
        self.nodes.get(&id)
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &MindMapNode> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn line(&self, id: LineId) -> Option<&MindMapLine> {
        self.lines.get(&id)
    }

    pub fn lines(&self) -> impl Iterator<Item = &MindMapLine> {
        self.lines.values()
    }

    pub fn text(&self, id: TextId) -> Option<&FreeText> {
        self.texts.get(&id)
    }

    pub fn texts(&self) -> impl Iterator<Item = &FreeText> {
        self.texts.values()
    }

    /// Selected items in the order they were selected.
    pub fn selection(&self) -> &[Selection] {
        &self.selection
    }

    pub fn is_selected(&self, item: Selection) -> bool {
        self.selection.contains(&item)
    }

    pub fn drag_state(&self) -> Option<DragState> {
        self.drag
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.texts.is_empty()
    }

    /// Current endpoints of a line, read from its nodes.
    pub fn line_endpoints(&self, id: LineId) -> Option<(Point, Point)> {
        let line = self.lines.get(&id)?;
        let start = self.nodes.get(&line.start)?;
        let end = self.nodes.get(&line.end)?;
        Some((start.pos, end.pos))
    }

    // --- Creation ---

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.lines.clear();
        self.texts.clear();
        self.root = None;
        self.selection.clear();
        self.drag = None;
    }

    /// Start a new diagram with a single root at the origin.
    pub fn new_root(&mut self, text: &str) -> NodeId {
        self.clear();
        let id = self.insert_node(text, Point::new(0.0, 0.0), None);
        self.root = Some(id);
        id
    }

    fn insert_node(&mut self, text: &str, pos: Point, parent: Option<NodeId>) -> NodeId {
        let (width, height, shape) = (self.node_width, self.node_height, self.shape);
        self.insert_node_with(text, pos, width, height, shape, parent)
    }

    fn insert_node_with(
        &mut self,
        text: &str,
        pos: Point,
        width: f64,
        height: f64,
        shape: ShapeKind,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.next_raw_id());
        let mut node = MindMapNode::new(id, text, pos, width, height, shape);
        node.parent = parent;
        self.nodes.insert(id, node);
        if let Some(parent) = parent {
            if let Some(p) = self.nodes.get_mut(&parent) {
                p.children.push(id);
            }
            self.add_line(parent, id, LineKind::Branch);
        }
        id
    }

    /// Where the next child of `parent` goes: 150 to the right, fanning out
    /// above and below the parent as children accumulate.
    pub fn child_position(&self, parent: NodeId) -> Option<Point> {
        let node = self.nodes.get(&parent)?;
        let n = node.children.len();
        let mut dy = n as f64 * CHILD_SPACING_Y;
        if n % 2 == 1 {
            dy = -dy;
        }
        Some(Point::new(node.pos.x + CHILD_OFFSET_X, node.pos.y + dy))
    }

    pub fn add_child(&mut self, parent: NodeId, text: &str) -> Result<NodeId> {
        let pos = self
            .child_position(parent)
            .ok_or_else(|| AppError::Document(format!("parent node {} does not exist", parent.0)))?;
        Ok(self.insert_node(text, pos, Some(parent)))
    }

    pub fn create_free_node(&mut self, pos: Point, text: &str) -> NodeId {
        self.insert_node(text, pos, None)
    }

    pub fn create_free_text(&mut self, pos: Point, text: &str) -> TextId {
        let id = TextId(self.next_raw_id());
        self.texts.insert(
            id,
            FreeText {
                id,
                text: text.to_string(),
                pos,
            },
        );
        id
    }

    fn add_line(&mut self, start: NodeId, end: NodeId, kind: LineKind) -> LineId {
        let id = LineId(self.next_raw_id());
        self.lines.insert(id, MindMapLine { id, start, end, kind });
        for endpoint in [start, end] {
            if let Some(node) = self.nodes.get_mut(&endpoint) {
                node.lines.push(id);
            }
        }
        id
    }

    /// Draw a user line between two distinct existing nodes.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> Option<LineId> {
        if a == b || !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return None;
        }
        Some(self.add_line(a, b, LineKind::Link))
    }

    // --- Editing ---

    pub fn edit_node_text(&mut self, id: NodeId, text: &str) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.text = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn edit_free_text(&mut self, id: TextId, text: &str) -> bool {
        match self.texts.get_mut(&id) {
            Some(item) => {
                item.text = text.to_string();
                true
            }
            None => false,
        }
    }

    // --- Deletion ---

    /// Delete a node with its whole subtree and every line touching any of
    /// them. The root cannot be deleted.
    pub fn delete_node(&mut self, id: NodeId) -> Result<()> {
        if self.root == Some(id) {
            return Err(AppError::Document("the root node cannot be deleted".to_string()));
        }
        if !self.nodes.contains_key(&id) {
            return Err(AppError::Document(format!("node {} does not exist", id.0)));
        }
        self.remove_subtree(id);
        Ok(())
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let children = node.children.clone();
        for child in children {
            self.remove_subtree(child);
        }

        let lines = self.nodes.get(&id).map(|n| n.lines.clone()).unwrap_or_default();
        for line in lines {
            self.delete_line(line);
        }

        if let Some(parent) = self.nodes.get(&id).and_then(|n| n.parent)
            && let Some(p) = self.nodes.get_mut(&parent)
        {
            p.children.retain(|c| *c != id);
        }

        self.nodes.remove(&id);
        self.selection.retain(|s| *s != Selection::Node(id));
        if self.drag.is_some_and(|d| gesture_node(&d) == Some(id)) {
            self.drag = None;
        }
    }

    pub fn delete_line(&mut self, id: LineId) -> bool {
        let Some(line) = self.lines.remove(&id) else {
            return false;
        };
        for endpoint in [line.start, line.end] {
            if let Some(node) = self.nodes.get_mut(&endpoint) {
                node.lines.retain(|l| *l != id);
            }
        }
        self.selection.retain(|s| *s != Selection::Line(id));
        true
    }

    pub fn delete_text(&mut self, id: TextId) -> bool {
        if self.texts.remove(&id).is_none() {
            return false;
        }
        self.selection.retain(|s| *s != Selection::Text(id));
        if matches!(self.drag, Some(DragState::MovingText { text, .. }) if text == id) {
            self.drag = None;
        }
        true
    }

    /// Delete everything selected. `Ok(false)` when nothing is. A selection
    /// holding the root is rejected as a whole and nothing is deleted.
    pub fn delete_selected(&mut self) -> Result<bool> {
        if let Some(root) = self.root
            && self.is_selected(Selection::Node(root))
        {
            return Err(AppError::Document("the root node cannot be deleted".to_string()));
        }
        let mut deleted = false;
        // Earlier deletions may already have taken later items with them
        for item in std::mem::take(&mut self.selection) {
            deleted |= match item {
                Selection::Node(id) => self.nodes.contains_key(&id) && self.delete_node(id).is_ok(),
                Selection::Text(id) => self.delete_text(id),
                Selection::Line(id) => self.delete_line(id),
            };
        }
        Ok(deleted)
    }

    // --- Selection and hit testing ---

    /// Replace the selection with a single item, or clear it.
    pub fn select(&mut self, selection: Option<Selection>) {
        self.selection = selection.filter(|s| self.exists(*s)).into_iter().collect();
    }

    fn exists(&self, item: Selection) -> bool {
        match item {
            Selection::Node(id) => self.nodes.contains_key(&id),
            Selection::Text(id) => self.texts.contains_key(&id),
            Selection::Line(id) => self.lines.contains_key(&id),
        }
    }

    /// Nodes and free texts whose bounds overlap the rectangle spanned by
    /// `a` and `b`, nodes first.
    pub fn items_in_rect(&self, a: Point, b: Point) -> Vec<Selection> {
        let lo = Point::new(a.x.min(b.x), a.y.min(b.y));
        let hi = Point::new(a.x.max(b.x), a.y.max(b.y));
        let nodes = self
            .nodes
            .values()
            .filter(|n| overlaps(lo, hi, n.top_left(), n.width, n.height))
            .map(|n| Selection::Node(n.id));
        let texts = self
            .texts
            .values()
            .filter(|t| overlaps(lo, hi, t.pos, t.width(), TEXT_HEIGHT))
            .map(|t| Selection::Text(t.id));
        nodes.chain(texts).collect()
    }

    /// Topmost item at `p`. Handles win over node bodies, which win over
    /// free text, which wins over lines. Among equals the most recently
    /// created item is on top.
    pub fn hit_test(&self, p: Point) -> Option<Hit> {
        let handle = self
            .nodes
            .values()
            .rev()
            .find_map(|node| handles_for(node).find(|h| h.contains(node, p)));
        if let Some(handle) = handle {
            return Some(Hit::Handle(handle));
        }
        if let Some(node) = self.nodes.values().rev().find(|n| n.contains(p)) {
            return Some(Hit::Node(node.id));
        }
        if let Some(text) = self.texts.values().rev().find(|t| t.contains(p)) {
            return Some(Hit::Text(text.id));
        }
        self.lines
            .values()
            .rev()
            .find(|line| {
                self.line_endpoints(line.id)
                    .is_some_and(|(a, b)| distance_to_segment(p, a, b) <= LINE_HIT_TOLERANCE)
            })
            .map(|line| Hit::Line(line.id))
    }

    pub fn context_target(&self, p: Point) -> ContextTarget {
        match self.hit_test(p) {
            Some(Hit::Handle(InteractionPoint { owner: id, .. })) | Some(Hit::Node(id)) => {
                if self.root == Some(id) {
                    ContextTarget::RootNode(id)
                } else {
                    ContextTarget::Node(id)
                }
            }
            Some(Hit::Text(id)) => ContextTarget::Text(id),
            Some(Hit::Line(id)) => ContextTarget::Line(id),
            None => ContextTarget::Empty,
        }
    }

    // --- Pointer gestures ---

    /// Primary button pressed at canvas position `p`.
    pub fn press(&mut self, p: Point) -> PressOutcome {
        self.drag = None;
        let hit = self.hit_test(p);

        if let Some(Hit::Handle(handle)) = hit
            && let Some(node) = self.nodes.get(&handle.owner)
        {
            // In line mode every handle starts a line from its owner
            self.drag = Some(match (handle.role(), self.mode) {
                (HandleRole::Resize, Mode::CreateLine) | (HandleRole::Connect, _) => DragState::Connecting {
                    start: node.id,
                    pointer: p,
                },
                (HandleRole::Resize, _) => DragState::Resizing {
                    node: node.id,
                    corner: handle.position,
                    start_pointer: p,
                    start_width: node.width,
                    start_height: node.height,
                },
            });
            self.selection = vec![Selection::Node(handle.owner)];
            return PressOutcome::GestureStarted;
        }

        match self.mode {
            Mode::CreateNode => PressOutcome::PromptFreeNode(p),
            Mode::CreateText => PressOutcome::PromptFreeText(p),
            Mode::CreateLine => match hit {
                Some(Hit::Node(start)) => {
                    self.drag = Some(DragState::Connecting { start, pointer: p });
                    PressOutcome::GestureStarted
                }
                _ => PressOutcome::Nothing,
            },
            Mode::Select => match hit {
                Some(Hit::Node(id)) => {
                    if let Some(node) = self.nodes.get(&id) {
                        self.drag = Some(DragState::Moving {
                            node: id,
                            grab_offset: p - node.pos,
                        });
                    }
                    self.selection = vec![Selection::Node(id)];
                    PressOutcome::Selected(Selection::Node(id))
                }
                Some(Hit::Text(id)) => {
                    if let Some(text) = self.texts.get(&id) {
                        self.drag = Some(DragState::MovingText {
                            text: id,
                            grab_offset: p - text.pos,
                        });
                    }
                    self.selection = vec![Selection::Text(id)];
                    PressOutcome::Selected(Selection::Text(id))
                }
                Some(Hit::Line(id)) => {
                    self.selection = vec![Selection::Line(id)];
                    PressOutcome::Selected(Selection::Line(id))
                }
                Some(Hit::Handle(_)) | None => {
                    self.selection.clear();
                    self.drag = Some(DragState::Marquee { origin: p, pointer: p });
                    PressOutcome::SelectionCleared
                }
            },
        }
    }

    /// Pointer moved to `p` with the button held. Returns whether anything
    /// visible changed.
    pub fn drag_to(&mut self, p: Point) -> bool {
        let Some(state) = self.drag else {
            return false;
        };
        let applied = match state {
            DragState::Resizing {
                node,
                corner,
                start_pointer,
                start_width,
                start_height,
            } => {
                let (w, h) = resize_dimensions(
                    corner,
                    start_width,
                    start_height,
                    p.x - start_pointer.x,
                    p.y - start_pointer.y,
                );
                self.nodes.get_mut(&node).map(|n| {
                    let changed = n.width != w || n.height != h;
                    n.width = w;
                    n.height = h;
                    changed
                })
            }
            DragState::Connecting { start, .. } => self.nodes.contains_key(&start).then(|| {
                self.drag = Some(DragState::Connecting { start, pointer: p });
                true
            }),
            DragState::Moving { node, grab_offset } => self.nodes.get_mut(&node).map(|n| {
                n.pos = p - grab_offset;
                true
            }),
            DragState::MovingText { text, grab_offset } => self.texts.get_mut(&text).map(|t| {
                t.pos = p - grab_offset;
                true
            }),
            DragState::Marquee { origin, .. } => {
                self.drag = Some(DragState::Marquee { origin, pointer: p });
                Some(true)
            }
        };
        match applied {
            Some(changed) => changed,
            None => {
                log::debug!("gesture target vanished, abandoning {:?}", state);
                self.drag = None;
                true
            }
        }
    }

    /// Primary button released at `p`. Ends the gesture; a connect gesture
    /// released over another node creates a line, a marquee selects every
    /// node and text it overlaps.
    pub fn release(&mut self, p: Point) -> Option<LineId> {
        let state = self.drag.take()?;
        if let DragState::Marquee { origin, .. } = state {
            if (p.x - origin.x).abs() >= MIN_MARQUEE || (p.y - origin.y).abs() >= MIN_MARQUEE {
                self.selection = self.items_in_rect(origin, p);
            }
            return None;
        }
        let DragState::Connecting { start, .. } = state else {
            return None;
        };
        let target = match self.hit_test(p) {
            Some(Hit::Node(id)) => Some(id),
            Some(Hit::Handle(h)) if h.role() == HandleRole::Connect => Some(h.owner),
            _ => None,
        };
        match target {
            Some(end) if end != start => self.connect(start, end),
            _ => None,
        }
    }

    // --- Persistence ---

    /// Snapshot for saving. `None` while the canvas has no root.
    pub fn to_document(&self) -> Option<DiagramDocument> {
        let root = self.root?;
        let mut order: HashMap<NodeId, usize> = HashMap::new();
        let root_data = self.node_data(root, &mut order)?;

        let nodes: Vec<NodeData> = self
            .nodes
            .values()
            .filter(|n| n.parent.is_none() && Some(n.id) != self.root)
            .filter_map(|n| self.node_data(n.id, &mut order))
            .collect();

        let texts: Vec<TextData> = self
            .texts
            .values()
            .map(|t| TextData {
                text: t.text.clone(),
                pos: t.pos,
            })
            .collect();

        let links: Vec<LinkData> = self
            .lines
            .values()
            .filter(|l| l.kind == LineKind::Link)
            .filter_map(|l| {
                Some(LinkData {
                    start: *order.get(&l.start)?,
                    end: *order.get(&l.end)?,
                })
            })
            .collect();

        Some(DiagramDocument {
            root: root_data,
            nodes,
            texts,
            links,
        })
    }

    fn node_data(&self, id: NodeId, order: &mut HashMap<NodeId, usize>) -> Option<NodeData> {
        let node = self.nodes.get(&id)?;
        let index = order.len();
        order.insert(id, index);
        let children = node
            .children
            .iter()
            .filter_map(|child| self.node_data(*child, order))
            .collect();
        Some(NodeData {
            text: node.text.clone(),
            pos: node.pos,
            width: node.width,
            height: node.height,
            shape_type: node.shape,
            children,
        })
    }

    /// Replace the canvas with `doc`. On error the canvas is left as it was.
    pub fn load_document(&mut self, doc: &DiagramDocument) -> Result<()> {
        doc.validate()?;

        let mut fresh = MindMap::with_node_defaults(self.shape, self.node_width, self.node_height);
        fresh.mode = self.mode;

        let mut order = Vec::with_capacity(doc.node_count());
        let root = fresh.load_tree(&doc.root, None, &mut order);
        fresh.root = Some(root);
        for tree in &doc.nodes {
            fresh.load_tree(tree, None, &mut order);
        }
        for text in &doc.texts {
            fresh.create_free_text(text.pos, &text.text);
        }
        for link in &doc.links {
            let (Some(&start), Some(&end)) = (order.get(link.start), order.get(link.end)) else {
                return Err(AppError::Document(format!("link {} -> {} is out of range", link.start, link.end)));
            };
            if fresh.connect(start, end).is_none() {
                return Err(AppError::Document(format!("link {} -> {} is invalid", link.start, link.end)));
            }
        }

        log::debug!(
            "loaded diagram: {} nodes, {} lines, {} texts",
            fresh.nodes.len(),
            fresh.lines.len(),
            fresh.texts.len()
        );
        *self = fresh;
        Ok(())
    }

    fn load_tree(&mut self, data: &NodeData, parent: Option<NodeId>, order: &mut Vec<NodeId>) -> NodeId {
        let id = self.insert_node_with(&data.text, data.pos, data.width, data.height, data.shape_type, parent);
        order.push(id);
        for child in &data.children {
            self.load_tree(child, Some(id), order);
        }
        id
    }
}

fn gesture_node(state: &DragState) -> Option<NodeId> {
    match *state {
        DragState::Resizing { node, .. } | DragState::Moving { node, .. } => Some(node),
        DragState::Connecting { start, .. } => Some(start),
        DragState::MovingText { .. } | DragState::Marquee { .. } => None,
    }
}

fn overlaps(lo: Point, hi: Point, top_left: Point, width: f64, height: f64) -> bool {
    top_left.x <= hi.x && top_left.x + width >= lo.x && top_left.y <= hi.y && top_left.y + height >= lo.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::mindmap::handle::HandlePosition;

    fn handle_point(map: &MindMap, node: NodeId, position: HandlePosition) -> Point {
        let owner = map.node(node).unwrap();
        InteractionPoint { owner: node, position }.center(owner)
    }

    fn assert_no_dangling(map: &MindMap) {
        for node in map.nodes() {
            for child in &node.children {
                assert_eq!(map.node(*child).and_then(|c| c.parent), Some(node.id));
            }
            if let Some(parent) = node.parent {
                assert!(map.node(parent).unwrap().children.contains(&node.id));
            }
            for line in &node.lines {
                assert!(map.line(*line).is_some_and(|l| l.touches(node.id)));
            }
        }
        for line in map.lines() {
            assert!(map.node(line.start).unwrap().lines.contains(&line.id));
            assert!(map.node(line.end).unwrap().lines.contains(&line.id));
        }
    }

    #[test]
    fn test_child_offsets_alternate() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        let ys: Vec<f64> = (0..4)
            .map(|i| {
                let id = map.add_child(root, &format!("c{i}")).unwrap();
                map.node(id).unwrap().pos.y
            })
            .collect();
        assert_eq!(ys, vec![0.0, -80.0, 160.0, -240.0]);
        assert!(map.nodes().filter(|n| n.parent == Some(root)).all(|n| n.pos.x == 150.0));
        assert_eq!(map.lines().count(), 4);
        assert_no_dangling(&map);
    }

    #[test]
    fn test_new_nodes_use_current_tool_settings() {
        let mut map = MindMap::new();
        map.set_shape(ShapeKind::Rect);
        map.set_node_size(200.0, 150.0);
        let id = map.create_free_node(Point::new(10.0, 10.0), "free");
        let node = map.node(id).unwrap();
        assert_eq!(node.shape, ShapeKind::Rect);
        assert_eq!((node.width, node.height), (200.0, 150.0));
        assert!(node.parent.is_none());
    }

    #[test]
    fn test_delete_root_is_rejected() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        map.add_child(root, "A").unwrap();
        assert!(map.delete_node(root).is_err());
        assert_eq!(map.node_count(), 2);
        assert_eq!(map.lines().count(), 1);

        map.select(Some(Selection::Node(root)));
        assert!(map.delete_selected().is_err());
        assert_eq!(map.node_count(), 2);
    }

    #[test]
    fn test_delete_node_cascades() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        let x = map.add_child(root, "X").unwrap();
        map.add_child(x, "Y").unwrap();
        map.add_child(x, "Z").unwrap();
        let w = map.create_free_node(Point::new(-300.0, 0.0), "W");
        map.connect(x, w).unwrap();
        map.select(Some(Selection::Node(x)));

        map.delete_selected().unwrap();

        let remaining: Vec<_> = map.nodes().map(|n| n.text.as_str()).collect();
        assert_eq!(remaining, vec!["Center", "W"]);
        assert_eq!(map.lines().count(), 0);
        assert!(map.node(root).unwrap().children.is_empty());
        assert!(map.node(root).unwrap().lines.is_empty());
        assert!(map.node(w).unwrap().lines.is_empty());
        assert!(map.selection().is_empty());
        assert_no_dangling(&map);
    }

    #[test]
    fn test_delete_line_updates_both_endpoints() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        let a = map.add_child(root, "A").unwrap();
        let branch = map.node(a).unwrap().lines[0];
        assert!(map.delete_line(branch));
        assert!(map.node(a).unwrap().lines.is_empty());
        assert!(map.node(root).unwrap().lines.is_empty());
        // The tree edge itself is untouched
        assert_eq!(map.node(a).unwrap().parent, Some(root));
        assert!(!map.delete_line(branch));
    }

    #[test]
    fn test_connect_rejects_self_loop() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        assert!(map.connect(root, root).is_none());
        assert!(map.connect(root, NodeId(999)).is_none());
    }

    #[test]
    fn test_resize_gesture_updates_in_place() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        let a = map.add_child(root, "A").unwrap();
        let corner = handle_point(&map, a, HandlePosition::BottomRight);

        assert_eq!(map.press(corner), PressOutcome::GestureStarted);
        assert!(map.drag_to(Point::new(corner.x + 20.0, corner.y + 10.0)));
        let node = map.node(a).unwrap();
        assert_eq!((node.width, node.height), (160.0, 100.0));
        assert_eq!(node.pos, Point::new(150.0, 0.0));
        assert_eq!(node.text, "A");

        // Handles follow the new size
        let moved = handle_point(&map, a, HandlePosition::BottomRight);
        assert_eq!(moved, Point::new(230.0, 50.0));

        map.drag_to(Point::new(corner.x - 500.0, corner.y - 500.0));
        let node = map.node(a).unwrap();
        assert_eq!((node.width, node.height), (60.0, 40.0));

        assert_eq!(map.release(corner), None);
        assert_eq!(map.drag_state(), None);
    }

    #[test]
    fn test_gesture_abandoned_when_node_disappears() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        let a = map.add_child(root, "A").unwrap();
        let corner = handle_point(&map, a, HandlePosition::TopLeft);
        map.press(corner);
        assert!(map.drag_state().is_some());
        map.delete_node(a).unwrap();
        assert_eq!(map.drag_state(), None);
        assert!(!map.drag_to(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_select_mode_moves_node_and_lines_follow() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        let a = map.add_child(root, "A").unwrap();
        let line = map.node(a).unwrap().lines[0];

        assert_eq!(map.press(Point::new(150.0, 0.0)), PressOutcome::Selected(Selection::Node(a)));
        map.drag_to(Point::new(250.0, 100.0));
        map.release(Point::new(250.0, 100.0));

        assert_eq!(map.node(a).unwrap().pos, Point::new(250.0, 100.0));
        assert_eq!(map.line_endpoints(line), Some((Point::new(0.0, 0.0), Point::new(250.0, 100.0))));
    }

    #[test]
    fn test_press_empty_canvas_per_mode() {
        let mut map = MindMap::new();
        map.new_root("Center");
        let empty = Point::new(500.0, 500.0);

        assert_eq!(map.press(empty), PressOutcome::SelectionCleared);
        map.set_mode(Mode::CreateNode);
        assert_eq!(map.press(empty), PressOutcome::PromptFreeNode(empty));
        map.set_mode(Mode::CreateText);
        assert_eq!(map.press(empty), PressOutcome::PromptFreeText(empty));
        map.set_mode(Mode::CreateLine);
        assert_eq!(map.press(empty), PressOutcome::Nothing);
    }

    #[test]
    fn test_line_mode_connects_node_bodies() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        let free = map.create_free_node(Point::new(0.0, 300.0), "Free");
        map.set_mode(Mode::CreateLine);

        assert_eq!(map.press(Point::new(0.0, 0.0)), PressOutcome::GestureStarted);
        map.drag_to(Point::new(0.0, 150.0));
        let line = map.release(Point::new(0.0, 300.0)).unwrap();
        let line = map.line(line).unwrap();
        assert_eq!((line.start, line.end, line.kind), (root, free, LineKind::Link));

        // Released on the starting node: abandoned
        map.press(Point::new(0.0, 0.0));
        assert_eq!(map.release(Point::new(5.0, 5.0)), None);
        assert_eq!(map.lines().count(), 1);
    }

    #[test]
    fn test_line_mode_corner_starts_connect() {
        let mut map = MindMap::new();
        map.set_shape(ShapeKind::Rect);
        let root = map.new_root("Center");
        map.set_mode(Mode::CreateLine);

        // Bottom-right resize corner, inside the rect body
        assert_eq!(map.press(Point::new(59.0, 39.0)), PressOutcome::GestureStarted);
        assert_eq!(
            map.drag_state(),
            Some(DragState::Connecting {
                start: root,
                pointer: Point::new(59.0, 39.0)
            })
        );
        let free = map.create_free_node(Point::new(0.0, 300.0), "Free");
        let line = map.release(Point::new(0.0, 300.0)).unwrap();
        assert_eq!((map.line(line).unwrap().start, map.line(line).unwrap().end), (root, free));
        assert_eq!(map.node(root).unwrap().width, 120.0);
    }

    #[test]
    fn test_marquee_selects_overlapping_items() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        let a = map.add_child(root, "A").unwrap();
        let note = map.create_free_text(Point::new(140.0, 60.0), "note");
        let far = map.create_free_node(Point::new(600.0, 600.0), "Far");

        let start = Point::new(100.0, -100.0);
        assert_eq!(map.press(start), PressOutcome::SelectionCleared);
        assert!(matches!(map.drag_state(), Some(DragState::Marquee { .. })));
        assert!(map.drag_to(Point::new(300.0, 100.0)));
        assert_eq!(map.release(Point::new(300.0, 100.0)), None);

        assert_eq!(map.selection(), &[Selection::Node(a), Selection::Text(note)]);
        assert!(!map.is_selected(Selection::Node(far)));
        assert!(!map.is_selected(Selection::Node(root)));
        assert_eq!(map.drag_state(), None);

        assert!(map.delete_selected().unwrap());
        assert!(map.node(a).is_none());
        assert!(map.text(note).is_none());
        assert!(map.node(far).is_some());
        assert!(map.selection().is_empty());
        assert_no_dangling(&map);
    }

    #[test]
    fn test_marquee_click_clears_selection() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        map.select(Some(Selection::Node(root)));
        let empty = Point::new(400.0, 400.0);
        map.press(empty);
        map.release(Point::new(401.0, 401.0));
        assert!(map.selection().is_empty());
    }

    #[test]
    fn test_marquee_including_root_deletes_nothing() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        let a = map.add_child(root, "A").unwrap();
        map.press(Point::new(-100.0, -100.0));
        map.release(Point::new(300.0, 100.0));
        assert!(map.is_selected(Selection::Node(root)));
        assert!(map.is_selected(Selection::Node(a)));

        assert!(map.delete_selected().is_err());
        assert_eq!(map.node_count(), 2);
    }

    #[test]
    fn test_default_root_lets_free_items_be_saved() {
        let mut map = MindMap::with_default_root(ShapeKind::Ellipse, 120.0, 80.0);
        let root = map.root().unwrap();
        assert_eq!(map.node(root).unwrap().text, DEFAULT_ROOT_TEXT);
        assert_eq!(map.node(root).unwrap().pos, Point::new(0.0, 0.0));

        map.set_mode(Mode::CreateNode);
        let spot = Point::new(-300.0, 200.0);
        assert_eq!(map.press(spot), PressOutcome::PromptFreeNode(spot));
        map.create_free_node(spot, "idea");
        map.create_free_text(Point::new(200.0, -200.0), "remark");

        let doc = map.to_document().unwrap();
        assert_eq!(doc.root.text, DEFAULT_ROOT_TEXT);
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.nodes[0].text, "idea");
        assert_eq!(doc.texts.len(), 1);
    }

    #[test]
    fn test_context_target() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        let a = map.add_child(root, "A").unwrap();
        let text = map.create_free_text(Point::new(-300.0, 200.0), "note");

        assert_eq!(map.context_target(Point::new(0.0, 0.0)), ContextTarget::RootNode(root));
        assert_eq!(map.context_target(Point::new(150.0, 0.0)), ContextTarget::Node(a));
        assert_eq!(map.context_target(Point::new(-295.0, 205.0)), ContextTarget::Text(text));
        assert!(matches!(map.context_target(Point::new(75.0, 0.0)), ContextTarget::Line(_)));
        assert_eq!(map.context_target(Point::new(900.0, 900.0)), ContextTarget::Empty);
    }

    #[test]
    fn test_edit_and_delete_text() {
        let mut map = MindMap::new();
        let text = map.create_free_text(Point::new(0.0, 0.0), "draft");
        assert!(map.edit_free_text(text, "final"));
        assert_eq!(map.text(text).unwrap().text, "final");
        map.select(Some(Selection::Text(text)));
        assert!(map.delete_selected().unwrap());
        assert!(map.text(text).is_none());
        assert!(!map.delete_selected().unwrap());
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        map.set_shape(ShapeKind::Rect);
        map.set_node_size(150.0, 60.0);
        let a = map.add_child(root, "A").unwrap();
        map.add_child(a, "A1").unwrap();
        let free = map.create_free_node(Point::new(-400.0, 120.0), "Loose");
        map.add_child(free, "Loose child").unwrap();
        map.create_free_text(Point::new(30.0, -200.0), "note");
        map.connect(a, free).unwrap();

        let doc = map.to_document().unwrap();
        let json = doc.to_json().unwrap();
        let parsed = DiagramDocument::from_json(&json).unwrap();

        let mut loaded = MindMap::new();
        loaded.load_document(&parsed).unwrap();

        let summary = |m: &MindMap| {
            let mut nodes: Vec<_> = m
                .nodes()
                .map(|n| {
                    let parent = n.parent.and_then(|p| m.node(p)).map(|p| p.text.clone());
                    (n.text.clone(), n.pos.x as i64, n.pos.y as i64, n.width as i64, n.height as i64, n.shape, parent)
                })
                .collect();
            nodes.sort_by(|a, b| a.0.cmp(&b.0));
            nodes
        };
        assert_eq!(summary(&map), summary(&loaded));
        assert_eq!(loaded.node(loaded.root().unwrap()).unwrap().text, "Center");
        assert_eq!(loaded.lines().count(), map.lines().count());
        let texts: Vec<_> = loaded.texts().map(|t| (t.text.clone(), t.pos)).collect();
        assert_eq!(texts, vec![("note".to_string(), Point::new(30.0, -200.0))]);
        assert_no_dangling(&loaded);
    }

    #[test]
    fn test_failed_load_keeps_canvas() {
        let mut map = MindMap::new();
        let root = map.new_root("Keep me");
        map.add_child(root, "child").unwrap();

        let mut doc = map.to_document().unwrap();
        doc.links.push(LinkData { start: 0, end: 42 });
        assert!(map.load_document(&doc).is_err());
        assert_eq!(map.node_count(), 2);
        assert_eq!(map.node(root).unwrap().text, "Keep me");
    }

    #[test]
    fn test_center_a_b_scenario() {
        let mut map = MindMap::new();
        let root = map.new_root("Center");
        let a = map.add_child(root, "A").unwrap();
        let b = map.add_child(root, "B").unwrap();
        assert_eq!(map.node(a).unwrap().pos, Point::new(150.0, 0.0));
        assert_eq!(map.node(b).unwrap().pos, Point::new(150.0, -80.0));

        // Drag from A's right connect handle to B's right connect handle
        let from = handle_point(&map, a, HandlePosition::Right);
        let to = handle_point(&map, b, HandlePosition::Right);
        assert_eq!(map.press(from), PressOutcome::GestureStarted);
        map.drag_to(to);
        let link = map.release(to).unwrap();
        assert_eq!(map.line(link).map(|l| (l.start, l.end)), Some((a, b)));

        let json = map.to_document().unwrap().to_json().unwrap();
        let mut fresh = MindMap::new();
        fresh.load_document(&DiagramDocument::from_json(&json).unwrap()).unwrap();

        let root = fresh.node(fresh.root().unwrap()).unwrap();
        assert_eq!(root.text, "Center");
        let children: Vec<_> = root
            .children
            .iter()
            .map(|id| {
                let n = fresh.node(*id).unwrap();
                (n.text.as_str(), n.pos)
            })
            .collect();
        assert_eq!(
            children,
            vec![("A", Point::new(150.0, 0.0)), ("B", Point::new(150.0, -80.0))]
        );

        let links: Vec<_> = fresh
            .lines()
            .filter(|l| l.kind == LineKind::Link)
            .map(|l| (fresh.node(l.start).unwrap().text.as_str(), fresh.node(l.end).unwrap().text.as_str()))
            .collect();
        assert_eq!(links, vec![("A", "B")]);
    }
}
