use fltk::{
    app::Sender,
    enums::Font,
    group::{Flex, FlexType, Group},
    prelude::*,
};

use super::editor_container::{EditorContainer, TabInfo};
use crate::app::controllers::documents::{DocumentId, DocumentStore};
use crate::app::domain::layout::{LayoutNode, Orientation, PaneId, PaneLayout, PaneRegion};
use crate::app::domain::messages::Message;

/// Gap between sibling panes.
const SPLIT_GAP: i32 = 4;

/// Widget tree mirroring a [`PaneLayout`]: nested `Flex` rows and columns
/// for splitters, one [`EditorContainer`] per container.
pub struct SplitView {
    workspace: Group,
    panes: Vec<EditorContainer>,
    sender: Sender<Message>,
    is_dark: bool,
    font: Font,
    font_size: i32,
}

impl SplitView {
    pub fn new(workspace: Group, sender: Sender<Message>, is_dark: bool, font: Font, font_size: i32) -> Self {
        Self {
            workspace,
            panes: Vec::new(),
            sender,
            is_dark,
            font,
            font_size,
        }
    }

    /// Recreate every pane widget from the layout tree. Buffers live in the
    /// document store, so nothing is lost by throwing the widgets away.
    pub fn rebuild(&mut self, layout: &PaneLayout<DocumentId>, documents: &DocumentStore) {
        self.workspace.clear();
        self.panes.clear();

        self.workspace.begin();
        let mut root = Flex::new(
            self.workspace.x(),
            self.workspace.y(),
            self.workspace.w(),
            self.workspace.h(),
            None,
        );
        root.set_type(FlexType::Column);
        self.build_node(layout.root());
        root.end();
        self.workspace.end();
        self.workspace.resizable(&root);
        root.layout();

        self.refresh(layout, documents);
        self.workspace.redraw();
        log::debug!("workspace rebuilt with {} pane(s)", self.panes.len());
    }

    fn build_node(&mut self, node: &LayoutNode<DocumentId>) {
        match node {
            LayoutNode::Container(container) => {
                let mut pane = EditorContainer::new(container.id(), self.sender, self.is_dark);
                pane.set_font(self.font, self.font_size);
                self.panes.push(pane);
            }
            LayoutNode::Splitter(splitter) => {
                let mut flex = Flex::default();
                flex.set_type(match splitter.orientation() {
                    Orientation::Horizontal => FlexType::Row,
                    Orientation::Vertical => FlexType::Column,
                });
                flex.set_pad(SPLIT_GAP);
                for child in splitter.children() {
                    self.build_node(child);
                }
                flex.end();
            }
        }
    }

    /// Bring tab strips and bound buffers in line with the model without
    /// recreating widgets.
    pub fn refresh(&mut self, layout: &PaneLayout<DocumentId>, documents: &DocumentStore) {
        for pane in &mut self.panes {
            let Some(container) = layout.container(pane.pane()) else {
                continue;
            };
            let tabs = container
                .tabs()
                .iter()
                .map(|tab| match documents.get(tab.content) {
                    Some(doc) => TabInfo {
                        title: doc.display_name.clone(),
                        dirty: doc.is_dirty() && !doc.read_only,
                    },
                    None => TabInfo {
                        title: tab.title.clone(),
                        dirty: false,
                    },
                })
                .collect();
            pane.set_tabs(tabs, container.active_index());

            let active = container
                .active_tab()
                .and_then(|tab| documents.get(tab.content));
            match active {
                Some(doc) => pane.bind(Some((doc.id, &doc.buffer)), doc.read_only),
                None => pane.bind(None, true),
            }
        }
    }

    pub fn pane(&self, id: PaneId) -> Option<&EditorContainer> {
        self.panes.iter().find(|p| p.pane() == id)
    }

    /// On-screen bounds of every pane, in tree order.
    pub fn regions(&self) -> Vec<PaneRegion> {
        self.panes.iter().map(EditorContainer::region).collect()
    }

    pub fn apply_theme(&mut self, is_dark: bool) {
        self.is_dark = is_dark;
        for pane in &mut self.panes {
            pane.apply_theme(is_dark);
        }
    }
}
