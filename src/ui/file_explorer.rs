use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use fltk::{
    app::{self, Sender},
    button::Button,
    enums::{Align, CallbackTrigger, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    input::Input,
    prelude::*,
    tree::{Tree, TreeItem, TreeItemReselectMode, TreeSelect, TreeSort},
};

use super::theme::palette;
use crate::app::domain::messages::Message;
use crate::app::infrastructure::error::Result;
use crate::app::services::files::{DEFAULT_SCAN_DEPTH, FileTree};

/// Sidebar file tree with a name filter. Double-clicking a file sends
/// [`Message::OpenFile`]; directories only expand and collapse.
pub struct FileExplorer {
    header: Frame,
    search: Input,
    tree: Tree,
    model: Rc<RefCell<FileTree>>,
}

impl FileExplorer {
    pub fn new(sender: Sender<Message>) -> Self {
        let mut flex = Flex::default();
        flex.set_type(FlexType::Column);
        flex.set_margin(4);
        flex.set_pad(4);

        let mut header = Frame::default().with_label("EXPLORER");
        header.set_align(Align::Left | Align::Inside);
        header.set_label_size(12);
        flex.fixed(&header, 20);

        let mut search = Input::default();
        search.set_tooltip("Filter files by name (regular expression)");
        search.set_trigger(CallbackTrigger::Changed);
        search.set_callback(move |input| sender.send(Message::ExplorerFilter(input.value())));
        flex.fixed(&search, 26);

        let mut tree = Tree::default();
        tree.set_show_root(false);
        tree.set_sort_order(TreeSort::None);
        tree.set_select_mode(TreeSelect::Single);
        tree.set_item_reselect_mode(TreeItemReselectMode::Always);
        tree.set_frame(FrameType::FlatBox);

        let mut buttons = Flex::default();
        buttons.set_type(FlexType::Row);
        buttons.set_pad(4);
        let mut open_btn = Button::default().with_label("Open Folder...");
        open_btn.emit(sender, Message::OpenFolder);
        let mut refresh_btn = Button::default().with_label("@reload");
        refresh_btn.set_tooltip("Rescan the folder");
        refresh_btn.emit(sender, Message::ExplorerRefresh);
        buttons.fixed(&refresh_btn, 30);
        buttons.end();
        flex.fixed(&buttons, 26);
        flex.end();

        let model = Rc::new(RefCell::new(FileTree::default()));
        let cb_model = model.clone();
        tree.set_callback(move |t| {
            if !app::event_clicks() {
                return;
            }
            let Some(item) = t.callback_item() else {
                return;
            };
            let relative = item_relative_path(&item);
            let model = cb_model.borrow();
            if let Some(entry) = model.find(&relative)
                && !entry.is_dir
            {
                sender.send(Message::OpenFile(entry.path.clone()));
            }
        });

        Self {
            header,
            search,
            tree,
            model,
        }
    }

    /// Scan `root` and show it. On error the previous listing stays.
    pub fn set_root(&mut self, root: &Path) -> Result<()> {
        let scanned = FileTree::scan(root, DEFAULT_SCAN_DEPTH)?;
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_uppercase())
            .unwrap_or_else(|| root.display().to_string());
        self.header.set_label(&name);
        self.header.set_tooltip(&root.display().to_string());
        *self.model.borrow_mut() = scanned;
        let query = self.search.value();
        self.apply_filter(&query);
        Ok(())
    }

    pub fn refresh(&mut self) -> Result<()> {
        let root = self.model.borrow().root().to_path_buf();
        if root.as_os_str().is_empty() {
            return Ok(());
        }
        self.set_root(&root)
    }

    /// Rebuild the tree from the entries matching `query`. An empty query
    /// shows everything with folders collapsed; a filtered view is fully
    /// expanded so every match is visible.
    pub fn apply_filter(&mut self, query: &str) {
        let model = self.model.borrow();
        let filtering = !query.trim().is_empty();
        self.tree.clear();
        for entry in model.filter(query) {
            let Some(mut item) = self.tree.add(&escape_label(&entry.relative)) else {
                continue;
            };
            if entry.is_dir && !filtering {
                item.close();
            }
        }
        drop(model);
        self.tree.redraw();
    }

    pub fn apply_theme(&mut self, is_dark: bool) {
        let p = palette(is_dark);
        self.tree.set_color(p.sidebar_bg);
        self.tree.set_item_label_fgcolor(p.text);
        self.tree.set_selection_color(p.selection);
        self.header.set_label_color(p.inactive_text);
        self.search.set_color(p.editor_bg);
        self.search.set_text_color(p.text);
        self.tree.redraw();
        self.header.redraw();
        self.search.redraw();
    }
}

/// FLTK treats `\` as an escape in tree paths.
fn escape_label(relative: &str) -> String {
    relative.replace('\\', "\\\\")
}

fn item_relative_path(item: &TreeItem) -> String {
    let mut parts = Vec::new();
    let mut current = Some(item.clone());
    while let Some(node) = current {
        if node.is_root() {
            break;
        }
        if let Some(label) = node.label() {
            parts.push(label);
        }
        current = node.parent();
    }
    parts.reverse();
    parts.join("/")
}
