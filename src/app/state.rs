use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fltk::{
    app::{self, Sender},
    dialog,
    enums::Font,
    frame::Frame,
    group::{Flex, Tabs},
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use super::controllers::documents::{DocumentId, DocumentStore, WELCOME_TITLE};
use super::controllers::git_panel::{GitOp, GitPanelState};
use super::domain::geometry::Point;
use super::domain::layout::{DragOutcome, Orientation, PaneId, PaneLayout, TabId};
use super::domain::messages::Message;
use super::domain::mindmap::{DEFAULT_ROOT_TEXT, LineId, MindMap, Mode, NodeId, ShapeKind, TextId};
use super::domain::settings::{AppSettings, FontChoice, ThemeMode};
use super::services::files::read_text;
use super::services::mindmap_io::{load_from_path, mindmap_filter, save_document, with_default_extension};
use crate::ui::file_dialogs::{native_folder_dialog, native_open_dialog, native_save_dialog, text_files_filter};
use crate::ui::file_explorer::FileExplorer;
use crate::ui::git_panel::GitPanelView;
use crate::ui::main_window::MainWidgets;
use crate::ui::mind_map::MindMapView;
use crate::ui::split_view::SplitView;
use crate::ui::theme::apply_theme;
#[cfg(target_os = "windows")]
use crate::ui::theme::set_windows_titlebar_theme;

const APP_NAME: &str = "Lingxi";

pub fn fltk_font(choice: FontChoice) -> Font {
    match choice {
        FontChoice::ScreenBold => Font::ScreenBold,
        FontChoice::Courier => Font::Courier,
        FontChoice::HelveticaMono => Font::Screen,
    }
}

/// Text typed into a prompt, `None` when cancelled or left blank.
fn prompt(label: &str, default: &str) -> Option<String> {
    dialog::input_default(label, default)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

pub struct AppState {
    pub window: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub body: Flex,
    pub sidebar: Tabs,
    pub main_tabs: Tabs,
    pub editor_page: Flex,
    pub mind_map_page: Flex,
    pub status_bar: Frame,
    pub explorer: FileExplorer,
    pub git_view: GitPanelView,
    pub mind_map_view: MindMapView,
    pub mind_map: Rc<RefCell<MindMap>>,
    pub split_view: SplitView,
    pub layout: PaneLayout<DocumentId>,
    pub documents: DocumentStore,
    pub git: GitPanelState,
    /// Pane whose editor last had focus; edit commands and saves apply to it.
    pub focused_pane: PaneId,
    pub sender: Sender<Message>,
    pub settings: Rc<RefCell<AppSettings>>,
    pub dark_mode: bool,
    workspace_root: PathBuf,
}

impl AppState {
    pub fn new(
        widgets: MainWidgets,
        mind_map: Rc<RefCell<MindMap>>,
        sender: Sender<Message>,
        settings: Rc<RefCell<AppSettings>>,
        dark_mode: bool,
        workspace_root: PathBuf,
    ) -> Self {
        let (font, font_size) = {
            let s = settings.borrow();
            (fltk_font(s.font), s.font_size as i32)
        };
        let MainWidgets {
            wind,
            flex,
            menu,
            body,
            sidebar,
            explorer,
            git_panel,
            main_tabs,
            editor_page,
            mind_map_page,
            workspace,
            mind_map: mind_map_view,
            status_bar,
        } = widgets;

        let layout = PaneLayout::new();
        let focused_pane = layout.main_pane();

        let mut state = Self {
            window: wind,
            flex,
            menu,
            body,
            sidebar,
            main_tabs,
            editor_page,
            mind_map_page,
            status_bar,
            explorer,
            git_view: git_panel,
            mind_map_view,
            mind_map,
            split_view: SplitView::new(workspace, sender, dark_mode, font, font_size),
            layout,
            documents: DocumentStore::new(),
            git: GitPanelState::default(),
            focused_pane,
            sender,
            settings,
            dark_mode,
            workspace_root: workspace_root.clone(),
        };

        let welcome = state.documents.add_welcome();
        state.layout.add_tab(welcome, WELCOME_TITLE);
        state.set_workspace(workspace_root);
        state.split_view.rebuild(&state.layout, &state.documents);
        state.apply_visibility();
        state.apply_theme_everywhere();
        state.update_window_title();
        state
    }

    // --- Helpers ---

    fn set_status(&mut self, text: &str) {
        self.status_bar.set_label(text);
        self.status_bar.redraw();
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.borrow().save() {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    fn update_menu_checkbox(&self, path: &str, checked: bool) {
        let idx = self.menu.find_index(path);
        if idx >= 0
            && let Some(mut item) = self.menu.at(idx)
        {
            if checked {
                item.set();
            } else {
                item.clear();
            }
        }
    }

    /// Document shown in the focused pane, falling back to the main pane.
    pub fn active_document(&self) -> Option<DocumentId> {
        let container = self
            .layout
            .container(self.focused_pane)
            .or_else(|| self.layout.container(self.layout.main_pane()))?;
        container.active_tab().map(|tab| tab.content)
    }

    fn tab_for_document(&self, id: DocumentId) -> Option<TabId> {
        self.layout
            .containers()
            .into_iter()
            .flat_map(|c| c.tabs())
            .find(|tab| tab.content == id)
            .map(|tab| tab.id)
    }

    fn ensure_focus_valid(&mut self) {
        if self.layout.container(self.focused_pane).is_none() {
            self.focused_pane = self.layout.main_pane();
        }
    }

    /// Sync the workspace widgets after a model change. Structural changes
    /// (containers added or removed) rebuild the widget tree.
    fn sync_workspace(&mut self, structural: bool) {
        self.ensure_focus_valid();
        if structural {
            self.split_view.rebuild(&self.layout, &self.documents);
        } else {
            self.split_view.refresh(&self.layout, &self.documents);
        }
        self.update_window_title();
    }

    pub fn update_window_title(&mut self) {
        let label = match self.active_document().and_then(|id| self.documents.get(id)) {
            Some(doc) => format!("{} - {}", doc.tab_title(), APP_NAME),
            None => APP_NAME.to_string(),
        };
        self.window.set_label(&label);
    }

    /// Report buffer edits so tab strips can show the unsaved marker.
    fn watch_buffer(&mut self, id: DocumentId) {
        let sender = self.sender;
        if let Some(doc) = self.documents.get_mut(id) {
            doc.buffer.add_modify_callback(move |_pos, inserted, deleted, _restyled, _deleted_text| {
                if inserted > 0 || deleted > 0 {
                    sender.send(Message::BufferModified);
                }
            });
        }
    }

    // --- Workspace folder ---

    fn set_workspace(&mut self, root: PathBuf) {
        if let Err(e) = self.explorer.set_root(&root) {
            log::warn!("cannot list {}: {}", root.display(), e);
            dialog::alert_default(&format!("Cannot open folder {}: {}", root.display(), e));
            return;
        }
        self.git.set_repo(root.clone());
        self.git_view.update(&self.git);
        self.set_status(&format!("Workspace: {}", root.display()));
        self.workspace_root = root;
    }

    pub fn open_folder(&mut self) {
        let Some(folder) = native_folder_dialog(Some(&self.workspace_root)) else {
            return;
        };
        self.set_workspace(folder.clone());
        if self.workspace_root == folder {
            self.settings.borrow_mut().workspace_root = Some(folder);
            self.save_settings();
        }
    }

    pub fn explorer_filter(&mut self, query: &str) {
        self.explorer.apply_filter(query);
    }

    pub fn explorer_refresh(&mut self) {
        if let Err(e) = self.explorer.refresh() {
            dialog::alert_default(&format!("Cannot refresh the file list: {}", e));
        }
    }

    // --- File operations ---

    pub fn file_new(&mut self) {
        let id = self.documents.add_untitled();
        self.watch_buffer(id);
        let title = self
            .documents
            .get(id)
            .map(|d| d.display_name.clone())
            .unwrap_or_default();
        self.layout.add_tab(id, title);
        self.focused_pane = self.layout.main_pane();
        self.show_editor();
        self.sync_workspace(false);
    }

    /// Open `path` in a tab, or activate the tab already showing it.
    pub fn open_file(&mut self, path: PathBuf) {
        let path = path.canonicalize().unwrap_or(path);

        if let Some(existing) = self.documents.find_by_path(&path)
            && let Some(tab) = self.tab_for_document(existing)
            && let Some(pane) = self.layout.activate_tab(tab)
        {
            self.focused_pane = pane;
            self.show_editor();
            self.sync_workspace(false);
            return;
        }

        match read_text(&path) {
            Ok(content) => {
                let id = self.documents.add_from_file(path.clone(), &content);
                self.watch_buffer(id);
                let title = self
                    .documents
                    .get(id)
                    .map(|d| d.display_name.clone())
                    .unwrap_or_default();
                self.layout.add_tab(id, title);
                self.focused_pane = self.layout.main_pane();
                self.show_editor();
                self.sync_workspace(false);
                self.set_status(&format!("Opened {}", path.display()));
            }
            Err(e) => dialog::alert_default(&format!("Error opening file: {}", e)),
        }
    }

    pub fn file_open(&mut self) {
        if let Some(path) = native_open_dialog("Open File", &text_files_filter(), Some(&self.workspace_root)) {
            self.open_file(path);
        }
    }

    /// Save a document, asking for a name when it has none. Returns whether
    /// it ended up saved.
    fn save_document(&mut self, id: DocumentId) -> bool {
        let Some(doc) = self.documents.get(id) else {
            return false;
        };
        if doc.read_only {
            self.set_status(&format!("{} is read-only", doc.display_name));
            return false;
        }
        if doc.file_path.is_none() {
            return self.save_document_as(id);
        }
        match self.documents.save(id) {
            Ok(()) => {
                self.sync_workspace(false);
                self.set_status("Saved");
                true
            }
            Err(e) => {
                dialog::alert_default(&format!("Error saving file: {}", e));
                false
            }
        }
    }

    fn save_document_as(&mut self, id: DocumentId) -> bool {
        let Some(path) = native_save_dialog("Save As", "*", Some(&self.workspace_root)) else {
            return false;
        };
        match self.documents.save_as(id, path.clone()) {
            Ok(()) => {
                let title = self
                    .documents
                    .get(id)
                    .map(|d| d.display_name.clone())
                    .unwrap_or_default();
                if let Some(tab) = self.tab_for_document(id)
                    && let Some(tab) = self.layout.tab_mut(tab)
                {
                    tab.title = title;
                }
                self.sync_workspace(false);
                if path.starts_with(&self.workspace_root) {
                    self.explorer_refresh();
                }
                self.set_status(&format!("Saved {}", path.display()));
                true
            }
            Err(e) => {
                dialog::alert_default(&format!("Error saving file: {}", e));
                false
            }
        }
    }

    pub fn file_save(&mut self) {
        if let Some(id) = self.active_document() {
            self.save_document(id);
        }
    }

    pub fn file_save_as(&mut self) {
        if let Some(id) = self.active_document() {
            if self.documents.get(id).is_some_and(|d| d.read_only) {
                self.set_status("The welcome page cannot be saved");
                return;
            }
            self.save_document_as(id);
        }
    }

    /// Handle quit request. Returns `true` if the app should exit.
    pub fn file_quit(&mut self) -> bool {
        if self.documents.has_unsaved() {
            let choice = dialog::choice2_default(
                "You have unsaved changes in one or more tabs.",
                "Save All",
                "Quit Without Saving",
                "Cancel",
            );
            match choice {
                Some(0) => {
                    let dirty: Vec<DocumentId> = self
                        .documents
                        .documents()
                        .iter()
                        .filter(|d| d.is_dirty() && !d.read_only)
                        .map(|d| d.id)
                        .collect();
                    for id in dirty {
                        if !self.save_document(id) {
                            return false;
                        }
                    }
                }
                Some(1) => {}
                _ => return false,
            }
        }
        self.save_settings();
        true
    }

    // --- Tabs and panes ---

    pub fn tab_activate(&mut self, pane: PaneId, index: usize) {
        if self.layout.set_active(pane, index) {
            self.focused_pane = pane;
            self.sync_workspace(false);
        }
    }

    /// Ask about unsaved edits before a document goes away. Returns whether
    /// closing may proceed.
    fn confirm_discard(&mut self, id: DocumentId) -> bool {
        let Some(doc) = self.documents.get(id) else {
            return true;
        };
        if !doc.is_dirty() || doc.read_only {
            return true;
        }
        let choice = dialog::choice2_default(
            &format!("\"{}\" has unsaved changes.", doc.display_name),
            "Save",
            "Discard",
            "Cancel",
        );
        match choice {
            Some(0) => self.save_document(id),
            Some(1) => true,
            _ => false,
        }
    }

    pub fn tab_close(&mut self, pane: PaneId, index: usize) {
        let Some(id) = self
            .layout
            .container(pane)
            .and_then(|c| c.tabs().get(index))
            .map(|tab| tab.content)
        else {
            return;
        };
        if !self.confirm_discard(id) {
            return;
        }
        let before = self.layout.container_count();
        // The tab may have moved while a save dialog was open
        let Some(tab) = self.tab_for_document(id) else {
            return;
        };
        let Some((pane, index)) = self.layout.find_tab(tab) else {
            return;
        };
        if let Some(closed) = self.layout.close_tab(pane, index) {
            self.documents.remove(closed.content);
        }
        let structural = self.layout.container_count() != before;
        self.sync_workspace(structural);
    }

    pub fn split_pane(&mut self, pane: PaneId, orientation: Orientation) {
        match self.layout.split(pane, orientation) {
            Some(new_pane) => {
                self.focused_pane = new_pane;
                self.sync_workspace(true);
            }
            None => log::debug!("split of unknown pane {:?} ignored", pane),
        }
    }

    pub fn close_pane(&mut self, pane: PaneId) {
        if self.layout.container_count() <= 1 {
            self.set_status("The last editor pane cannot be closed");
            return;
        }
        let documents: Vec<DocumentId> = self
            .layout
            .container(pane)
            .map(|c| c.tabs().iter().map(|t| t.content).collect())
            .unwrap_or_default();
        for id in &documents {
            if !self.confirm_discard(*id) {
                return;
            }
        }
        if let Some(tabs) = self.layout.close_with_tabs(pane) {
            for tab in tabs {
                self.documents.remove(tab.content);
            }
            self.sync_workspace(true);
        }
    }

    pub fn tab_dropped(&mut self, pane: PaneId, index: usize, x: i32, y: i32) {
        let regions = self.split_view.regions();
        let before = self.layout.container_count();
        match self.layout.drag_tab(pane, index, x, y, &regions) {
            DragOutcome::Moved { tab, from, to } => {
                log::debug!("moved tab {:?} from {:?} to {:?}", tab, from, to);
                self.focused_pane = to;
                let structural = self.layout.container_count() != before;
                self.sync_workspace(structural);
            }
            DragOutcome::SameContainer => {}
            DragOutcome::NoTarget => log::debug!("tab dropped outside every pane at ({x}, {y})"),
            DragOutcome::InvalidTab => log::warn!("dropped tab {index} of {:?} no longer exists", pane),
        }
    }

    pub fn editor_focused(&mut self, pane: PaneId) {
        if self.focused_pane != pane && self.layout.container(pane).is_some() {
            self.focused_pane = pane;
            self.update_window_title();
        }
    }

    pub fn buffer_modified(&mut self) {
        self.split_view.refresh(&self.layout, &self.documents);
        self.update_window_title();
    }

    // --- Edit ---

    /// Run an edit command on the focused editor. Commands that change text
    /// are skipped for read-only pages.
    pub fn edit(&mut self, msg: &Message) {
        let Some(pane) = self.split_view.pane(self.focused_pane) else {
            return;
        };
        let read_only = pane.is_read_only();
        let editor = pane.editor();
        match msg {
            Message::EditCopy => editor.copy(),
            Message::EditCut if !read_only => editor.cut(),
            Message::EditPaste if !read_only => editor.paste(),
            Message::EditUndo if !read_only => editor.undo(),
            Message::EditRedo if !read_only => editor.redo(),
            Message::SelectAll => {
                if let Some(mut buffer) = editor.buffer() {
                    let len = buffer.length();
                    buffer.select(0, len);
                }
            }
            _ => {}
        }
    }

    // --- View ---

    fn apply_visibility(&mut self) {
        let (sidebar, status) = {
            let s = self.settings.borrow();
            (s.sidebar_visible, s.statusbar_visible)
        };
        if sidebar {
            self.sidebar.show();
        } else {
            self.sidebar.hide();
        }
        if status {
            self.status_bar.show();
        } else {
            self.status_bar.hide();
        }
        self.body.layout();
        self.flex.layout();
        self.window.redraw();
    }

    pub fn toggle_sidebar(&mut self) {
        let visible = {
            let mut s = self.settings.borrow_mut();
            s.sidebar_visible = !s.sidebar_visible;
            s.sidebar_visible
        };
        self.apply_visibility();
        self.update_menu_checkbox("View/Toggle Sidebar", visible);
        self.save_settings();
    }

    pub fn toggle_status_bar(&mut self) {
        let visible = {
            let mut s = self.settings.borrow_mut();
            s.statusbar_visible = !s.statusbar_visible;
            s.statusbar_visible
        };
        self.apply_visibility();
        self.update_menu_checkbox("View/Toggle Status Bar", visible);
        self.save_settings();
    }

    fn apply_theme_everywhere(&mut self) {
        let is_dark = self.dark_mode;
        apply_theme(&mut self.window, &mut self.menu, &mut self.status_bar, is_dark);
        self.split_view.apply_theme(is_dark);
        self.explorer.apply_theme(is_dark);
        self.git_view.apply_theme(is_dark);
        self.git_view.update(&self.git);
        self.mind_map_view.apply_theme(is_dark);
        #[cfg(target_os = "windows")]
        set_windows_titlebar_theme(&self.window, is_dark);
        app::redraw();
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.apply_theme_everywhere();
        self.update_menu_checkbox("View/Toggle Dark Mode", self.dark_mode);
        self.settings.borrow_mut().theme_mode = if self.dark_mode { ThemeMode::Dark } else { ThemeMode::Light };
        self.save_settings();
    }

    pub fn show_editor(&mut self) {
        if let Err(e) = self.main_tabs.set_value(&self.editor_page) {
            log::debug!("cannot switch to the editor page: {:?}", e);
        }
        self.main_tabs.redraw();
    }

    pub fn show_mind_map(&mut self) {
        if let Err(e) = self.main_tabs.set_value(&self.mind_map_page) {
            log::debug!("cannot switch to the mind map page: {:?}", e);
        }
        self.main_tabs.redraw();
    }

    pub fn show_about(&self) {
        dialog::message_default(&format!(
            "{} {}\n\nSplit editors, a Git panel and a mind-map canvas.",
            APP_NAME,
            env!("CARGO_PKG_VERSION")
        ));
    }

    // --- Git ---

    pub fn git(&mut self, msg: &Message) {
        let op = match msg {
            Message::GitInit => GitOp::Init,
            Message::GitStatus => GitOp::Status,
            Message::GitStageAll => GitOp::StageAll,
            Message::GitCommit => GitOp::Commit(self.git_view.commit_message().trim().to_string()),
            Message::GitPush => GitOp::Push,
            Message::GitPull => GitOp::Pull,
            Message::GitBranches => GitOp::Branches,
            Message::GitLog => GitOp::Log,
            _ => return,
        };
        let is_commit = matches!(op, GitOp::Commit(_));
        let touches_files = matches!(op, GitOp::Init | GitOp::Pull);

        self.git_view.set_busy(true);
        app::flush();
        let ok = self.git.run(op);
        self.git_view.update(&self.git);

        if ok && is_commit {
            self.git_view.clear_commit_message();
        }
        if ok && touches_files {
            self.explorer_refresh();
        }
        let outcome = if ok { "Git command finished" } else { "Git command failed" };
        let status = format!("{} ({})", outcome, self.git.branch_label());
        self.set_status(&status);
    }

    pub fn git_auto_refresh(&mut self) {
        if self.git.auto_refresh() {
            self.git_view.update(&self.git);
        }
    }

    // --- Mind map ---

    fn redraw_mind_map(&mut self) {
        self.mind_map_view.redraw();
    }

    pub fn mind_map_new(&mut self) {
        if !self.mind_map.borrow().is_empty() {
            let choice = dialog::choice2_default("Discard the current diagram?", "Discard", "Cancel", "");
            if choice != Some(0) {
                return;
            }
        }
        let Some(text) = prompt("Root node text:", DEFAULT_ROOT_TEXT) else {
            return;
        };
        self.mind_map.borrow_mut().new_root(&text);
        self.mind_map_view.reset_view();
        self.show_mind_map();
        self.set_status("New mind map");
    }

    pub fn mind_map_save(&mut self) {
        let Some(document) = self.mind_map.borrow().to_document() else {
            dialog::alert_default("Nothing to save: create a root node first.");
            return;
        };
        let start = self.settings.borrow().last_mindmap_dir.clone();
        let Some(path) = native_save_dialog("Save Mind Map", &mindmap_filter(), start.as_deref()) else {
            return;
        };
        let path = with_default_extension(path);
        if let Err(e) = save_document(&document, &path) {
            dialog::alert_default(&format!("Failed to save mind map: {}", e));
            return;
        }
        self.remember_mindmap_dir(&path);
        self.set_status(&format!("Mind map saved to {}", path.display()));
    }

    pub fn mind_map_load(&mut self) {
        let start = self.settings.borrow().last_mindmap_dir.clone();
        let Some(path) = native_open_dialog("Load Mind Map", &mindmap_filter(), start.as_deref()) else {
            return;
        };
        let result = load_from_path(&mut self.mind_map.borrow_mut(), &path);
        match result {
            Ok(()) => {
                self.remember_mindmap_dir(&path);
                self.mind_map_view.sync_toolbar();
                self.mind_map_view.reset_view();
                self.show_mind_map();
                self.set_status(&format!("Loaded {}", path.display()));
            }
            Err(e) => dialog::alert_default(&format!("Failed to load mind map: {}", e)),
        }
    }

    fn remember_mindmap_dir(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            self.settings.borrow_mut().last_mindmap_dir = Some(parent.to_path_buf());
            self.save_settings();
        }
    }

    pub fn mind_map_set_mode(&mut self, mode: Mode) {
        self.mind_map.borrow_mut().set_mode(mode);
        self.mind_map_view.sync_toolbar();
    }

    pub fn mind_map_set_shape(&mut self, shape: ShapeKind) {
        self.mind_map.borrow_mut().set_shape(shape);
        self.settings.borrow_mut().node_shape = shape;
        self.save_settings();
        self.mind_map_view.sync_toolbar();
    }

    pub fn mind_map_set_size(&mut self, width: Option<f64>, height: Option<f64>) {
        let (w, h) = {
            let mut map = self.mind_map.borrow_mut();
            let (cur_w, cur_h) = map.node_size();
            map.set_node_size(width.unwrap_or(cur_w), height.unwrap_or(cur_h));
            map.node_size()
        };
        {
            let mut s = self.settings.borrow_mut();
            s.node_width = w;
            s.node_height = h;
        }
        self.save_settings();
        self.mind_map_view.sync_toolbar();
    }

    pub fn mind_map_prompt_node(&mut self, at: Point) {
        if let Some(text) = prompt("Node text:", "") {
            self.mind_map.borrow_mut().create_free_node(at, &text);
            self.redraw_mind_map();
        }
    }

    pub fn mind_map_prompt_text(&mut self, at: Point) {
        if let Some(text) = prompt("Text:", "") {
            self.mind_map.borrow_mut().create_free_text(at, &text);
            self.redraw_mind_map();
        }
    }

    pub fn mind_map_add_child(&mut self, parent: NodeId) {
        let Some(text) = prompt("Child node text:", "") else {
            return;
        };
        let result = self.mind_map.borrow_mut().add_child(parent, &text);
        match result {
            Ok(_) => self.redraw_mind_map(),
            Err(e) => dialog::alert_default(&e.to_string()),
        }
    }

    pub fn mind_map_edit_node(&mut self, id: NodeId) {
        let current = match self.mind_map.borrow().node(id) {
            Some(node) => node.text.clone(),
            None => return,
        };
        if let Some(text) = prompt("Node text:", &current) {
            self.mind_map.borrow_mut().edit_node_text(id, &text);
            self.redraw_mind_map();
        }
    }

    pub fn mind_map_edit_text(&mut self, id: TextId) {
        let current = match self.mind_map.borrow().text(id) {
            Some(item) => item.text.clone(),
            None => return,
        };
        if let Some(text) = prompt("Text:", &current) {
            self.mind_map.borrow_mut().edit_free_text(id, &text);
            self.redraw_mind_map();
        }
    }

    pub fn mind_map_delete_node(&mut self, id: NodeId) {
        let result = self.mind_map.borrow_mut().delete_node(id);
        match result {
            Ok(()) => self.redraw_mind_map(),
            Err(e) => dialog::alert_default(&e.to_string()),
        }
    }

    pub fn mind_map_delete_text(&mut self, id: TextId) {
        if self.mind_map.borrow_mut().delete_text(id) {
            self.redraw_mind_map();
        }
    }

    pub fn mind_map_delete_line(&mut self, id: LineId) {
        if self.mind_map.borrow_mut().delete_line(id) {
            self.redraw_mind_map();
        }
    }

    pub fn mind_map_delete_selected(&mut self) {
        let result = self.mind_map.borrow_mut().delete_selected();
        match result {
            Ok(true) => self.redraw_mind_map(),
            Ok(false) => {}
            Err(e) => dialog::alert_default(&e.to_string()),
        }
    }
}
