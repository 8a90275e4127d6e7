use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::Sender,
    enums::{Align, FrameType},
    frame::Frame,
    group::{Flex, FlexType, Group, Tabs},
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use super::file_explorer::FileExplorer;
use super::git_panel::GitPanelView;
use super::mind_map::MindMapView;
use crate::app::domain::messages::Message;
use crate::app::domain::mindmap::MindMap;

pub const WINDOW_WIDTH: i32 = 1200;
pub const WINDOW_HEIGHT: i32 = 800;
pub const MENU_HEIGHT: i32 = 30;
pub const SIDEBAR_WIDTH: i32 = 280;
pub const STATUS_BAR_HEIGHT: i32 = 22;
const TAB_LABEL_HEIGHT: i32 = 25;
const BODY_GAP: i32 = 4;

pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub body: Flex,
    pub sidebar: Tabs,
    pub explorer: FileExplorer,
    pub git_panel: GitPanelView,
    pub main_tabs: Tabs,
    pub editor_page: Flex,
    pub mind_map_page: Flex,
    /// Parent of the split-pane widget tree, rebuilt on every layout change.
    pub workspace: Group,
    pub mind_map: MindMapView,
    pub status_bar: Frame,
}

fn page(x: i32, y: i32, w: i32, h: i32, label: &str) -> Flex {
    let mut flex = Flex::new(x, y + TAB_LABEL_HEIGHT, w, h - TAB_LABEL_HEIGHT, None);
    flex.set_label(label);
    flex.set_type(FlexType::Column);
    flex
}

pub fn build_main_window(sender: Sender<Message>, mind_map: Rc<RefCell<MindMap>>) -> MainWidgets {
    let mut wind = Window::new(100, 100, WINDOW_WIDTH, WINDOW_HEIGHT, "Lingxi");
    wind.set_xclass("Lingxi");

    let mut flex = Flex::new(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT, None);
    flex.set_type(FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, MENU_HEIGHT, "");
    flex.fixed(&menu, MENU_HEIGHT);

    let body_y = MENU_HEIGHT;
    let body_h = WINDOW_HEIGHT - MENU_HEIGHT - STATUS_BAR_HEIGHT;
    let mut body = Flex::new(0, body_y, WINDOW_WIDTH, body_h, None);
    body.set_type(FlexType::Row);
    body.set_pad(BODY_GAP);

    // Sidebar: file explorer and Git panel
    let mut sidebar = Tabs::new(0, body_y, SIDEBAR_WIDTH, body_h, None);
    let files_page = page(0, body_y, SIDEBAR_WIDTH, body_h, "Files");
    let explorer = FileExplorer::new(sender);
    files_page.end();
    let git_page = page(0, body_y, SIDEBAR_WIDTH, body_h, "Git");
    let git_panel = GitPanelView::new(sender);
    git_page.end();
    sidebar.end();
    sidebar.resizable(&files_page);
    body.fixed(&sidebar, SIDEBAR_WIDTH);

    // Main area: split editor workspace and mind map
    let main_x = SIDEBAR_WIDTH + BODY_GAP;
    let main_w = WINDOW_WIDTH - main_x;
    let mut main_tabs = Tabs::new(main_x, body_y, main_w, body_h, None);
    let mut editor_page = page(main_x, body_y, main_w, body_h, "Editor");
    let workspace = Group::default();
    workspace.end();
    editor_page.end();
    let mut mind_map_page = page(main_x, body_y, main_w, body_h, "Mind Map");
    let mind_map = MindMapView::new(sender, mind_map);
    mind_map_page.end();
    main_tabs.end();
    main_tabs.resizable(&editor_page);
    body.end();

    let mut status_bar = Frame::default().with_label("Ready");
    status_bar.set_frame(FrameType::FlatBox);
    status_bar.set_align(Align::Left | Align::Inside);
    status_bar.set_label_size(12);
    flex.fixed(&status_bar, STATUS_BAR_HEIGHT);

    flex.end();
    wind.end();
    wind.resizable(&flex);
    wind.size_range(800, 500, 0, 0);

    editor_page.set_frame(FrameType::FlatBox);
    mind_map_page.set_frame(FrameType::FlatBox);

    MainWidgets {
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
        mind_map,
        status_bar,
    }
}
