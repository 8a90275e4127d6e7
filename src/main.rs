#[cfg(not(target_os = "windows"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use fltk::{app, enums::Event, prelude::*};

use lingxi::app::domain::messages::Message;
use lingxi::app::domain::mindmap::MindMap;
use lingxi::app::domain::settings::AppSettings;
use lingxi::app::infrastructure::platform::resolve_dark_mode;
use lingxi::app::state::AppState;
use lingxi::ui::main_window::build_main_window;
use lingxi::ui::menu::build_menu;

fn main() {
    env_logger::init();

    let app = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let settings = AppSettings::load();
    let workspace_root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.resolved_workspace_root());
    let dark_mode = resolve_dark_mode(settings.theme_mode);
    let git_refresh_secs = settings.git_refresh_secs;
    log::info!("starting in {}", workspace_root.display());

    let mind_map = Rc::new(RefCell::new(MindMap::with_default_root(
        settings.node_shape,
        settings.node_width,
        settings.node_height,
    )));
    let mut widgets = build_main_window(sender, mind_map.clone());
    build_menu(&mut widgets.menu, &sender, &settings, dark_mode);

    widgets.wind.set_callback(move |_| {
        if app::event() == Event::Close {
            sender.send(Message::WindowClose);
        }
    });

    let settings = Rc::new(RefCell::new(settings));
    let mut state = AppState::new(widgets, mind_map, sender, settings, dark_mode, workspace_root);
    state.window.show();

    if git_refresh_secs > 0 {
        let interval = f64::from(git_refresh_secs);
        app::add_timeout3(interval, move |handle| {
            sender.send(Message::GitAutoRefresh);
            app::repeat_timeout3(interval, handle);
        });
    }

    while app.wait() {
        let Some(msg) = receiver.recv() else {
            continue;
        };
        match msg {
            Message::FileNew => state.file_new(),
            Message::FileOpen => state.file_open(),
            Message::FileSave => state.file_save(),
            Message::FileSaveAs => state.file_save_as(),
            Message::OpenFolder => state.open_folder(),
            Message::OpenFile(path) => state.open_file(path),
            Message::FileQuit | Message::WindowClose => {
                if state.file_quit() {
                    app.quit();
                }
            }

            Message::EditUndo
            | Message::EditRedo
            | Message::EditCut
            | Message::EditCopy
            | Message::EditPaste
            | Message::SelectAll => state.edit(&msg),

            Message::ToggleSidebar => state.toggle_sidebar(),
            Message::ToggleStatusBar => state.toggle_status_bar(),
            Message::ToggleDarkMode => state.toggle_dark_mode(),
            Message::ShowEditor => state.show_editor(),
            Message::ShowMindMap => state.show_mind_map(),
            Message::ShowAbout => state.show_about(),

            Message::SplitPane(pane, orientation) => state.split_pane(pane, orientation),
            Message::ClosePane(pane) => state.close_pane(pane),
            Message::TabActivate(pane, index) => state.tab_activate(pane, index),
            Message::TabClose(pane, index) => state.tab_close(pane, index),
            Message::TabDropped { pane, index, x, y } => state.tab_dropped(pane, index, x, y),
            Message::EditorFocused(pane) => state.editor_focused(pane),
            Message::BufferModified => state.buffer_modified(),

            Message::ExplorerFilter(query) => state.explorer_filter(&query),
            Message::ExplorerRefresh => state.explorer_refresh(),

            Message::GitInit
            | Message::GitStatus
            | Message::GitStageAll
            | Message::GitCommit
            | Message::GitPush
            | Message::GitPull
            | Message::GitBranches
            | Message::GitLog => state.git(&msg),
            Message::GitAutoRefresh => state.git_auto_refresh(),

            Message::MindMapNew => state.mind_map_new(),
            Message::MindMapSave => state.mind_map_save(),
            Message::MindMapLoad => state.mind_map_load(),
            Message::MindMapSetMode(mode) => state.mind_map_set_mode(mode),
            Message::MindMapSetShape(shape) => state.mind_map_set_shape(shape),
            Message::MindMapSetWidth(width) => state.mind_map_set_size(Some(width), None),
            Message::MindMapSetHeight(height) => state.mind_map_set_size(None, Some(height)),
            Message::MindMapPromptNode(at) => state.mind_map_prompt_node(at),
            Message::MindMapPromptText(at) => state.mind_map_prompt_text(at),
            Message::MindMapAddChild(id) => state.mind_map_add_child(id),
            Message::MindMapEditNode(id) => state.mind_map_edit_node(id),
            Message::MindMapEditText(id) => state.mind_map_edit_text(id),
            Message::MindMapDeleteNode(id) => state.mind_map_delete_node(id),
            Message::MindMapDeleteText(id) => state.mind_map_delete_text(id),
            Message::MindMapDeleteLine(id) => state.mind_map_delete_line(id),
            Message::MindMapDeleteSelected => state.mind_map_delete_selected(),
        }
    }
}
