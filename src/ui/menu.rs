use fltk::{
    app::Sender,
    enums::Shortcut,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::messages::Message;
use crate::app::domain::settings::AppSettings;

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, settings: &AppSettings, initial_dark_mode: bool) {
    let s = sender;

    // File
    menu.add("File/New", Shortcut::Ctrl | 'n', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileNew) });
    menu.add("File/Open...", Shortcut::Ctrl | 'o', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileOpen) });
    menu.add("File/Open Folder...", Shortcut::Ctrl | Shortcut::Shift | 'o', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenFolder) });
    menu.add("File/Save", Shortcut::Ctrl | 's', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileSave) });
    menu.add("File/Save As...", Shortcut::Ctrl | Shortcut::Shift | 's', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::FileSaveAs) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileQuit) });

    // Edit
    menu.add("Edit/Undo", Shortcut::Ctrl | 'z', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::EditUndo) });
    menu.add("Edit/Redo", Shortcut::Ctrl | Shortcut::Shift | 'z', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::EditRedo) });
    menu.add("Edit/Cut", Shortcut::Ctrl | 'x', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::EditCut) });
    menu.add("Edit/Copy", Shortcut::Ctrl | 'c', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::EditCopy) });
    menu.add("Edit/Paste", Shortcut::Ctrl | 'v', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::EditPaste) });
    menu.add("Edit/Select All", Shortcut::Ctrl | 'a', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SelectAll) });

    // View
    menu.add("View/Editor", Shortcut::Ctrl | '1', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowEditor) });
    menu.add("View/Mind Map", Shortcut::Ctrl | '2', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::ShowMindMap) });
    let sb_flag = if settings.sidebar_visible { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Toggle Sidebar", Shortcut::Ctrl | 'b', sb_flag, { let s = *s; move |_| s.send(Message::ToggleSidebar) });
    let st_flag = if settings.statusbar_visible { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Toggle Status Bar", Shortcut::None, st_flag, { let s = *s; move |_| s.send(Message::ToggleStatusBar) });
    let dm_flag = if initial_dark_mode { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Toggle Dark Mode", Shortcut::None, dm_flag, { let s = *s; move |_| s.send(Message::ToggleDarkMode) });

    // Git
    menu.add("Git/Init Repository", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::GitInit) });
    menu.add("Git/Status", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::GitStatus) });
    menu.add("Git/Add All", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::GitStageAll) });
    menu.add("Git/Commit", Shortcut::None, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::GitCommit) });
    menu.add("Git/Push", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::GitPush) });
    menu.add("Git/Pull", Shortcut::None, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::GitPull) });
    menu.add("Git/Branches", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::GitBranches) });
    menu.add("Git/Log", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::GitLog) });

    // Mind map
    menu.add("Mind Map/New Diagram", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::MindMapNew) });
    menu.add("Mind Map/Load...", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::MindMapLoad) });
    menu.add("Mind Map/Save...", Shortcut::None, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::MindMapSave) });
    menu.add("Mind Map/Delete Selected", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::MindMapDeleteSelected) });

    // Help
    menu.add("Help/About Lingxi", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowAbout) });
}
