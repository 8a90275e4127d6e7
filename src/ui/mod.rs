pub mod editor_container;
pub mod file_dialogs;
pub mod file_explorer;
pub mod git_panel;
pub mod main_window;
pub mod menu;
pub mod mind_map;
pub mod split_view;
pub mod theme;
