use std::path::{Path, PathBuf};

use fltk::dialog::{self, FileDialogType, NativeFileChooser};

/// FLTK filter lines for the editor's open dialog.
/// Format: "Description\tPattern\nDescription2\tPattern2"; FLTK adds "All Files".
pub fn text_files_filter() -> String {
    [
        "Text Files\t*.txt",
        "Markdown Files\t*.{md,markdown}",
        "Rust Files\t*.rs",
        "Python Files\t*.py",
        "Config Files\t*.{json,yaml,yml,toml,ini,cfg,conf}",
    ]
    .join("\n")
}

fn start_dir(dir: Option<&Path>) -> String {
    dir.map(|d| d.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string())
}

fn non_empty(path: Option<String>) -> Option<PathBuf> {
    path.filter(|p| !p.trim().is_empty()).map(PathBuf::from)
}

pub fn native_open_dialog(title: &str, filter: &str, dir: Option<&Path>) -> Option<PathBuf> {
    non_empty(dialog::file_chooser(title, filter, &start_dir(dir), false))
}

pub fn native_save_dialog(title: &str, filter: &str, dir: Option<&Path>) -> Option<PathBuf> {
    non_empty(dialog::file_chooser(title, filter, &start_dir(dir), false))
}

pub fn native_folder_dialog(dir: Option<&Path>) -> Option<PathBuf> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseDir);
    if let Some(dir) = dir
        && let Err(e) = nfc.set_directory(&dir)
    {
        log::debug!("folder dialog start directory rejected: {:?}", e);
    }
    nfc.show();
    let folder = nfc.filename();
    if folder.as_os_str().is_empty() { None } else { Some(folder) }
}
