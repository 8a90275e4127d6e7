use std::fs;
use std::path::{Path, PathBuf};

use crate::app::domain::mindmap::{DiagramDocument, MindMap};
use crate::app::infrastructure::error::{AppError, Result};

pub const MINDMAP_EXTENSION: &str = "mindmap";

/// Chooser filter for diagram files.
pub fn mindmap_filter() -> String {
    format!("Mind Map Files\t*.{MINDMAP_EXTENSION}")
}

/// Append `.mindmap` when the chosen name has no extension.
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(MINDMAP_EXTENSION)
    }
}

pub fn save_to_path(map: &MindMap, path: &Path) -> Result<()> {
    let doc = map
        .to_document()
        .ok_or_else(|| AppError::Document("the mind map has no central topic to save".to_string()))?;
    save_document(&doc, path)
}

/// Write an already captured snapshot to `path`.
pub fn save_document(doc: &DiagramDocument, path: &Path) -> Result<()> {
    fs::write(path, doc.to_json()?)?;
    log::info!("saved {} nodes to {}", doc.node_count(), path.display());
    Ok(())
}

/// Replace `map` with the diagram stored at `path`. `map` is unchanged on
/// any error.
pub fn load_from_path(map: &mut MindMap, path: &Path) -> Result<()> {
    let json = fs::read_to_string(path)?;
    let doc = DiagramDocument::from_json(&json)?;
    map.load_document(&doc)?;
    log::info!("loaded mind map from {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::geometry::Point;

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.mindmap");

        let mut map = MindMap::new();
        let root = map.new_root("中心主题");
        map.add_child(root, "Child").unwrap();
        map.create_free_text(Point::new(5.0, 5.0), "note");
        save_to_path(&map, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("中心主题"));
        assert!(written.contains("\"shape_type\": \"ellipse\""));

        let mut loaded = MindMap::new();
        load_from_path(&mut loaded, &path).unwrap();
        assert_eq!(loaded.node_count(), 2);
        assert_eq!(loaded.texts().count(), 1);
    }

    #[test]
    fn test_save_document_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.mindmap");

        let mut map = MindMap::new();
        let root = map.new_root("Before");
        let doc = map.to_document().unwrap();
        // Later edits do not leak into the captured snapshot
        map.edit_node_text(root, "After");
        save_document(&doc, &path).unwrap();

        let mut loaded = MindMap::new();
        load_from_path(&mut loaded, &path).unwrap();
        assert_eq!(loaded.node(loaded.root().unwrap()).unwrap().text, "Before");
    }

    #[test]
    fn test_save_without_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let map = MindMap::new();
        assert!(matches!(
            save_to_path(&map, &dir.path().join("x.mindmap")),
            Err(AppError::Document(_))
        ));
    }

    #[test]
    fn test_malformed_file_keeps_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.mindmap");
        fs::write(&path, r#"{"root": {"text": "x"}}"#).unwrap();

        let mut map = MindMap::new();
        map.new_root("Existing");
        assert!(load_from_path(&mut map, &path).is_err());
        assert_eq!(map.node_count(), 1);
        assert!(load_from_path(&mut map, &dir.path().join("missing.mindmap")).is_err());
    }

    #[test]
    fn test_default_extension() {
        assert_eq!(with_default_extension(PathBuf::from("a/plan")), PathBuf::from("a/plan.mindmap"));
        assert_eq!(with_default_extension(PathBuf::from("a/plan.json")), PathBuf::from("a/plan.json"));
    }
}
