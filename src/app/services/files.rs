//! Workspace files: the explorer's directory listing and plain text I/O.

use std::fs;
use std::path::{Path, PathBuf};

use regex_lite::RegexBuilder;

use crate::app::infrastructure::error::Result;

/// How deep the explorer descends below the workspace root.
pub const DEFAULT_SCAN_DEPTH: usize = 8;

/// Directories never listed in the explorer.
const SKIPPED_DIRS: &[&str] = &[".git"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Path below the root with `/` separators, as shown in the tree.
    pub relative: String,
    pub is_dir: bool,
    pub depth: usize,
}

impl FileEntry {
    pub fn name(&self) -> &str {
        self.relative.rsplit('/').next().unwrap_or(&self.relative)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileTree {
    root: PathBuf,
    entries: Vec<FileEntry>,
}

impl FileTree {
    /// List everything below `root` depth first, directories before files,
    /// each group sorted case-insensitively. Unreadable subdirectories are
    /// skipped; an unreadable root is an error.
    pub fn scan(root: &Path, max_depth: usize) -> Result<Self> {
        let mut entries = Vec::new();
        walk(root, "", 0, max_depth, &mut entries, true)?;
        log::debug!("scanned {} entries under {}", entries.len(), root.display());
        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Files whose name matches `query`, case-insensitively. The query is a
    /// regular expression; one that does not compile is matched literally.
    /// An empty query keeps every entry.
    pub fn filter(&self, query: &str) -> Vec<&FileEntry> {
        let query = query.trim();
        if query.is_empty() {
            return self.entries.iter().collect();
        }
        match RegexBuilder::new(query).case_insensitive(true).build() {
            Ok(re) => self
                .entries
                .iter()
                .filter(|e| !e.is_dir && re.is_match(e.name()))
                .collect(),
            Err(_) => {
                let needle = query.to_lowercase();
                self.entries
                    .iter()
                    .filter(|e| !e.is_dir && e.name().to_lowercase().contains(&needle))
                    .collect()
            }
        }
    }

    pub fn find(&self, relative: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.relative == relative)
    }
}

fn walk(
    dir: &Path,
    prefix: &str,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<FileEntry>,
    is_root: bool,
) -> Result<()> {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) if !is_root => {
            log::debug!("skipping unreadable directory {}: {}", dir.display(), e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut children: Vec<(String, PathBuf, bool)> = read
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let path = entry.path();
            let is_dir = path.is_dir();
            (entry.file_name().to_string_lossy().into_owned(), path, is_dir)
        })
        .filter(|(name, _, is_dir)| !(*is_dir && SKIPPED_DIRS.contains(&name.as_str())))
        .collect();
    children.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.to_lowercase().cmp(&b.0.to_lowercase())));

    for (name, path, is_dir) in children {
        let relative = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };
        out.push(FileEntry {
            path: path.clone(),
            relative: relative.clone(),
            is_dir,
            depth,
        });
        if is_dir && depth + 1 < max_depth {
            walk(&path, &relative, depth + 1, max_depth, out, false)?;
        }
    }
    Ok(())
}

pub fn read_text(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text)?;
    Ok(())
}

/// File name for tab titles.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::create_dir_all(root.join("Docs")).unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();
        fs::write(root.join("A.md"), "a").unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(root.join("src/nested/deep.rs"), "").unwrap();
        fs::write(root.join("Docs/guide.md"), "").unwrap();
        dir
    }

    #[test]
    fn test_scan_orders_dirs_first_case_insensitive() {
        let dir = fixture();
        let tree = FileTree::scan(dir.path(), DEFAULT_SCAN_DEPTH).unwrap();
        let listed: Vec<_> = tree.entries().iter().map(|e| e.relative.as_str()).collect();
        assert_eq!(
            listed,
            vec![
                "Docs",
                "Docs/guide.md",
                "src",
                "src/nested",
                "src/nested/deep.rs",
                "src/main.rs",
                "A.md",
                "b.txt",
            ]
        );
        assert!(tree.find(".git").is_none());
    }

    #[test]
    fn test_scan_respects_depth() {
        let dir = fixture();
        let tree = FileTree::scan(dir.path(), 1).unwrap();
        assert!(tree.entries().iter().all(|e| e.depth == 0));
        assert!(tree.find("src").is_some_and(|e| e.is_dir));
        assert!(tree.find("src/main.rs").is_none());
    }

    #[test]
    fn test_scan_missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileTree::scan(&dir.path().join("missing"), 2).is_err());
    }

    #[test]
    fn test_filter_regex_and_literal_fallback() {
        let dir = fixture();
        let tree = FileTree::scan(dir.path(), DEFAULT_SCAN_DEPTH).unwrap();

        let rust: Vec<_> = tree.filter(r"\.RS$").iter().map(|e| e.name()).collect();
        assert_eq!(rust, vec!["deep.rs", "main.rs"]);

        // Unbalanced bracket is not a valid pattern: matched literally
        fs::write(dir.path().join("odd[name.txt"), "").unwrap();
        let tree = FileTree::scan(dir.path(), DEFAULT_SCAN_DEPTH).unwrap();
        let odd: Vec<_> = tree.filter("[name").iter().map(|e| e.name()).collect();
        assert_eq!(odd, vec!["odd[name.txt"]);

        assert_eq!(tree.filter("  ").len(), tree.entries().len());
    }

    #[test]
    fn test_read_write_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        write_text(&path, "hello\nworld").unwrap();
        assert_eq!(read_text(&path).unwrap(), "hello\nworld");
        assert!(read_text(&dir.path().join("nope.txt")).is_err());
        assert_eq!(display_name(&path), "notes.txt");
    }
}
