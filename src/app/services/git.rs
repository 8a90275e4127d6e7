//! Thin wrapper over the `git` executable.
//!
//! Every operation runs `git` with the repository as working directory and
//! returns its standard output, or [`AppError::Git`] carrying the standard
//! error text when the command fails.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::app::infrastructure::error::{AppError, Result};

/// Message used when a commit is requested without one.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update code";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Staged,
    Modified,
    Untracked,
}

impl FileState {
    pub fn label(self) -> &'static str {
        match self {
            FileState::Staged => "[Staged]",
            FileState::Modified => "[Modified]",
            FileState::Untracked => "[Untracked]",
        }
    }
}

/// Working tree state grouped the way the Git panel lists it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStatus {
    pub staged: Vec<String>,
    pub modified: Vec<String>,
    pub untracked: Vec<String>,
}

impl FileStatus {
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.modified.is_empty() && self.untracked.is_empty()
    }

    /// Staged files first, then modified, then untracked.
    pub fn entries(&self) -> impl Iterator<Item = (FileState, &str)> {
        self.staged
            .iter()
            .map(|p| (FileState::Staged, p.as_str()))
            .chain(self.modified.iter().map(|p| (FileState::Modified, p.as_str())))
            .chain(self.untracked.iter().map(|p| (FileState::Untracked, p.as_str())))
    }
}

/// Parse `git status --porcelain=v1 -z` output.
///
/// Records are NUL separated and paths are verbatim. A rename or copy is
/// followed by one extra record holding the source path, which is skipped.
pub fn parse_porcelain(output: &str) -> FileStatus {
    let mut status = FileStatus::default();
    let mut records = output.split('\0');
    while let Some(record) = records.next() {
        let (Some(code), Some(path)) = (record.get(..2), record.get(3..)) else {
            continue;
        };
        let mut chars = code.chars();
        let (index, worktree) = (chars.next().unwrap_or(' '), chars.next().unwrap_or(' '));
        if matches!(index, 'R' | 'C') {
            records.next();
        }
        if path.is_empty() {
            continue;
        }
        let path = path.to_string();

        match code {
            "??" => status.untracked.push(path),
            "!!" => {}
            // Unmerged: both sides touched the file
            "DD" | "AA" => status.modified.push(path),
            _ if index == 'U' || worktree == 'U' => status.modified.push(path),
            _ => {
                if matches!(index, 'M' | 'A' | 'D' | 'R' | 'C' | 'T') {
                    status.staged.push(path.clone());
                }
                if matches!(worktree, 'M' | 'D' | 'T') {
                    status.modified.push(path);
                }
            }
        }
    }
    status
}

#[derive(Debug, Clone)]
pub struct GitClient {
    repo: PathBuf,
}

impl GitClient {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Whether a `git` executable can be started at all.
    pub fn is_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .is_ok_and(|out| out.status.success())
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        log::debug!("git {} (in {})", args.join(" "), self.repo.display());
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo)
            // Never block the UI on a credential prompt
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| AppError::Git(format!("failed to run git: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            return Ok(stdout);
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let detail = if stderr.is_empty() { stdout.trim().to_string() } else { stderr };
        let command = args.iter().find(|a| !a.starts_with('-') && !a.contains('=')).unwrap_or(&"");
        Err(AppError::Git(format!("git {} failed: {}", command, detail)))
    }

    pub fn is_repo(&self) -> bool {
        self.run(&["rev-parse", "--is-inside-work-tree"])
            .is_ok_and(|out| out.trim() == "true")
    }

    pub fn init(&self) -> Result<String> {
        self.run(&["init"])
    }

    /// Human readable `git status`.
    pub fn status(&self) -> Result<String> {
        self.run(&["status"])
    }

    pub fn status_entries(&self) -> Result<FileStatus> {
        let out = self.run(&[
            "-c",
            "core.quotePath=false",
            "status",
            "--porcelain=v1",
            "-z",
            "--untracked-files=all",
        ])?;
        Ok(parse_porcelain(&out))
    }

    pub fn stage_all(&self) -> Result<String> {
        self.run(&["add", "."])
    }

    /// Commit staged changes. An empty message becomes [`DEFAULT_COMMIT_MESSAGE`].
    pub fn commit(&self, message: &str) -> Result<String> {
        let message = match message.trim() {
            "" => DEFAULT_COMMIT_MESSAGE,
            m => m,
        };
        self.run(&["commit", "-m", message])
    }

    pub fn push(&self) -> Result<String> {
        self.run(&["push"])
    }

    pub fn pull(&self) -> Result<String> {
        self.run(&["pull"])
    }

    pub fn branches(&self) -> Result<String> {
        self.run(&["branch", "--list"])
    }

    /// Name of the checked out branch, also on a branch with no commits yet.
    pub fn current_branch(&self) -> Result<String> {
        Ok(self.run(&["symbolic-ref", "--short", "HEAD"])?.trim().to_string())
    }

    pub fn log(&self) -> Result<String> {
        self.run(&["log", "--oneline", "--graph", "--decorate", "--all", "-n", "10"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Fresh repository with an identity configured, or `None` when git is
    /// not installed.
    fn scratch_repo() -> Option<(tempfile::TempDir, GitClient)> {
        if !GitClient::is_available() {
            eprintln!("git not available, skipping");
            return None;
        }
        let dir = tempfile::tempdir().unwrap();
        let client = GitClient::new(dir.path());
        client.init().unwrap();
        client.run(&["config", "user.email", "dev@example.com"]).unwrap();
        client.run(&["config", "user.name", "Dev"]).unwrap();
        client.run(&["config", "commit.gpgsign", "false"]).unwrap();
        Some((dir, client))
    }

    #[test]
    fn test_parse_porcelain() {
        let out = "M  staged.rs\0 M changed.rs\0MM both.rs\0A  new.rs\0?? fresh.txt\0R  renamed.rs\0old.rs\0!! ignored.log\0";
        let status = parse_porcelain(out);
        assert_eq!(status.staged, vec!["staged.rs", "both.rs", "new.rs", "renamed.rs"]);
        assert_eq!(status.modified, vec!["changed.rs", "both.rs"]);
        assert_eq!(status.untracked, vec!["fresh.txt"]);

        let labels: Vec<_> = status.entries().map(|(s, _)| s.label()).collect();
        assert_eq!(labels.first(), Some(&"[Staged]"));
        assert_eq!(labels.last(), Some(&"[Untracked]"));
        assert!(parse_porcelain("").is_clean());
    }

    #[test]
    fn test_parse_porcelain_unmerged_and_spaces() {
        let out = "UU conflict.rs\0AA both added.rs\0DU gone.rs\0?? my notes.txt\0";
        let status = parse_porcelain(out);
        assert!(!status.is_clean());
        assert!(status.staged.is_empty());
        assert_eq!(status.modified, vec!["conflict.rs", "both added.rs", "gone.rs"]);
        assert_eq!(status.untracked, vec!["my notes.txt"]);
    }

    #[test]
    fn test_status_keeps_non_ascii_names() {
        let Some((dir, client)) = scratch_repo() else {
            return;
        };
        fs::write(dir.path().join("中文.txt"), "内容").unwrap();
        fs::write(dir.path().join("my notes.txt"), "x").unwrap();

        let mut untracked = client.status_entries().unwrap().untracked;
        untracked.sort();
        assert_eq!(untracked, vec!["my notes.txt", "中文.txt"]);

        client.stage_all().unwrap();
        let status = client.status_entries().unwrap();
        assert!(status.staged.iter().any(|p| p == "中文.txt"));
    }

    #[test]
    fn test_not_a_repository() {
        if !GitClient::is_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let client = GitClient::new(dir.path());
        assert!(!client.is_repo());
        assert!(matches!(client.status(), Err(AppError::Git(_))));
    }

    #[test]
    fn test_stage_and_commit_flow() {
        let Some((dir, client)) = scratch_repo() else {
            return;
        };
        assert!(client.is_repo());
        fs::write(dir.path().join("hello.txt"), "hi").unwrap();

        let status = client.status_entries().unwrap();
        assert_eq!(status.untracked, vec!["hello.txt"]);

        client.stage_all().unwrap();
        let status = client.status_entries().unwrap();
        assert_eq!(status.staged, vec!["hello.txt"]);

        client.commit("   ").unwrap();
        assert!(client.status_entries().unwrap().is_clean());
        assert!(client.log().unwrap().contains(DEFAULT_COMMIT_MESSAGE));
        assert!(!client.current_branch().unwrap().is_empty());
    }

    #[test]
    fn test_commit_with_nothing_staged_fails() {
        let Some((_dir, client)) = scratch_repo() else {
            return;
        };
        assert!(matches!(client.commit("empty"), Err(AppError::Git(_))));
    }
}
