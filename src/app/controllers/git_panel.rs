use std::path::{Path, PathBuf};

use crate::app::services::git::{FileStatus, GitClient};

/// Lines kept in the output log before the oldest are dropped.
const MAX_OUTPUT_LINES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitOp {
    Init,
    Status,
    StageAll,
    Commit(String),
    Push,
    Pull,
    Branches,
    Log,
}

impl GitOp {
    fn command_line(&self) -> String {
        match self {
            GitOp::Init => "git init".into(),
            GitOp::Status => "git status".into(),
            GitOp::StageAll => "git add .".into(),
            GitOp::Commit(message) => format!("git commit -m \"{}\"", message.trim()),
            GitOp::Push => "git push".into(),
            GitOp::Pull => "git pull".into(),
            GitOp::Branches => "git branch".into(),
            GitOp::Log => "git log --oneline --graph --decorate --all -n 10".into(),
        }
    }

    /// Operations after which the file list is refreshed.
    fn changes_tree(&self) -> bool {
        matches!(
            self,
            GitOp::Init | GitOp::Status | GitOp::StageAll | GitOp::Commit(_) | GitOp::Pull
        )
    }
}

/// Everything the Git panel shows, independent of the widgets.
#[derive(Debug, Default)]
pub struct GitPanelState {
    client: Option<GitClient>,
    branch: Option<String>,
    output: Vec<String>,
    status: FileStatus,
    busy: bool,
}

impl GitPanelState {
    pub fn new(repo: Option<PathBuf>) -> Self {
        let mut state = Self::default();
        if let Some(repo) = repo {
            state.set_repo(repo);
        }
        state
    }

    pub fn set_repo(&mut self, repo: PathBuf) {
        let name = repo
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| repo.display().to_string());
        self.client = Some(GitClient::new(repo));
        self.log(format!("Repository: {name}"));
        self.refresh();
    }

    pub fn repo(&self) -> Option<&Path> {
        self.client.as_ref().map(|c| c.repo())
    }

    pub fn branch_label(&self) -> String {
        match (&self.client, &self.branch) {
            (None, _) => "Branch: not selected".to_string(),
            (Some(_), Some(branch)) => format!("Branch: {branch}"),
            (Some(_), None) => "Branch: unknown".to_string(),
        }
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn status(&self) -> &FileStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    fn log(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.output.extend(text.lines().map(str::to_string));
        if self.output.len() > MAX_OUTPUT_LINES {
            let excess = self.output.len() - MAX_OUTPUT_LINES;
            self.output.drain(..excess);
        }
    }

    /// Run one Git operation, logging its output or error. Returns whether
    /// it succeeded.
    pub fn run(&mut self, op: GitOp) -> bool {
        let Some(client) = self.client.clone() else {
            self.log("Error: no repository selected");
            return false;
        };

        let is_repo = client.is_repo();
        if op == GitOp::Init && is_repo {
            self.log("This folder is already a Git repository");
            return true;
        }
        if op != GitOp::Init && !is_repo {
            self.log("Error: this folder is not a Git repository");
            return false;
        }

        self.busy = true;
        self.log(format!("$ {}", op.command_line()));
        let result = match &op {
            GitOp::Init => client.init(),
            GitOp::Status => client.status(),
            GitOp::StageAll => client.stage_all().map(|_| "Files added to the staging area".to_string()),
            GitOp::Commit(message) => client.commit(message),
            GitOp::Push => client.push(),
            GitOp::Pull => client.pull(),
            GitOp::Branches => client.branches(),
            GitOp::Log => client.log(),
        };

        let ok = match result {
            Ok(out) => {
                if !out.trim().is_empty() {
                    self.log(out.trim_end().to_string());
                }
                true
            }
            Err(e) => {
                log::warn!("{}", e);
                self.log(e.to_string());
                false
            }
        };

        if op.changes_tree() {
            self.refresh();
        }
        self.busy = false;
        ok
    }

    /// Periodic refresh of branch and file list. Skipped while an operation
    /// is running or when there is no repository.
    pub fn auto_refresh(&mut self) -> bool {
        if self.busy {
            return false;
        }
        let is_repo = self.client.as_ref().is_some_and(|c| c.is_repo());
        if !is_repo {
            return false;
        }
        self.refresh();
        true
    }

    fn refresh(&mut self) {
        let Some(client) = &self.client else {
            return;
        };
        if !client.is_repo() {
            self.branch = None;
            self.status = FileStatus::default();
            return;
        }
        self.branch = client.current_branch().ok();
        self.status = match client.status_entries() {
            Ok(status) => status,
            Err(e) => {
                log::debug!("status refresh failed: {}", e);
                FileStatus::default()
            }
        };
    }
}
