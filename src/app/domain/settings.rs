use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::mindmap::node::{DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, ShapeKind};
use crate::app::infrastructure::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
    SystemDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FontChoice {
    ScreenBold,
    Courier,
    HelveticaMono,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,

    #[serde(default = "default_font")]
    pub font: FontChoice,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Folder shown in the file explorer and used as the Git repository.
    /// `None` means the working directory at start-up.
    #[serde(default)]
    pub workspace_root: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub sidebar_visible: bool,

    #[serde(default = "default_true")]
    pub statusbar_visible: bool,

    /// Seconds between background Git status refreshes. 0 disables them.
    #[serde(default = "default_git_refresh_secs")]
    pub git_refresh_secs: u32,

    #[serde(default = "default_node_width")]
    pub node_width: f64,

    #[serde(default = "default_node_height")]
    pub node_height: f64,

    #[serde(default)]
    pub node_shape: ShapeKind,

    #[serde(default)]
    pub last_mindmap_dir: Option<PathBuf>,
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::SystemDefault
}

fn default_font() -> FontChoice {
    FontChoice::Courier
}

fn default_font_size() -> u32 {
    14
}

fn default_true() -> bool {
    true
}

fn default_git_refresh_secs() -> u32 {
    30
}

fn default_node_width() -> f64 {
    DEFAULT_NODE_WIDTH
}

fn default_node_height() -> f64 {
    DEFAULT_NODE_HEIGHT
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_mode: default_theme_mode(),
            font: default_font(),
            font_size: default_font_size(),
            workspace_root: None,
            sidebar_visible: true,
            statusbar_visible: true,
            git_refresh_secs: default_git_refresh_secs(),
            node_width: default_node_width(),
            node_height: default_node_height(),
            node_shape: ShapeKind::default(),
            last_mindmap_dir: None,
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                // Try to save defaults for next time
                if let Err(e) = default.save_to(config_path) {
                    log::debug!("could not write default settings: {}", e);
                }
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), AppError> {
        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("lingxi");
        path.push("settings.json");
        path
    }

    /// Workspace folder to open, falling back to the current directory.
    pub fn resolved_workspace_root(&self) -> PathBuf {
        self.workspace_root
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
