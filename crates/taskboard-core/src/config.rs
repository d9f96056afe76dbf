use crate::user::{Credentials, UserRef};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_COMMENT_DATE_FORMAT: &str = "%-m/%-d/%Y";
const DEFAULT_ASSIGNED_BY: &str = "Manager";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default = "default_comment_date_format")]
    pub comment_date_format: String,
    #[serde(default = "default_assignable_users")]
    pub assignable_users: Vec<UserRef>,
    #[serde(default = "default_assigned_by")]
    pub default_assigned_by: String,
}

fn default_comment_date_format() -> String {
    DEFAULT_COMMENT_DATE_FORMAT.to_string()
}

fn default_assigned_by() -> String {
    DEFAULT_ASSIGNED_BY.to_string()
}

fn default_assignable_users() -> Vec<UserRef> {
    ["A", "B", "C", "D"]
        .iter()
        .enumerate()
        .map(|(i, letter)| UserRef::new((i + 1).to_string(), format!("User {}", letter)))
        .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            credentials: Credentials::default(),
            comment_date_format: default_comment_date_format(),
            assignable_users: default_assignable_users(),
            default_assigned_by: default_assigned_by(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/taskboard/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("taskboard/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("taskboard\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Read a config file, falling back to defaults when it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    /// Board file to use when none is given on the command line.
    pub fn effective_data_file(&self) -> PathBuf {
        if let Some(path) = &self.data_file {
            return path.clone();
        }
        dirs::data_dir()
            .map(|dir| dir.join("taskboard").join("board.json"))
            .unwrap_or_else(|| PathBuf::from("board.json"))
    }

    pub fn find_user(&self, user_id: &str) -> Option<&UserRef> {
        self.assignable_users.iter().find(|u| u.id == user_id)
    }
}
