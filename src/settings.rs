use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::constants::{
    BASE_URL_ENV_VAR, DEFAULT_BASE_URL, DEFAULT_FEATURED_POSTS, DEFAULT_PAGE_SIZE,
    DEFAULT_RELATED_POSTS, HTTP_TIMEOUT_SECS, USER_AGENT,
};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: HTTP_TIMEOUT_SECS,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    pub page_size: u32,
    pub featured_posts: u32,
    pub related_posts: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            featured_posts: DEFAULT_FEATURED_POSTS,
            related_posts: DEFAULT_RELATED_POSTS,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub display: DisplaySettings,
}

impl Settings {
    pub fn load(settings_file: &str) -> Result<Self> {
        let path = Path::new(settings_file);
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "settings.json not found at '{}'",
                settings_file
            ));
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", settings_file))?;

        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", settings_file))?;

        info!("Settings loaded from '{}'.", settings_file);
        Ok(settings)
    }

    /// Settings from `explicit` if given, else from the user config directory if a
    /// file exists there, else the built-in defaults. The origin may then be
    /// overridden by the environment.
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        let mut settings = match explicit {
            Some(path) => Self::load(path)?,
            None => match default_settings_path().filter(|p| p.exists()) {
                Some(path) => Self::load(&path.to_string_lossy())?,
                None => {
                    debug!("No settings file found, using defaults");
                    Settings::default()
                }
            },
        };

        if let Ok(base_url) = std::env::var(BASE_URL_ENV_VAR) {
            settings.apply_base_url_override(&base_url);
        }

        Ok(settings)
    }

    pub fn apply_base_url_override(&mut self, base_url: &str) {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return;
        }
        info!("Using API origin {}", base_url);
        self.api.base_url = base_url.to_string();
    }
}

pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("blogview").join(SETTINGS_FILE))
}
