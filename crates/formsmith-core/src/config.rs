//! formsmith configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::html::DEFAULT_ALLOWED_TAGS;
use crate::results::DEFAULT_RESULTS_ERROR;
use crate::submission::{AssessmentProcessor, FullNameProcessor, PreSubmission};

/// Top-level formsmith configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormsmithConfig {
    /// Directory (or single file) holding form definitions.
    #[serde(default = "default_forms_dir")]
    pub forms_dir: PathBuf,
    /// JSON file holding stored entries.
    #[serde(default = "default_entries_path")]
    pub entries_path: PathBuf,
    /// Message shown when a stored result cannot be displayed.
    #[serde(default = "default_results_error")]
    pub results_error_message: String,
    /// Markup allowed in stored assessment text.
    #[serde(default = "default_allowed_tags")]
    pub allowed_tags: Vec<String>,
    /// Also write prefix, middle and suffix when splitting a full name.
    #[serde(default)]
    pub write_all_name_parts: bool,
}

fn default_forms_dir() -> PathBuf {
    PathBuf::from("./forms")
}
fn default_entries_path() -> PathBuf {
    PathBuf::from("./forms/entries.json")
}
fn default_results_error() -> String {
    DEFAULT_RESULTS_ERROR.to_string()
}
fn default_allowed_tags() -> Vec<String> {
    DEFAULT_ALLOWED_TAGS.iter().map(|t| t.to_string()).collect()
}

impl Default for FormsmithConfig {
    fn default() -> Self {
        Self {
            forms_dir: default_forms_dir(),
            entries_path: default_entries_path(),
            results_error_message: default_results_error(),
            allowed_tags: default_allowed_tags(),
            write_all_name_parts: false,
        }
    }
}

impl FormsmithConfig {
    /// The pre-submission pipeline this configuration describes.
    pub fn pipeline(&self) -> PreSubmission {
        PreSubmission::new(vec![
            Box::new(FullNameProcessor {
                write_all_parts: self.write_all_name_parts,
            }),
            Box::new(AssessmentProcessor {
                allowed_tags: self.allowed_tags.clone(),
            }),
        ])
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when `path` is `None`:
/// 1. `formsmith.toml` in the current directory
/// 2. `~/.config/formsmith/config.toml`
///
/// Environment variable overrides: `FORMSMITH_FORMS_DIR`, `FORMSMITH_ENTRIES`.
pub fn load_config_from(path: Option<&Path>) -> Result<FormsmithConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("formsmith.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<FormsmithConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => FormsmithConfig::default(),
    };

    // Apply env var overrides
    if let Ok(dir) = std::env::var("FORMSMITH_FORMS_DIR") {
        config.forms_dir = PathBuf::from(dir);
    }
    if let Ok(entries) = std::env::var("FORMSMITH_ENTRIES") {
        config.entries_path = PathBuf::from(entries);
    }

    config.forms_dir = resolve_path(&config.forms_dir);
    config.entries_path = resolve_path(&config.entries_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("formsmith"))
}
