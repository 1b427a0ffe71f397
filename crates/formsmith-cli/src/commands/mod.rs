//! Subcommand implementations.

pub mod init;
pub mod parse_name;
pub mod process;
pub mod remaining;
pub mod results;
pub mod score;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use formsmith_core::config::{load_config_from, FormsmithConfig};
use formsmith_core::model::Submission;
use formsmith_core::store::JsonEntryStore;

/// Read a submission JSON file.
pub(crate) fn load_submission(path: &Path) -> Result<Submission> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submission: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse submission JSON: {}", path.display()))
}

/// Load config and open the entry store, letting explicit paths win.
pub(crate) fn open_store(
    forms: Option<PathBuf>,
    entries: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<(JsonEntryStore, FormsmithConfig)> {
    let config = load_config_from(config_path.as_deref())?;
    let forms = forms.unwrap_or_else(|| config.forms_dir.clone());
    let entries = entries.unwrap_or_else(|| config.entries_path.clone());
    let store = JsonEntryStore::load(&forms, &entries)?;
    Ok((store, config))
}
