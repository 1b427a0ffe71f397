//! The `formsmith results` command.

use std::path::PathBuf;

use anyhow::Result;

use formsmith_core::results::render_assessment_result;

use super::open_store;

pub fn execute(
    entry_id: Option<String>,
    forms: Option<PathBuf>,
    entries: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (store, config) = open_store(forms, entries, config_path)?;

    println!(
        "{}",
        render_assessment_result(&store, entry_id.as_deref(), &config.results_error_message)
    );

    Ok(())
}
