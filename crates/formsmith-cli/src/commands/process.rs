//! The `formsmith process` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use formsmith_core::config::load_config_from;
use formsmith_core::html::allowable_tags;
use formsmith_core::schema::{parse_form, validate_form};

use super::load_submission;

pub fn execute(
    form_path: PathBuf,
    submission_path: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let form = parse_form(&form_path)?;
    for w in validate_form(&form) {
        tracing::warn!(field_id = ?w.field_id, "{}", w.message);
    }

    tracing::debug!(
        allowed_tags = %allowable_tags(&config.allowed_tags),
        "stored assessment markup"
    );

    let submission = load_submission(&submission_path)?;
    let processed = config.pipeline().run(&form, &submission);

    eprintln!(
        "Applied {} change(s) to submission for form {} ({})",
        processed.patch.len(),
        form.id,
        form.title
    );

    let json = serde_json::to_string_pretty(&processed.submission)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write submission to {}", path.display()))?;
            eprintln!("Patched submission saved to: {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
