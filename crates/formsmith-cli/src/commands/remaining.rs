//! The `formsmith remaining` command.

use std::path::PathBuf;

use anyhow::Result;

use formsmith_core::results::{store_entries_remaining, NumberFormat};

use super::open_store;

pub fn execute(
    form_id: u32,
    number_format: Option<String>,
    forms: Option<PathBuf>,
    entries: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let format = number_format
        .map(|f| f.parse::<NumberFormat>().map_err(|e| anyhow::anyhow!(e)))
        .transpose()?;

    let (store, _) = open_store(forms, entries, config_path)?;

    // Unknown forms and unlimited forms both print an empty line.
    println!(
        "{}",
        store_entries_remaining(&store, form_id, format).unwrap_or_default()
    );

    Ok(())
}
