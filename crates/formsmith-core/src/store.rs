//! File-backed entry store.
//!
//! Forms come from TOML definitions, entries from a JSON file of the shape
//! `{ "entries": [ { "id": 1, "form_id": 3, "status": "active", "values": {...} } ] }`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Entry, EntryStatus, FormSchema};
use crate::schema::load_forms;
use crate::traits::EntryStore;

#[derive(Debug, Default, Serialize, Deserialize)]
struct EntriesFile {
    #[serde(default)]
    entries: Vec<Entry>,
}

/// In-memory store loaded from form files and an entries JSON file.
#[derive(Debug, Clone, Default)]
pub struct JsonEntryStore {
    forms: HashMap<u32, FormSchema>,
    entries: HashMap<u64, Entry>,
}

impl JsonEntryStore {
    pub fn new(forms: Vec<FormSchema>, entries: Vec<Entry>) -> Self {
        let mut by_form = HashMap::with_capacity(forms.len());
        for form in forms {
            if by_form.contains_key(&form.id) {
                tracing::warn!(form_id = form.id, "duplicate form id, keeping the first");
                continue;
            }
            by_form.insert(form.id, form);
        }

        let mut by_id = HashMap::with_capacity(entries.len());
        for entry in entries {
            if by_id.contains_key(&entry.id) {
                tracing::warn!(entry_id = entry.id, "duplicate entry id, keeping the first");
                continue;
            }
            by_id.insert(entry.id, entry);
        }

        Self {
            forms: by_form,
            entries: by_id,
        }
    }

    /// Load forms from `forms_path` (file or directory) and entries from
    /// `entries_path`. A missing entries file yields an empty store.
    pub fn load(forms_path: &Path, entries_path: &Path) -> Result<Self> {
        let forms = load_forms(forms_path)?;
        let entries = if entries_path.exists() {
            load_entries(entries_path)?
        } else {
            tracing::debug!("no entries file at {}", entries_path.display());
            Vec::new()
        };
        Ok(Self::new(forms, entries))
    }

    pub fn form_count(&self) -> usize {
        self.forms.len()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl EntryStore for JsonEntryStore {
    fn entry(&self, id: u64) -> Option<&Entry> {
        self.entries.get(&id)
    }

    fn form(&self, id: u32) -> Option<&FormSchema> {
        self.forms.get(&id)
    }

    fn active_entry_count(&self, form_id: u32) -> usize {
        self.entries
            .values()
            .filter(|e| e.form_id == form_id && e.status == EntryStatus::Active)
            .count()
    }
}

/// Read entries from a JSON file.
pub fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read entries from {}", path.display()))?;
    let file: EntriesFile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse entries JSON: {}", path.display()))?;
    Ok(file.entries)
}

/// Write entries to a JSON file, creating parent directories.
pub fn save_entries(entries: &[Entry], path: &Path) -> Result<()> {
    let file = EntriesFile {
        entries: entries.to_vec(),
    };
    let json = serde_json::to_string_pretty(&file).context("failed to serialize entries")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write entries to {}", path.display()))?;
    Ok(())
}
