//! TOML form definition parser.
//!
//! Loads form schemas from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Choice, Field, FieldKind, FormSchema};

/// Intermediate TOML structure for parsing form files.
#[derive(Debug, Deserialize)]
struct TomlFormFile {
    form: TomlFormHeader,
    #[serde(default)]
    fields: Vec<TomlField>,
}

#[derive(Debug, Deserialize)]
struct TomlFormHeader {
    id: u32,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    entry_limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TomlField {
    id: u32,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    choices: Vec<TomlChoice>,
}

#[derive(Debug, Deserialize)]
struct TomlChoice {
    text: String,
    /// Defaults to the text, like a choice list without separate values.
    #[serde(default)]
    value: Option<String>,
}

/// Parse a single TOML file into a `FormSchema`.
pub fn parse_form(path: &Path) -> Result<FormSchema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read form file: {}", path.display()))?;

    parse_form_str(&content, path)
}

/// Parse a TOML string into a `FormSchema` (useful for testing).
pub fn parse_form_str(content: &str, source_path: &Path) -> Result<FormSchema> {
    let parsed: TomlFormFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let fields = parsed
        .fields
        .into_iter()
        .map(|f| {
            let kind: FieldKind = f
                .kind
                .parse()
                .map_err(|e: String| anyhow::anyhow!("field {}: {}", f.id, e))?;

            let choices = f
                .choices
                .into_iter()
                .map(|c| {
                    let value = c.value.unwrap_or_else(|| c.text.clone());
                    Choice::new(c.text, value)
                })
                .collect();

            Ok(Field {
                id: f.id,
                kind,
                label: f.label,
                choices,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(FormSchema {
        id: parsed.form.id,
        title: parsed.form.title,
        description: parsed.form.description,
        entry_limit: parsed.form.entry_limit,
        fields,
    })
}

/// Recursively load all `.toml` form files from a directory.
pub fn load_form_directory(dir: &Path) -> Result<Vec<FormSchema>> {
    let mut forms = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            forms.extend(load_form_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_form(&path) {
                Ok(form) => forms.push(form),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(forms)
}

/// Load a single file or every form under a directory.
pub fn load_forms(path: &Path) -> Result<Vec<FormSchema>> {
    if path.is_dir() {
        load_form_directory(path)
    } else {
        Ok(vec![parse_form(path)?])
    }
}

/// A warning from form validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The field ID (if applicable).
    pub field_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Validate a form for issues that make processing ambiguous.
pub fn validate_form(form: &FormSchema) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for field in &form.fields {
        if !seen_ids.insert(field.id) {
            warnings.push(ValidationWarning {
                field_id: Some(field.id),
                message: format!("duplicate field ID: {}", field.id),
            });
        }
    }

    for field in form.fields.iter().filter(|f| f.kind == FieldKind::Radio) {
        if field.choices.is_empty() {
            warnings.push(ValidationWarning {
                field_id: Some(field.id),
                message: "radio field has no choices".into(),
            });
        }

        let mut seen_values = HashSet::new();
        for choice in &field.choices {
            if !seen_values.insert(choice.value.as_str()) {
                warnings.push(ValidationWarning {
                    field_id: Some(field.id),
                    message: format!(
                        "duplicate choice value {:?}; the first choice wins",
                        choice.value
                    ),
                });
            }
        }
    }

    for kind in [FieldKind::FullName, FieldKind::Assessment] {
        let extra: Vec<u32> = form
            .fields
            .iter()
            .filter(|f| f.kind == kind)
            .skip(1)
            .map(|f| f.id)
            .collect();
        for id in extra {
            warnings.push(ValidationWarning {
                field_id: Some(id),
                message: format!("only the first {kind} field is processed"),
            });
        }
    }

    let has_assessment = form.first_field(FieldKind::Assessment).is_some();
    let scores_anything = form
        .fields
        .iter()
        .any(|f| f.kind == FieldKind::Radio && f.choices.iter().any(Choice::is_text_distinct));
    if has_assessment && !scores_anything {
        warnings.push(ValidationWarning {
            field_id: None,
            message: "assessment field present but no radio choice has a value distinct from its text"
                .into(),
        });
    }

    warnings
}
