//! The `formsmith validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(form_path: PathBuf) -> Result<()> {
    let forms = formsmith_core::schema::load_forms(&form_path)?;

    let mut total_warnings = 0;

    for form in &forms {
        println!("Form: {} ({} fields)", form.title, form.fields.len());

        let warnings = formsmith_core::schema::validate_form(form);
        for w in &warnings {
            let prefix = w
                .field_id
                .map(|id| format!("  [field {id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All forms valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
