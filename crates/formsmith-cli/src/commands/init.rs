//! The `formsmith init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create formsmith.toml
    if std::path::Path::new("formsmith.toml").exists() {
        println!("formsmith.toml already exists, skipping.");
    } else {
        std::fs::write("formsmith.toml", SAMPLE_CONFIG)?;
        println!("Created formsmith.toml");
    }

    // Create example form
    std::fs::create_dir_all("forms")?;
    let example_path = std::path::Path::new("forms/example.toml");
    if example_path.exists() {
        println!("forms/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_FORM)?;
        println!("Created forms/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit forms/example.toml with your questions and response texts");
    println!("  2. Run: formsmith validate --form forms/example.toml");
    println!("  3. Run: formsmith process --form forms/example.toml --submission submission.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r##"# formsmith configuration

forms_dir = "./forms"
entries_path = "./forms/entries.json"

results_error_message = 'Oops! There was a problem displaying your results.<br/> Please let us know that this happened by <a class="open-popup-link" href="#contact-popup">sending us a message.</a>'

# Markup kept in stored assessment text
allowed_tags = ["div", "h1", "h2", "h3", "ul", "ol", "li", "p", "a", "strong", "em"]

# Also fill prefix, middle and suffix inputs when splitting a full name
write_all_name_parts = false
"##;

const EXAMPLE_FORM: &str = r#"[form]
id = 1
title = "Example Assessment"
description = "Two questions and a result field"

[[fields]]
id = 1
type = "ac_fullname"
label = "Your name"

[[fields]]
id = 2
type = "radio"
label = "How soon do you want to start?"

[[fields.choices]]
text = "Right away"
value = "<p>You are ready to start.</p>"

[[fields.choices]]
text = "Later"
value = "<p>Take your time and come back when ready.</p>"

[[fields]]
id = 3
type = "radio"
label = "Have you done this before?"

[[fields.choices]]
text = "Yes"
value = "<p>Skip the introduction.</p>"

[[fields.choices]]
text = "No"

[[fields]]
id = 4
type = "assessment"
label = "Result"
"#;
