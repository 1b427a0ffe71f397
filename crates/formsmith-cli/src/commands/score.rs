//! The `formsmith score` command.

use std::path::PathBuf;

use anyhow::Result;

use formsmith_core::schema::parse_form;
use formsmith_core::scoring::score_assessment;
use formsmith_core::submission::extract_answers;

use super::load_submission;

pub fn execute(form_path: PathBuf, submission_path: PathBuf, format: String) -> Result<()> {
    let form = parse_form(&form_path)?;
    let submission = load_submission(&submission_path)?;

    let submitted = extract_answers(&submission);
    let answers: Vec<_> = submitted.iter().map(|s| s.answer.clone()).collect();
    let outcome = score_assessment(&form.questions(), &answers);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        _ => {
            use comfy_table::{Cell, Table};

            println!("Result: {}", outcome.result);
            println!(
                "{} answer(s), {} matched a choice, {} rewritten",
                answers.len(),
                outcome.scored.len(),
                outcome.rewrites().count()
            );

            if outcome.rewrites().next().is_some() {
                let mut table = Table::new();
                table.set_header(vec!["Input", "Question", "Submitted", "Stored"]);
                for scored in outcome.rewrites() {
                    let source = &submitted[scored.index];
                    table.add_row(vec![
                        Cell::new(&source.name),
                        Cell::new(scored.question_id),
                        Cell::new(&source.answer.value),
                        Cell::new(&scored.final_value),
                    ]);
                }
                println!("\n{table}");
            }
        }
    }

    Ok(())
}
