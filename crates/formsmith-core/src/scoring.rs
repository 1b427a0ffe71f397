//! Assessment scoring.
//!
//! Cross-references submitted answers with the choice lists of a form's
//! radio questions. Every answer whose matched choice carries a label
//! different from its value contributes its raw value to the result text
//! and has its stored value replaced by that label.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Answer, Question, QuestionKind, ScoredAnswer};

/// Result of scoring one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    /// Raw values of all distinct-choice answers, concatenated in submission
    /// order with no separator.
    pub result: String,
    /// Every answer that matched a radio choice, in submission order.
    pub scored: Vec<ScoredAnswer>,
}

impl AssessmentOutcome {
    /// Answers whose stored value must be replaced by the choice text.
    pub fn rewrites(&self) -> impl Iterator<Item = &ScoredAnswer> {
        self.scored.iter().filter(|s| s.text_distinct)
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

/// Score `answers` against `questions`.
///
/// Answers referencing an unknown question, a non-radio question, or a value
/// that matches none of the question's choices are skipped. When several
/// choices share a value the first one in declared order wins. When
/// several questions share an id the first one in display order wins.
pub fn score_assessment(questions: &[Question], answers: &[Answer]) -> AssessmentOutcome {
    let mut by_id: HashMap<u32, &Question> = HashMap::with_capacity(questions.len());
    for question in questions {
        by_id.entry(question.id).or_insert(question);
    }

    let mut outcome = AssessmentOutcome::default();

    for (index, answer) in answers.iter().enumerate() {
        let Some(question) = by_id.get(&answer.question_id) else {
            tracing::debug!(question_id = answer.question_id, "answer has no question");
            continue;
        };

        if question.kind != QuestionKind::Radio {
            continue;
        }

        let Some(choice) = question.choice_for(&answer.value) else {
            tracing::debug!(
                question_id = answer.question_id,
                "answer value matches no choice"
            );
            continue;
        };

        let text_distinct = choice.is_text_distinct();
        let final_value = if text_distinct {
            outcome.result.push_str(&answer.value);
            choice.text.clone()
        } else {
            answer.value.clone()
        };

        outcome.scored.push(ScoredAnswer {
            index,
            question_id: answer.question_id,
            final_value,
            text_distinct,
        });
    }

    outcome
}
