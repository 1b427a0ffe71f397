//! Pre-submission processing.
//!
//! Turns a raw [`Submission`] plus its [`FormSchema`] into a patch: the
//! full-name field gets its first/last inputs filled from the parsed full
//! name, and the assessment field gets the scored result text while radio
//! answers are swapped to their choice labels.

use serde::{Deserialize, Serialize};

use crate::html::{strip_tags, DEFAULT_ALLOWED_TAGS};
use crate::model::{Answer, Field, FieldKind, FormSchema, Submission};
use crate::name::parse_name;
use crate::scoring::score_assessment;
use crate::traits::SubmissionProcessor;

/// Prefix token shared by all answer keys (`input_<id>`).
const INPUT_TOKEN: &str = "input";

/// One change to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchOp {
    pub name: String,
    pub value: String,
}

/// Ordered set of changes produced by processors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPatch {
    pub ops: Vec<PatchOp>,
}

impl SubmissionPatch {
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.ops.push(PatchOp {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Apply every op in order; later ops win.
    pub fn apply_to(&self, submission: &mut Submission) {
        for op in &self.ops {
            submission.set(&op.name, op.value.as_str());
        }
    }

    pub fn extend(&mut self, other: SubmissionPatch) {
        self.ops.extend(other.ops);
    }
}

/// An answer together with the submission key it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedAnswer {
    pub name: String,
    pub answer: Answer,
}

/// Collect answers from `input_<fieldId>` keys, in submission order.
///
/// Keys addressing a sub-input (`input_7_3`) or carrying anything but a
/// plain numeric id (`input_+2`, `input_02`) are not answers.
pub fn extract_answers(submission: &Submission) -> Vec<SubmittedAnswer> {
    submission
        .fields
        .iter()
        .filter_map(|field| {
            let (token, id) = field.name.split_once('_')?;
            if token != INPUT_TOKEN {
                return None;
            }
            let question_id = parse_field_id(id)?;
            Some(SubmittedAnswer {
                name: field.name.clone(),
                answer: Answer::new(question_id, field.value.as_str()),
            })
        })
        .collect()
}

/// A field id written as plain digits with no sign or leading zero.
fn parse_field_id(s: &str) -> Option<u32> {
    if s.is_empty() || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Key of a field's main input.
pub fn input_key(field_id: u32) -> String {
    format!("{INPUT_TOKEN}_{field_id}")
}

/// Key of one sub-input of a multi-input field.
pub fn sub_input_key(field_id: u32, sub: u32) -> String {
    format!("{INPUT_TOKEN}_{field_id}_{sub}")
}

// ---------------------------------------------------------------------------
// Full-name processor
// ---------------------------------------------------------------------------

const NAME_PREFIX: u32 = 2;
const NAME_FIRST: u32 = 3;
const NAME_MIDDLE: u32 = 4;
const NAME_LAST: u32 = 6;
const NAME_SUFFIX: u32 = 8;
const NAME_FULL: u32 = 9;

/// Splits the free-text full-name input into the first/last name inputs.
#[derive(Debug, Clone, Default)]
pub struct FullNameProcessor {
    /// Also write prefix, middle and suffix inputs.
    pub write_all_parts: bool,
}

impl SubmissionProcessor for FullNameProcessor {
    fn name(&self) -> &str {
        "full-name"
    }

    fn field_kind(&self) -> FieldKind {
        FieldKind::FullName
    }

    fn process(&self, _form: &FormSchema, field: &Field, submission: &Submission) -> SubmissionPatch {
        let mut patch = SubmissionPatch::default();

        let Some(full) = submission.get(&sub_input_key(field.id, NAME_FULL)) else {
            tracing::debug!(field_id = field.id, "no full-name input submitted");
            return patch;
        };

        let parsed = parse_name(full);
        patch.set(sub_input_key(field.id, NAME_FIRST), parsed.first.as_str());
        patch.set(sub_input_key(field.id, NAME_LAST), parsed.last.as_str());

        if self.write_all_parts {
            patch.set(sub_input_key(field.id, NAME_PREFIX), parsed.prefix);
            patch.set(sub_input_key(field.id, NAME_MIDDLE), parsed.middle);
            patch.set(sub_input_key(field.id, NAME_SUFFIX), parsed.suffix);
        }

        patch
    }
}

// ---------------------------------------------------------------------------
// Assessment processor
// ---------------------------------------------------------------------------

/// Scores radio answers into the hidden assessment field.
#[derive(Debug, Clone)]
pub struct AssessmentProcessor {
    /// Markup allowed to survive in the stored result text.
    pub allowed_tags: Vec<String>,
}

impl Default for AssessmentProcessor {
    fn default() -> Self {
        Self {
            allowed_tags: DEFAULT_ALLOWED_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl SubmissionProcessor for AssessmentProcessor {
    fn name(&self) -> &str {
        "assessment"
    }

    fn field_kind(&self) -> FieldKind {
        FieldKind::Assessment
    }

    fn process(&self, form: &FormSchema, field: &Field, submission: &Submission) -> SubmissionPatch {
        let submitted = extract_answers(submission);
        let answers: Vec<Answer> = submitted.iter().map(|s| s.answer.clone()).collect();
        let outcome = score_assessment(&form.questions(), &answers);

        let mut patch = SubmissionPatch::default();
        for scored in outcome.rewrites() {
            patch.set(submitted[scored.index].name.as_str(), scored.final_value.as_str());
        }

        tracing::debug!(
            form_id = form.id,
            answers = answers.len(),
            rewrites = patch.len(),
            "assessment scored"
        );

        patch.set(
            input_key(field.id),
            strip_tags(&outcome.result, &self.allowed_tags),
        );
        patch
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// A submission after all processors ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedSubmission {
    pub submission: Submission,
    pub patch: SubmissionPatch,
}

/// Ordered list of processors run before a submission is stored.
pub struct PreSubmission {
    processors: Vec<Box<dyn SubmissionProcessor>>,
}

impl Default for PreSubmission {
    /// Full name first, then assessment.
    fn default() -> Self {
        Self::new(vec![
            Box::new(FullNameProcessor::default()),
            Box::new(AssessmentProcessor::default()),
        ])
    }
}

impl PreSubmission {
    pub fn new(processors: Vec<Box<dyn SubmissionProcessor>>) -> Self {
        Self { processors }
    }

    /// Run every processor whose field kind is present on `form`.
    ///
    /// Each processor sees the submission as patched by the ones before it.
    pub fn run(&self, form: &FormSchema, submission: &Submission) -> ProcessedSubmission {
        if submission.form_id != 0 && submission.form_id != form.id {
            tracing::warn!(
                submission_form = submission.form_id,
                form = form.id,
                "submission belongs to a different form"
            );
        }

        let mut current = submission.clone();
        let mut combined = SubmissionPatch::default();

        for processor in &self.processors {
            let Some(field) = form.first_field(processor.field_kind()) else {
                continue;
            };
            let patch = processor.process(form, field, &current);
            tracing::debug!(
                processor = processor.name(),
                field_id = field.id,
                ops = patch.len(),
                "processor finished"
            );
            patch.apply_to(&mut current);
            combined.extend(patch);
        }

        ProcessedSubmission {
            submission: current,
            patch: combined,
        }
    }
}
