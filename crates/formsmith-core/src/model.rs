//! Core data model types for formsmith.
//!
//! These are the form, question, answer and entry types that the name
//! parser, the assessment scorer and the submission pipeline share.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One selectable option of a radio question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Human-readable label shown on the form.
    pub text: String,
    /// Value submitted when this option is picked.
    pub value: String,
}

impl Choice {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }

    /// `true` when the label differs from the submitted value.
    pub fn is_text_distinct(&self) -> bool {
        self.text != self.value
    }
}

/// Scoring-relevant kind of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Radio,
    Other,
}

/// A question as seen by the assessment scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub kind: QuestionKind,
    /// Choices in declared order.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn radio(id: u32, choices: Vec<Choice>) -> Self {
        Self {
            id,
            kind: QuestionKind::Radio,
            choices,
        }
    }

    pub fn other(id: u32) -> Self {
        Self {
            id,
            kind: QuestionKind::Other,
            choices: Vec::new(),
        }
    }

    /// First choice whose stored value equals `value`.
    pub fn choice_for(&self, value: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.value == value)
    }
}

/// A value submitted for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u32,
    pub value: String,
}

impl Answer {
    pub fn new(question_id: u32, value: impl Into<String>) -> Self {
        Self {
            question_id,
            value: value.into(),
        }
    }
}

/// Outcome for one answer that matched a radio choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredAnswer {
    /// Position of the source answer in the submitted sequence.
    pub index: usize,
    pub question_id: u32,
    /// Value to store for this answer: the choice text when it differs from
    /// the submitted value, otherwise the submitted value itself.
    pub final_value: String,
    pub text_distinct: bool,
}

/// Field types understood by the submission pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "radio")]
    Radio,
    #[serde(rename = "ac_fullname")]
    FullName,
    #[serde(rename = "assessment")]
    Assessment,
    #[serde(other, rename = "other")]
    Other,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Radio => write!(f, "radio"),
            FieldKind::FullName => write!(f, "ac_fullname"),
            FieldKind::Assessment => write!(f, "assessment"),
            FieldKind::Other => write!(f, "other"),
        }
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "radio" => Ok(FieldKind::Radio),
            "ac_fullname" | "fullname" => Ok(FieldKind::FullName),
            "assessment" => Ok(FieldKind::Assessment),
            "" => Err("empty field type".to_string()),
            _ => Ok(FieldKind::Other),
        }
    }
}

/// A field on a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl From<&Field> for Question {
    fn from(field: &Field) -> Self {
        match field.kind {
            FieldKind::Radio => Question::radio(field.id, field.choices.clone()),
            _ => Question::other(field.id),
        }
    }
}

/// A form definition: fields in display order plus form-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSchema {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Maximum number of active entries; `None` or zero means unlimited.
    #[serde(default)]
    pub entry_limit: Option<u64>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl FormSchema {
    /// All fields as scorer questions, in display order.
    pub fn questions(&self) -> Vec<Question> {
        self.fields.iter().map(Question::from).collect()
    }

    /// First field of the given kind.
    pub fn first_field(&self, kind: FieldKind) -> Option<&Field> {
        self.fields.iter().find(|f| f.kind == kind)
    }

    pub fn field(&self, id: u32) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// The entry limit, with zero treated as unlimited.
    pub fn effective_entry_limit(&self) -> Option<u64> {
        self.entry_limit.filter(|&limit| limit > 0)
    }
}

/// One named value of a submission, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionField {
    pub name: String,
    pub value: String,
}

/// Raw submitted key/value pairs for one form instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub form_id: u32,
    #[serde(default)]
    pub fields: Vec<SubmissionField>,
}

impl Submission {
    pub fn new(form_id: u32) -> Self {
        Self {
            form_id,
            fields: Vec::new(),
        }
    }

    /// Builder-style push of a named value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(SubmissionField {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Overwrite the value under `name`, appending it if absent.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => field.value = value,
            None => self.fields.push(SubmissionField {
                name: name.to_string(),
                value,
            }),
        }
    }
}

/// Lifecycle status of a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Active,
    Spam,
    Trash,
}

/// A persisted submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: u64,
    pub form_id: u32,
    #[serde(default)]
    pub status: EntryStatus,
    /// Stored values keyed by field id (`"9"`) or sub-input id (`"1.3"`).
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl Entry {
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
