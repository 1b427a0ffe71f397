//! Read side: stored assessment results and entry limits.

use std::fmt;
use std::str::FromStr;

use crate::error::LookupError;
use crate::model::{EntryStatus, FieldKind, FormSchema};
use crate::traits::EntryStore;

/// Shown to visitors whenever a stored result cannot be displayed.
pub const DEFAULT_RESULTS_ERROR: &str = "Oops! There was a problem displaying your results.<br/> \
     Please let us know that this happened by \
     <a class=\"open-popup-link\" href=\"#contact-popup\">sending us a message.</a>";

/// Look up the assessment result stored for `entry_id`.
///
/// `entry_id` is taken as supplied by the visitor (e.g. a query string
/// value), so it may be absent or malformed.
pub fn assessment_result<S: EntryStore + ?Sized>(
    store: &S,
    entry_id: Option<&str>,
) -> Result<String, LookupError> {
    let raw = entry_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(LookupError::MissingEntryId)?;
    let id = raw
        .parse::<u64>()
        .ok()
        .filter(|&id| id > 0)
        .ok_or_else(|| LookupError::InvalidEntryId(raw.to_string()))?;

    let entry = store.entry(id).ok_or(LookupError::EntryNotFound(id))?;
    if entry.status == EntryStatus::Trash {
        return Err(LookupError::EntryTrashed(id));
    }

    let form = store
        .form(entry.form_id)
        .ok_or(LookupError::FormNotFound {
            entry_id: id,
            form_id: entry.form_id,
        })?;

    form.first_field(FieldKind::Assessment)
        .and_then(|field| entry.value(&field.id.to_string()))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(LookupError::NoResult(id))
}

/// The stored result for `entry_id`, or `error_message` if there is none.
pub fn render_assessment_result<S: EntryStore + ?Sized>(
    store: &S,
    entry_id: Option<&str>,
    error_message: &str,
) -> String {
    match assessment_result(store, entry_id) {
        Ok(result) => result,
        Err(e) => {
            tracing::info!(
                error = %e,
                entry_id = ?e.entry_id(),
                bad_request = e.is_bad_request(),
                "assessment result unavailable"
            );
            error_message.to_string()
        }
    }
}

/// Thousands separator for [`entries_remaining`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// `1,234`
    Comma,
    /// `1.234`
    Decimal,
}

impl NumberFormat {
    fn separator(self) -> char {
        match self {
            NumberFormat::Comma => ',',
            NumberFormat::Decimal => '.',
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberFormat::Comma => write!(f, "comma"),
            NumberFormat::Decimal => write!(f, "decimal"),
        }
    }
}

impl FromStr for NumberFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "comma" | "," => Ok(NumberFormat::Comma),
            "decimal" | "." => Ok(NumberFormat::Decimal),
            other => Err(format!("unknown number format: {other}")),
        }
    }
}

/// How many more entries `form` accepts, given its active entry count.
///
/// `None` when the form has no entry limit. Never negative: a full or
/// over-full form reports `"0"`.
pub fn entries_remaining(
    form: &FormSchema,
    active_count: usize,
    format: Option<NumberFormat>,
) -> Option<String> {
    let limit = form.effective_entry_limit()?;
    let left = limit.saturating_sub(active_count as u64);

    if left == 0 {
        return Some("0".to_string());
    }

    Some(match format {
        Some(f) => group_thousands(left, f.separator()),
        None => left.to_string(),
    })
}

/// [`entries_remaining`] for a form looked up in `store`.
pub fn store_entries_remaining<S: EntryStore + ?Sized>(
    store: &S,
    form_id: u32,
    format: Option<NumberFormat>,
) -> Option<String> {
    let form = store.form(form_id)?;
    entries_remaining(form, store.active_entry_count(form_id), format)
}

fn group_thousands(n: u64, separator: char) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entry, Field};
    use crate::store::JsonEntryStore;

    fn form(id: u32, limit: Option<u64>) -> FormSchema {
        FormSchema {
            id,
            title: format!("Form {id}"),
            description: String::new(),
            entry_limit: limit,
            fields: vec![
                Field {
                    id: 2,
                    kind: FieldKind::Radio,
                    label: String::new(),
                    choices: vec![],
                },
                Field {
                    id: 7,
                    kind: FieldKind::Assessment,
                    label: String::new(),
                    choices: vec![],
                },
            ],
        }
    }

    fn entry(id: u64, form_id: u32, status: EntryStatus, result: &str) -> Entry {
        Entry {
            id,
            form_id,
            status,
            values: [("2".to_string(), "Ready".to_string()), ("7".to_string(), result.to_string())]
                .into_iter()
                .collect(),
        }
    }

    fn store() -> JsonEntryStore {
        JsonEntryStore::new(
            vec![form(1, Some(3))],
            vec![
                entry(10, 1, EntryStatus::Active, "<p>Start now.</p>"),
                entry(11, 1, EntryStatus::Trash, "<p>Gone.</p>"),
                entry(12, 1, EntryStatus::Active, ""),
                entry(13, 99, EntryStatus::Active, "orphan"),
                entry(14, 1, EntryStatus::Spam, "spam result"),
            ],
        )
    }

    #[test]
    fn finds_stored_result() {
        assert_eq!(
            assessment_result(&store(), Some("10")).unwrap(),
            "<p>Start now.</p>"
        );
        assert_eq!(
            assessment_result(&store(), Some(" 10 ")).unwrap(),
            "<p>Start now.</p>"
        );
    }

    #[test]
    fn lookup_failures() {
        let s = store();
        assert_eq!(assessment_result(&s, None), Err(LookupError::MissingEntryId));
        assert_eq!(assessment_result(&s, Some("")), Err(LookupError::MissingEntryId));
        assert_eq!(
            assessment_result(&s, Some("abc")),
            Err(LookupError::InvalidEntryId("abc".into()))
        );
        assert_eq!(
            assessment_result(&s, Some("0")),
            Err(LookupError::InvalidEntryId("0".into()))
        );
        assert_eq!(assessment_result(&s, Some("404")), Err(LookupError::EntryNotFound(404)));
        assert_eq!(assessment_result(&s, Some("11")), Err(LookupError::EntryTrashed(11)));
        assert_eq!(assessment_result(&s, Some("12")), Err(LookupError::NoResult(12)));
        assert_eq!(
            assessment_result(&s, Some("13")),
            Err(LookupError::FormNotFound {
                entry_id: 13,
                form_id: 99
            })
        );
    }

    #[test]
    fn zero_is_a_displayable_result() {
        let s = JsonEntryStore::new(
            vec![form(1, None)],
            vec![entry(20, 1, EntryStatus::Active, "0")],
        );
        assert_eq!(assessment_result(&s, Some("20")).unwrap(), "0");
        assert_eq!(render_assessment_result(&s, Some("20"), "nope"), "0");
    }

    #[test]
    fn default_message_links_to_contact_popup() {
        assert!(DEFAULT_RESULTS_ERROR.starts_with("Oops! There was a problem"));
        assert!(DEFAULT_RESULTS_ERROR.contains("<br/> Please let us know"));
        assert!(DEFAULT_RESULTS_ERROR
            .ends_with(r##"<a class="open-popup-link" href="#contact-popup">sending us a message.</a>"##));
    }

    #[test]
    fn spam_entries_still_resolve() {
        assert_eq!(assessment_result(&store(), Some("14")).unwrap(), "spam result");
    }

    #[test]
    fn render_falls_back_to_fixed_message() {
        let s = store();
        assert_eq!(
            render_assessment_result(&s, Some("11"), DEFAULT_RESULTS_ERROR),
            DEFAULT_RESULTS_ERROR
        );
        assert_eq!(render_assessment_result(&s, Some("x"), "nope"), "nope");
        assert_eq!(
            render_assessment_result(&s, Some("10"), "nope"),
            "<p>Start now.</p>"
        );
    }

    #[test]
    fn remaining_without_limit_is_none() {
        assert_eq!(entries_remaining(&form(1, None), 5, None), None);
        assert_eq!(entries_remaining(&form(1, Some(0)), 5, None), None);
    }

    #[test]
    fn remaining_counts_down_and_floors_at_zero() {
        assert_eq!(entries_remaining(&form(1, Some(10)), 3, None).as_deref(), Some("7"));
        assert_eq!(entries_remaining(&form(1, Some(10)), 10, None).as_deref(), Some("0"));
        assert_eq!(entries_remaining(&form(1, Some(10)), 25, None).as_deref(), Some("0"));
    }

    #[test]
    fn remaining_formats_thousands() {
        let f = form(1, Some(1_234_567));
        assert_eq!(
            entries_remaining(&f, 0, Some(NumberFormat::Comma)).as_deref(),
            Some("1,234,567")
        );
        assert_eq!(
            entries_remaining(&f, 0, Some(NumberFormat::Decimal)).as_deref(),
            Some("1.234.567")
        );
        assert_eq!(
            entries_remaining(&form(1, Some(999)), 0, Some(NumberFormat::Comma)).as_deref(),
            Some("999")
        );
        assert_eq!(entries_remaining(&f, 0, None).as_deref(), Some("1234567"));
    }

    #[test]
    fn remaining_from_store_counts_active_entries_only() {
        // entries 10 and 12 are active on form 1; 11 is trash, 14 is spam
        assert_eq!(store_entries_remaining(&store(), 1, None).as_deref(), Some("1"));
        assert_eq!(store_entries_remaining(&store(), 42, None), None);
    }

    #[test]
    fn number_format_parse() {
        assert_eq!("decimal".parse::<NumberFormat>().unwrap(), NumberFormat::Decimal);
        assert_eq!("COMMA".parse::<NumberFormat>().unwrap(), NumberFormat::Comma);
        assert!("space".parse::<NumberFormat>().is_err());
        assert_eq!(NumberFormat::Decimal.to_string(), "decimal");
    }
}
