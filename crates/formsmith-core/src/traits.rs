//! Core trait definitions for submission processing and entry lookup.
//!
//! Processors are dispatched on the kind of field they own; stores give the
//! read side access to persisted entries without tying it to a backend.

use crate::model::{Entry, Field, FieldKind, FormSchema, Submission};
use crate::submission::SubmissionPatch;

// ---------------------------------------------------------------------------
// Submission processor trait
// ---------------------------------------------------------------------------

/// A pre-submission step attached to one kind of form field.
///
/// The pipeline finds the first field of [`field_kind`](Self::field_kind) on
/// the form and, if there is one, hands it to [`process`](Self::process).
/// Implementations never mutate the submission; they describe the changes
/// as a patch.
pub trait SubmissionProcessor: Send + Sync {
    /// Short name used in logs (e.g. "full-name").
    fn name(&self) -> &str;

    /// The field kind this processor owns.
    fn field_kind(&self) -> FieldKind;

    /// Compute the changes to apply to `submission`.
    fn process(&self, form: &FormSchema, field: &Field, submission: &Submission)
        -> SubmissionPatch;
}

// ---------------------------------------------------------------------------
// Entry store trait
// ---------------------------------------------------------------------------

/// Read access to persisted forms and entries.
pub trait EntryStore {
    /// Look up an entry by id, whatever its status.
    fn entry(&self, id: u64) -> Option<&Entry>;

    /// Look up a form definition by id.
    fn form(&self, id: u32) -> Option<&FormSchema>;

    /// Number of entries of `form_id` with active status.
    fn active_entry_count(&self, form_id: u32) -> usize;
}
