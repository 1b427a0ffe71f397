//! Lookup error types.
//!
//! These errors describe why a stored assessment result could not be shown.
//! Callers facing end users collapse all of them into one fixed message; the
//! variants exist so logs and tests can tell the cases apart.

use thiserror::Error;

/// Errors that can occur when looking up a stored assessment result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No entry id was supplied.
    #[error("no entry id supplied")]
    MissingEntryId,

    /// The entry id is not a positive integer.
    #[error("invalid entry id: {0:?}")]
    InvalidEntryId(String),

    /// No entry exists with this id.
    #[error("entry {0} not found")]
    EntryNotFound(u64),

    /// The entry exists but has been moved to the trash.
    #[error("entry {0} is in the trash")]
    EntryTrashed(u64),

    /// The form the entry belongs to is unknown.
    #[error("form {form_id} for entry {entry_id} not found")]
    FormNotFound { entry_id: u64, form_id: u32 },

    /// The form has no assessment field or the entry stored no result.
    #[error("entry {0} has no assessment result")]
    NoResult(u64),
}

impl LookupError {
    /// Returns `true` if the caller supplied a bad identifier, as opposed to
    /// a well-formed one that resolved to nothing displayable.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            LookupError::MissingEntryId | LookupError::InvalidEntryId(_)
        )
    }

    /// The entry id involved, if one was resolved.
    pub fn entry_id(&self) -> Option<u64> {
        match self {
            LookupError::EntryNotFound(id)
            | LookupError::EntryTrashed(id)
            | LookupError::NoResult(id) => Some(*id),
            LookupError::FormNotFound { entry_id, .. } => Some(*entry_id),
            LookupError::MissingEntryId | LookupError::InvalidEntryId(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(LookupError::MissingEntryId.is_bad_request());
        assert!(LookupError::InvalidEntryId("x".into()).is_bad_request());
        assert!(!LookupError::EntryTrashed(4).is_bad_request());
        assert_eq!(LookupError::NoResult(7).entry_id(), Some(7));
        assert_eq!(
            LookupError::FormNotFound {
                entry_id: 3,
                form_id: 1
            }
            .entry_id(),
            Some(3)
        );
        assert_eq!(LookupError::MissingEntryId.entry_id(), None);
    }

    #[test]
    fn messages() {
        assert_eq!(
            LookupError::InvalidEntryId("abc".into()).to_string(),
            "invalid entry id: \"abc\""
        );
        assert_eq!(
            LookupError::EntryTrashed(12).to_string(),
            "entry 12 is in the trash"
        );
    }
}
