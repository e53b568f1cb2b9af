//! Result-accumulating parse reports
//!
//! Loaders never abort on a bad record or file. Everything they parsed ends
//! up in [`ParseReport::value`], everything they skipped in
//! [`ParseReport::skipped`] together with the reason.

use hemicycle_core::Error;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The source directory does not exist
    SourceNotFound,
    /// The source directory exists but could not be listed
    SourceUnreadable(String),
    /// A document could not be read from disk
    Unreadable(String),
    /// A document is not valid JSON
    Malformed(String),
    /// A member document lacks a required field
    MissingField(&'static str),
    /// A ballot document has no usable title
    MissingTitle,
    /// A ballot document has no nominal roll-call section
    NoRollCall,
}

impl SkipReason {
    /// True for failures that affect the whole source rather than one record
    pub fn is_source_failure(&self) -> bool {
        matches!(self, SkipReason::SourceNotFound | SkipReason::SourceUnreadable(_))
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SourceNotFound => write!(f, "source directory not found"),
            SkipReason::SourceUnreadable(e) => write!(f, "source directory unreadable: {}", e),
            SkipReason::Unreadable(e) => write!(f, "unreadable: {}", e),
            SkipReason::Malformed(e) => write!(f, "malformed: {}", e),
            SkipReason::MissingField(field) => write!(f, "missing field `{}`", field),
            SkipReason::MissingTitle => write!(f, "no title"),
            SkipReason::NoRollCall => write!(f, "no nominal roll-call section"),
        }
    }
}

/// One skipped file or source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skip {
    pub path: PathBuf,
    pub reason: SkipReason,
}

impl Skip {
    pub fn new(path: impl Into<PathBuf>, reason: SkipReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }

    pub fn to_error(&self) -> Error {
        match &self.reason {
            SkipReason::SourceNotFound => Error::SourceNotFound(self.path.clone()),
            reason => Error::RecordParse {
                path: self.path.clone(),
                reason: reason.to_string(),
            },
        }
    }
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Parsed value plus per-file skip reasons
#[derive(Debug, Clone)]
pub struct ParseReport<T> {
    pub value: T,
    /// Documents that contributed to `value`
    pub parsed: usize,
    pub skipped: Vec<Skip>,
}

impl<T> ParseReport<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            parsed: 0,
            skipped: Vec::new(),
        }
    }

    /// The whole-source failure, if the source could not be listed at all
    pub fn source_error(&self) -> Option<Error> {
        self.skipped
            .iter()
            .find(|s| s.reason.is_source_failure())
            .map(Skip::to_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error() {
        let mut report = ParseReport::new(());
        assert!(report.source_error().is_none());

        report.skipped.push(Skip::new("a.json", SkipReason::MissingTitle));
        assert!(report.source_error().is_none());

        report.skipped.push(Skip::new("data/missing", SkipReason::SourceNotFound));
        assert!(matches!(report.source_error(), Some(Error::SourceNotFound(_))));
    }

    #[test]
    fn test_record_error_message() {
        let skip = Skip::new("PA1.json", SkipReason::MissingField("prenom"));
        assert_eq!(skip.to_string(), "PA1.json: missing field `prenom`");
        match skip.to_error() {
            Error::RecordParse { path, reason } => {
                assert_eq!(path, PathBuf::from("PA1.json"));
                assert_eq!(reason, "missing field `prenom`");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
