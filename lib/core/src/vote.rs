//! Vote categories and the categorical encoder
//!
//! A roll-call cell is one of five categories. Only `pour`, `contre` and
//! `abstention` are comparable choices; the two non-participation variants
//! encode to NaN and are zero-filled by whoever needs a distance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A member's recorded position on a single measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteCategory {
    Pour,
    Contre,
    Abstention,
    NonVotantVolontaire,
    /// Never present in source records; filled in for unmentioned pairs
    Absent,
}

impl VoteCategory {
    pub const ALL: [VoteCategory; 5] = [
        VoteCategory::Pour,
        VoteCategory::Contre,
        VoteCategory::Abstention,
        VoteCategory::NonVotantVolontaire,
        VoteCategory::Absent,
    ];

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteCategory::Pour => "pour",
            VoteCategory::Contre => "contre",
            VoteCategory::Abstention => "abstention",
            VoteCategory::NonVotantVolontaire => "non_votant_volontaire",
            VoteCategory::Absent => "absent",
        }
    }

    /// Numeric code: +1, -1, 0, or NaN for non-participation
    #[inline]
    #[must_use]
    pub fn code(&self) -> f64 {
        match self {
            VoteCategory::Pour => 1.0,
            VoteCategory::Contre => -1.0,
            VoteCategory::Abstention => 0.0,
            VoteCategory::NonVotantVolontaire | VoteCategory::Absent => f64::NAN,
        }
    }
}

impl fmt::Display for VoteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label is outside the fixed category set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown vote category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for VoteCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VoteCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Encode a raw category label. `None` means the label is unmapped.
#[inline]
pub fn encode_label(label: &str) -> Option<f64> {
    label.parse::<VoteCategory>().ok().map(|c| c.code())
}

/// Zero-fill for distance purposes: unmapped and NaN both become 0
#[inline]
pub fn fill_undefined(code: Option<f64>) -> f64 {
    match code {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}
