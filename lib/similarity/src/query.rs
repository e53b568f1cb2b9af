//! User vote vector
//!
//! A sparse set of answers over a subset of measures. Keys are kept sorted so
//! the user vector and the restricted matrix columns share one fixed order.

use hemicycle_core::{encode_label, fill_undefined, Vector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Measure title -> chosen category label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserVotes {
    choices: BTreeMap<String, String>,
}

impl UserVotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer; the choice is kept as given and encoded on demand
    pub fn insert(&mut self, measure: impl Into<String>, choice: impl ToString) {
        self.choices.insert(measure.into(), choice.to_string());
    }

    /// Builder-style [`UserVotes::insert`]
    pub fn with(mut self, measure: impl Into<String>, choice: impl ToString) -> Self {
        self.insert(measure, choice);
        self
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Answered measures, in vector order
    pub fn measures(&self) -> Vec<&str> {
        self.choices.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.choices.iter().map(|(m, c)| (m.as_str(), c.as_str()))
    }

    /// Encoded answers; undefined and unrecognized choices count as 0
    pub fn to_vector(&self) -> Vector {
        Vector::new(
            self.choices
                .values()
                .map(|choice| fill_undefined(encode_label(choice)))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for UserVotes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut votes = UserVotes::new();
        for (measure, choice) in iter {
            votes.insert(measure, choice);
        }
        votes
    }
}
