//! Vote matrix: sparse accumulation and dense materialization
//!
//! Ballot parsing records `(member, measure) -> category` triples into a
//! [`VoteMatrixBuilder`]. [`VoteMatrixBuilder::build`] materializes the dense,
//! rectangular [`VoteMatrix`]: one row per referenced member, one column per
//! measure that received at least one recorded vote, and every unmentioned
//! pair filled with [`VoteCategory::Absent`].

use crate::vote::{fill_undefined, VoteCategory};
use crate::{Error, Result};
use ahash::AHashMap;
use tracing::debug;

/// Sparse member -> {measure -> category} accumulator
///
/// Row and column order follow first appearance, so the dense matrix is
/// deterministic for a given record order.
#[derive(Debug, Default)]
pub struct VoteMatrixBuilder {
    members: Vec<String>,
    member_index: AHashMap<String, usize>,
    measures: Vec<String>,
    measure_index: AHashMap<String, usize>,
    votes: Vec<AHashMap<usize, VoteCategory>>,
}

impl VoteMatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vote. A later record for the same pair overwrites the earlier one.
    pub fn record(&mut self, member_id: &str, measure: &str, category: VoteCategory) {
        let row = match self.member_index.get(member_id) {
            Some(&row) => row,
            None => {
                let row = self.members.len();
                self.members.push(member_id.to_string());
                self.member_index.insert(member_id.to_string(), row);
                self.votes.push(AHashMap::new());
                row
            }
        };

        let col = match self.measure_index.get(measure) {
            Some(&col) => col,
            None => {
                let col = self.measures.len();
                self.measures.push(measure.to_string());
                self.measure_index.insert(measure.to_string(), col);
                col
            }
        };

        if let Some(previous) = self.votes[row].insert(col, category) {
            debug!(
                "Vote of {} on {:?} overwritten: {} -> {}",
                member_id, measure, previous, category
            );
        }
    }

    /// Number of explicitly recorded (member, measure) pairs
    pub fn recorded(&self) -> usize {
        self.votes.iter().map(|row| row.len()).sum()
    }

    pub fn build(self) -> VoteMatrix {
        let n_measures = self.measures.len();
        let mut cells = vec![VoteCategory::Absent; self.members.len() * n_measures];

        for (row, votes) in self.votes.iter().enumerate() {
            for (&col, &category) in votes {
                cells[row * n_measures + col] = category;
            }
        }

        VoteMatrix {
            members: self.members,
            member_index: self.member_index,
            measures: self.measures,
            measure_index: self.measure_index,
            cells,
        }
    }
}

/// Dense members x measures matrix of vote categories
#[derive(Debug, Clone, Default)]
pub struct VoteMatrix {
    members: Vec<String>,
    member_index: AHashMap<String, usize>,
    measures: Vec<String>,
    measure_index: AHashMap<String, usize>,
    cells: Vec<VoteCategory>,
}

impl VoteMatrix {
    #[inline]
    #[must_use]
    pub fn n_members(&self) -> usize {
        self.members.len()
    }

    #[inline]
    #[must_use]
    pub fn n_measures(&self) -> usize {
        self.measures.len()
    }

    /// True when there are no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member ids in row order
    #[inline]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Measure titles in column order
    #[inline]
    pub fn measures(&self) -> &[String] {
        &self.measures
    }

    #[inline]
    pub fn measure_column(&self, title: &str) -> Option<usize> {
        self.measure_index.get(title).copied()
    }

    #[inline]
    pub fn member_row(&self, member_id: &str) -> Option<usize> {
        self.member_index.get(member_id).copied()
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[VoteCategory] {
        let n = self.measures.len();
        &self.cells[row * n..(row + 1) * n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[VoteCategory]> + '_ {
        (0..self.members.len()).map(move |row| self.row(row))
    }

    /// Cell lookup by member id and measure title
    pub fn get(&self, member_id: &str, measure: &str) -> Option<VoteCategory> {
        let row = self.member_row(member_id)?;
        let col = self.measure_column(measure)?;
        Some(self.cells[row * self.measures.len() + col])
    }

    /// Encoded row with undefined cells replaced by 0
    pub fn zero_filled_row(&self, row: usize) -> Vec<f64> {
        self.row(row)
            .iter()
            .map(|c| fill_undefined(Some(c.code())))
            .collect()
    }

    /// A fresh encoded copy with undefined cells replaced by 0.
    ///
    /// Each caller gets its own allocation; the matrix itself is never mutated.
    pub fn zero_filled(&self) -> Vec<Vec<f64>> {
        (0..self.n_members())
            .map(|row| self.zero_filled_row(row))
            .collect()
    }

    /// Restrict to exactly the named columns, in the given order.
    ///
    /// Every title must name an existing column; otherwise all missing titles
    /// are reported in a single [`Error::UnknownMeasure`].
    pub fn restrict<S: AsRef<str>>(&self, titles: &[S]) -> Result<VoteMatrix> {
        let mut columns = Vec::with_capacity(titles.len());
        let mut missing = Vec::new();
        for title in titles {
            match self.measure_column(title.as_ref()) {
                Some(col) => columns.push(col),
                None => missing.push(title.as_ref().to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(Error::UnknownMeasure(missing));
        }

        let measures: Vec<String> = columns.iter().map(|&c| self.measures[c].clone()).collect();
        let measure_index = measures
            .iter()
            .enumerate()
            .map(|(i, m)| (m.clone(), i))
            .collect();

        let mut cells = Vec::with_capacity(self.members.len() * columns.len());
        for row in self.rows() {
            cells.extend(columns.iter().map(|&c| row[c]));
        }

        Ok(VoteMatrix {
            members: self.members.clone(),
            member_index: self.member_index.clone(),
            measures,
            measure_index,
            cells,
        })
    }
}
