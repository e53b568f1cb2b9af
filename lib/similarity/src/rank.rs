//! Cosine ranking of members against a user vote vector
//!
//! The matrix is restricted to the answered measures, zero-filled, and each
//! member row is scored with plain cosine similarity. No centering or
//! normalization is applied beyond the cosine formula.

use crate::query::UserVotes;
use hemicycle_core::{MemberRegistry, Result, Vector, VoteMatrix};
use serde::Serialize;
use tracing::{debug, warn};

/// Number of members returned by default
pub const DEFAULT_TOP_K: usize = 3;

/// A member scored against the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMember {
    pub name: String,
    /// Cosine similarity in [-1, 1]
    pub similarity: f64,
    pub id: String,
}

/// Ranks members by cosine similarity to a partial user vote vector
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    k: usize,
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self { k: DEFAULT_TOP_K }
    }
}

impl SimilarityEngine {
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// The `k` most similar members, best first.
    ///
    /// Empty answers give an empty result. A measure the matrix does not know
    /// fails the whole query with [`hemicycle_core::Error::UnknownMeasure`];
    /// with no votes loaded every measure is unknown.
    pub fn top_k(
        &self,
        votes: &UserVotes,
        matrix: &VoteMatrix,
        registry: &MemberRegistry,
    ) -> Result<Vec<RankedMember>> {
        let mut ranked = self.rank(votes, matrix, registry)?;
        ranked.truncate(self.k);
        Ok(ranked)
    }

    /// Every member, sorted by similarity descending.
    ///
    /// The sort is stable: exact ties keep matrix row order.
    pub fn rank(
        &self,
        votes: &UserVotes,
        matrix: &VoteMatrix,
        registry: &MemberRegistry,
    ) -> Result<Vec<RankedMember>> {
        if votes.is_empty() {
            warn!("No answers provided");
            return Ok(Vec::new());
        }
        let user = votes.to_vector();
        let restricted = matrix.restrict(&votes.measures())?;

        let mut results: Vec<RankedMember> = restricted
            .members()
            .iter()
            .enumerate()
            .map(|(row, id)| RankedMember {
                name: registry.display_name(id).to_string(),
                similarity: user.cosine_similarity(&Vector::new(restricted.zero_filled_row(row))),
                id: id.clone(),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            "Ranked {} members over {} answered measures",
            results.len(),
            user.dim()
        );
        Ok(results)
    }
}
