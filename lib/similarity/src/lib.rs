//! # hemicycle Similarity
//!
//! Finds the members whose voting record is closest to a user's answers.
//!
//! ## Example
//!
//! ```rust
//! use hemicycle_core::{Member, MemberRegistry, VoteCategory, VoteMatrixBuilder};
//! use hemicycle_similarity::{SimilarityEngine, UserVotes};
//!
//! let mut builder = VoteMatrixBuilder::new();
//! builder.record("A", "M1", VoteCategory::Pour);
//! builder.record("A", "M2", VoteCategory::Contre);
//! builder.record("B", "M1", VoteCategory::Pour);
//! builder.record("B", "M2", VoteCategory::Pour);
//! let matrix = builder.build();
//!
//! let registry: MemberRegistry = [
//!     Member::from_names("A", "Jane", "Doe"),
//!     Member::from_names("B", "Jon", "Roe"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let votes = UserVotes::new().with("M1", "pour").with("M2", "contre");
//! let top = SimilarityEngine::default().top_k(&votes, &matrix, &registry).unwrap();
//! assert_eq!(top[0].name, "Jane Doe");
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  UserVotes  │────>│  restrict   │────>│ zero-filled │
//! │ (answers)   │     │ (columns)   │     │   rows      │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                      ┌─────────────┐           │
//!                      │   cosine    │<──────────┘
//!                      │  + top-k    │
//!                      └─────────────┘
//! ```

pub mod query;
pub mod rank;

pub use query::UserVotes;
pub use rank::{RankedMember, SimilarityEngine, DEFAULT_TOP_K};
