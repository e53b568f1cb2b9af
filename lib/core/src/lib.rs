//! # hemicycle Core
//!
//! Core library for the hemicycle vote-similarity pipeline.
//!
//! This crate provides the fundamental data structures:
//!
//! - [`Member`] / [`MemberRegistry`] - Member id to display name lookup
//! - [`VoteCategory`] - The five roll-call categories and their numeric codes
//! - [`VoteMatrixBuilder`] / [`VoteMatrix`] - Sparse vote accumulation and the dense matrix
//! - [`Vector`] - Dense vector math (dot, norm, cosine)
//! - [`TitleIndex`] - Sanitized measure keys and their reverse lookup
//! - [`PipelineConfig`] - Load-cycle configuration
//!
//! ## Example
//!
//! ```rust
//! use hemicycle_core::{VoteCategory, VoteMatrixBuilder};
//!
//! let mut builder = VoteMatrixBuilder::new();
//! builder.record("PA1", "Loi sur l'eau", VoteCategory::Pour);
//! builder.record("PA2", "Budget", VoteCategory::Contre);
//!
//! let matrix = builder.build();
//! assert_eq!(matrix.get("PA1", "Budget"), Some(VoteCategory::Absent));
//! ```

pub mod config;
pub mod error;
pub mod matrix;
pub mod member;
pub mod title;
pub mod vector;
pub mod vote;

pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use matrix::{VoteMatrix, VoteMatrixBuilder};
pub use member::{Member, MemberRegistry};
pub use title::{sanitize_title, TitleIndex};
pub use vector::{cosine_similarity, Vector};
pub use vote::{encode_label, fill_undefined, VoteCategory};
