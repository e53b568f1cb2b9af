//! # hemicycle Cluster
//!
//! Groups members by voting similarity.
//!
//! The encoded vote matrix is zero-filled, agglomerated with Ward's
//! minimum-variance linkage, and the tree is cut into a fixed number of flat
//! groups. A dendrogram can optionally be written as an SVG side artifact.
//!
//! ## Example
//!
//! ```rust
//! use hemicycle_cluster::ClusteringEngine;
//! use hemicycle_core::{MemberRegistry, VoteCategory, VoteMatrixBuilder};
//!
//! let mut builder = VoteMatrixBuilder::new();
//! builder.record("PA1", "M1", VoteCategory::Pour);
//! builder.record("PA2", "M1", VoteCategory::Pour);
//! builder.record("PA3", "M1", VoteCategory::Contre);
//! let matrix = builder.build();
//!
//! let grouping = ClusteringEngine::new(2).cluster(&matrix, &MemberRegistry::new());
//! assert_eq!(grouping.len(), 2);
//! assert_eq!(grouping.total_members(), 3);
//! ```

pub mod engine;
pub mod linkage;
pub mod render;

pub use engine::{filter_groups, ClusteringEngine, GroupLabel, Grouping};
pub use linkage::{ward_linkage, Dendrogram, Merge};
pub use render::{render_svg, write_artifact};
