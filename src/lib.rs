//! # hemicycle
//!
//! Roll-call vote analysis for parliamentary open data.
//!
//! hemicycle ingests member and ballot documents, builds a dense
//! member x measure vote matrix, groups members by voting pattern with Ward
//! hierarchical clustering, and ranks the members closest to a user's own
//! answers by cosine similarity.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! hemicycle --members-dir data/acteur --ballots-dir data/scrutins --http-port 8000
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use hemicycle::prelude::*;
//!
//! let config = PipelineConfig {
//!     members_dir: "data/acteur".into(),
//!     ballots_dir: "data/scrutins".into(),
//!     ..Default::default()
//! };
//! let snapshot = Snapshot::load(&config).unwrap();
//!
//! for (label, names) in snapshot.visible_groups().iter() {
//!     println!("Group {}: {} members", label, names.len());
//! }
//!
//! let top = snapshot
//!     .top_matches(vec![("Loi_sur_l_eau".to_string(), "pour".to_string())])
//!     .unwrap();
//! ```
//!
//! ## Crate Structure
//!
//! - [`hemicycle-core`](https://docs.rs/hemicycle-core) - Vote categories, members, vote matrix, title keys
//! - [`hemicycle-cluster`](https://docs.rs/hemicycle-cluster) - Ward linkage, flat cut, dendrogram rendering
//! - [`hemicycle-similarity`](https://docs.rs/hemicycle-similarity) - Cosine top-k member matching
//! - [`hemicycle-storage`](https://docs.rs/hemicycle-storage) - Source ingestion and snapshots
//! - [`hemicycle-api`](https://docs.rs/hemicycle-api) - REST API

// Re-export core types
pub use hemicycle_core::{
    encode_label, sanitize_title, Error, Member, MemberRegistry, PipelineConfig, Result,
    TitleIndex, VoteCategory, VoteMatrix, VoteMatrixBuilder,
};

// Re-export clustering and similarity
pub use hemicycle_cluster::{filter_groups, ward_linkage, ClusteringEngine, Dendrogram, Grouping};
pub use hemicycle_similarity::{RankedMember, SimilarityEngine, UserVotes};

// Re-export storage
pub use hemicycle_storage::{load_ballots, load_registry, ParseReport, Snapshot, SnapshotStore};

// Re-export API
pub use hemicycle_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ClusteringEngine, Error, Grouping, Member, MemberRegistry, PipelineConfig, RankedMember,
        Result, SimilarityEngine, Snapshot, SnapshotStore, UserVotes, VoteCategory, VoteMatrix,
        VoteMatrixBuilder,
    };
}
