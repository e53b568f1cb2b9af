//! # hemicycle Storage
//!
//! Source ingestion and the in-memory snapshot the query side reads from.
//!
//! - [`load_registry`] / [`load_ballots`] - Per-directory loaders returning a [`ParseReport`]
//! - [`Snapshot`] - Immutable registry, vote matrix, grouping and title index of one load
//! - [`SnapshotStore`] - The current snapshot, replaced atomically on reload

pub mod ballots;
pub mod document;
pub mod manager;
pub mod registry;
pub mod report;
pub mod snapshot;

pub use ballots::{load_ballots, parse_ballot, Ballot};
pub use manager::SnapshotStore;
pub use registry::{load_registry, parse_member};
pub use report::{ParseReport, Skip, SkipReason};
pub use snapshot::Snapshot;
