//! Immutable load-cycle snapshot
//!
//! Everything a request handler reads is built once here and never mutated.
//! A reload builds a new [`Snapshot`]; see [`crate::SnapshotStore`].

use crate::ballots::load_ballots;
use crate::registry::load_registry;
use crate::report::Skip;
use hemicycle_cluster::{filter_groups, ClusteringEngine, Grouping};
use hemicycle_core::{MemberRegistry, PipelineConfig, Result, TitleIndex, VoteMatrix};
use hemicycle_similarity::{RankedMember, SimilarityEngine, UserVotes};
use std::time::SystemTime;
use tracing::{error, info, warn};

#[derive(Debug)]
pub struct Snapshot {
    config: PipelineConfig,
    registry: MemberRegistry,
    matrix: VoteMatrix,
    groups: Grouping,
    visible_groups: Grouping,
    titles: TitleIndex,
    skipped: Vec<Skip>,
    loaded_at: SystemTime,
}

impl Snapshot {
    /// Run the full load sequence for `config`.
    ///
    /// Only an invalid configuration is an error; source and record failures
    /// are logged and kept in [`Snapshot::skipped`].
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        info!("Loading members from {:?}", config.members_dir);
        let members = load_registry(&config.members_dir);
        info!("Loading ballots from {:?}", config.ballots_dir);
        let ballots = load_ballots(&config.ballots_dir);

        let mut skipped = members.skipped;
        skipped.extend(ballots.skipped);

        let mut snapshot = Self::from_parts(config.clone(), members.value, ballots.value)?;
        snapshot.skipped = skipped;
        Ok(snapshot)
    }

    /// Cluster and index already-loaded data
    pub fn from_parts(
        config: PipelineConfig,
        registry: MemberRegistry,
        matrix: VoteMatrix,
    ) -> Result<Self> {
        config.validate()?;

        let groups = if matrix.is_empty() {
            error!("Vote matrix is empty; skipping clustering");
            Grouping::default()
        } else {
            let mut engine = ClusteringEngine::new(config.cluster_threshold);
            if let Some(path) = &config.dendrogram_path {
                engine = engine.with_dendrogram(path);
            }
            engine.cluster(&matrix, &registry)
        };
        let visible_groups = filter_groups(&groups, config.min_group_size);

        let titles = TitleIndex::new(matrix.measures().iter().take(config.exposed_measures));
        for key in titles.ambiguities() {
            warn!("Measure key {:?} is shared by several titles", key);
        }

        info!(
            "Snapshot ready: {} members, {} measures, {} groups ({} shown)",
            matrix.n_members(),
            matrix.n_measures(),
            groups.len(),
            visible_groups.len()
        );

        Ok(Self {
            config,
            registry,
            matrix,
            groups,
            visible_groups,
            titles,
            skipped: Vec::new(),
            loaded_at: SystemTime::now(),
        })
    }

    #[inline]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[inline]
    pub fn registry(&self) -> &MemberRegistry {
        &self.registry
    }

    #[inline]
    pub fn matrix(&self) -> &VoteMatrix {
        &self.matrix
    }

    /// Every group produced by the cut
    #[inline]
    pub fn groups(&self) -> &Grouping {
        &self.groups
    }

    /// Groups after the minimum-size policy
    #[inline]
    pub fn visible_groups(&self) -> &Grouping {
        &self.visible_groups
    }

    /// Sanitized keys for the measures offered to users
    #[inline]
    pub fn titles(&self) -> &TitleIndex {
        &self.titles
    }

    #[inline]
    pub fn skipped(&self) -> &[Skip] {
        &self.skipped
    }

    #[inline]
    pub fn loaded_at(&self) -> SystemTime {
        self.loaded_at
    }

    /// Top 3 members for answers keyed by sanitized measure key
    pub fn top_matches<I>(&self, answers: I) -> Result<Vec<RankedMember>>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let votes: UserVotes = self.titles.resolve_all(answers)?.into_iter().collect();
        SimilarityEngine::default().top_k(&votes, &self.matrix, &self.registry)
    }
}
