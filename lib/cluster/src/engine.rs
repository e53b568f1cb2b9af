use crate::linkage::ward_linkage;
use crate::render::{render_svg, write_artifact};
use hemicycle_core::{Error, MemberRegistry, Result, VoteMatrix};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Arbitrary group number in `1..=threshold`; not stable across runs
pub type GroupLabel = u32;

/// Group label -> member display names, in matrix row order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Grouping {
    groups: BTreeMap<GroupLabel, Vec<String>>,
}

impl Grouping {
    pub fn new(groups: BTreeMap<GroupLabel, Vec<String>>) -> Self {
        Self { groups }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[inline]
    pub fn get(&self, label: GroupLabel) -> Option<&[String]> {
        self.groups.get(&label).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupLabel, &[String])> {
        self.groups.iter().map(|(&label, names)| (label, names.as_slice()))
    }

    /// Total number of members across all groups
    pub fn total_members(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn into_inner(self) -> BTreeMap<GroupLabel, Vec<String>> {
        self.groups
    }
}

/// Hide groups smaller than `min_size`.
///
/// Falls back to the unfiltered grouping when nothing would survive.
pub fn filter_groups(grouping: &Grouping, min_size: usize) -> Grouping {
    let kept: BTreeMap<GroupLabel, Vec<String>> = grouping
        .groups
        .iter()
        .filter(|(_, names)| names.len() >= min_size)
        .map(|(&label, names)| (label, names.clone()))
        .collect();

    if kept.is_empty() {
        warn!(
            "No group has {} or more members; keeping all {} groups",
            min_size,
            grouping.len()
        );
        return grouping.clone();
    }

    info!("{} of {} groups have at least {} members", kept.len(), grouping.len(), min_size);
    Grouping::new(kept)
}

/// Ward clustering of members by voting record, cut into a fixed group count
#[derive(Debug, Clone)]
pub struct ClusteringEngine {
    threshold: usize,
    dendrogram_path: Option<PathBuf>,
}

impl ClusteringEngine {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            dendrogram_path: None,
        }
    }

    /// Also render a dendrogram to `path` on every run
    pub fn with_dendrogram(mut self, path: impl Into<PathBuf>) -> Self {
        self.dendrogram_path = Some(path.into());
        self
    }

    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Cluster, logging any failure and returning an empty grouping instead
    pub fn cluster(&self, matrix: &VoteMatrix, registry: &MemberRegistry) -> Grouping {
        match self.try_cluster(matrix, registry) {
            Ok(grouping) => grouping,
            Err(e) => {
                error!("Clustering failed: {}", e);
                Grouping::default()
            }
        }
    }

    pub fn try_cluster(&self, matrix: &VoteMatrix, registry: &MemberRegistry) -> Result<Grouping> {
        if self.threshold == 0 {
            return Err(Error::InvalidConfig(
                "cluster threshold must be at least 1".to_string(),
            ));
        }
        if matrix.is_empty() {
            return Err(Error::EmptyMatrix);
        }

        let tree = ward_linkage(&matrix.zero_filled())?;
        let labels = tree.cut(self.threshold);

        let names: Vec<String> = matrix
            .members()
            .iter()
            .map(|id| registry.display_name(id).to_string())
            .collect();

        let mut groups: BTreeMap<GroupLabel, Vec<String>> = BTreeMap::new();
        for (name, &label) in names.iter().zip(&labels) {
            groups.entry(label).or_default().push(name.clone());
        }

        info!(
            "Clustered {} members over {} measures into {} groups",
            matrix.n_members(),
            matrix.n_measures(),
            groups.len()
        );

        if let Some(path) = &self.dendrogram_path {
            let rendered = render_svg(&tree, &names, self.threshold, "Member dendrogram")
                .and_then(|svg| write_artifact(path, &svg));
            match rendered {
                Ok(()) => info!("Dendrogram saved to {:?}", path),
                Err(e) => warn!("{}", e),
            }
        }

        Ok(Grouping::new(groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hemicycle_core::{Member, VoteCategory, VoteMatrixBuilder};
    use std::collections::BTreeSet;

    fn blocs() -> (VoteMatrix, MemberRegistry) {
        let mut builder = VoteMatrixBuilder::new();
        let measures = ["M1", "M2", "M3", "M4"];
        for (i, id) in ["L1", "R1", "L2", "R2", "L3", "R3"].iter().enumerate() {
            for (j, measure) in measures.iter().enumerate() {
                let left = i % 2 == 0;
                let category = match (left, j % 2 == 0) {
                    (true, true) | (false, false) => VoteCategory::Pour,
                    _ => VoteCategory::Contre,
                };
                builder.record(id, measure, category);
            }
        }
        let registry = ["L1", "R1", "L2", "R2", "L3"]
            .iter()
            .map(|id| Member::new(*id, format!("Name {}", id)))
            .collect();
        (builder.build(), registry)
    }

    #[test]
    fn test_two_blocs() {
        let (matrix, registry) = blocs();
        let grouping = ClusteringEngine::new(2).try_cluster(&matrix, &registry).unwrap();

        assert_eq!(grouping.len(), 2);
        assert_eq!(grouping.get(1), Some(&["Name L1".to_string(), "Name L2".to_string(), "Name L3".to_string()][..]));
        // R3 is not in the registry and falls back to its id
        assert_eq!(grouping.get(2), Some(&["Name R1".to_string(), "Name R2".to_string(), "R3".to_string()][..]));
    }

    #[test]
    fn test_partition_property() {
        let (matrix, registry) = blocs();
        for threshold in 1..=8 {
            let grouping = ClusteringEngine::new(threshold).try_cluster(&matrix, &registry).unwrap();
            assert_eq!(grouping.len(), threshold.min(matrix.n_members()));
            assert_eq!(grouping.total_members(), matrix.n_members());

            let unique: BTreeSet<&String> = grouping.iter().flat_map(|(_, names)| names).collect();
            assert_eq!(unique.len(), matrix.n_members());
            for (label, _) in grouping.iter() {
                assert!(label >= 1 && label as usize <= threshold);
            }
        }
    }

    #[test]
    fn test_undefined_cells_zero_filled() {
        let mut builder = VoteMatrixBuilder::new();
        builder.record("A", "M1", VoteCategory::NonVotantVolontaire);
        builder.record("B", "M2", VoteCategory::Abstention);
        let matrix = builder.build();
        let grouping = ClusteringEngine::new(1)
            .try_cluster(&matrix, &MemberRegistry::new())
            .unwrap();
        assert_eq!(grouping.get(1).map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_failures_yield_empty_grouping() {
        let empty = VoteMatrixBuilder::new().build();
        let engine = ClusteringEngine::new(3);
        assert!(matches!(
            engine.try_cluster(&empty, &MemberRegistry::new()),
            Err(Error::EmptyMatrix)
        ));
        assert!(engine.cluster(&empty, &MemberRegistry::new()).is_empty());

        let (matrix, registry) = blocs();
        assert!(ClusteringEngine::new(0).cluster(&matrix, &registry).is_empty());
    }

    #[test]
    fn test_render_failure_does_not_fail_clustering() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let (matrix, registry) = blocs();
        let grouping = ClusteringEngine::new(2)
            .with_dendrogram(blocker.join("dendrogram.svg"))
            .try_cluster(&matrix, &registry)
            .unwrap();
        assert_eq!(grouping.len(), 2);
    }

    #[test]
    fn test_dendrogram_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dendrograms").join("initial.svg");

        let (matrix, registry) = blocs();
        ClusteringEngine::new(2)
            .with_dendrogram(&path)
            .try_cluster(&matrix, &registry)
            .unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Name L1"));
        assert!(svg.contains("R3"));
    }

    #[test]
    fn test_filter_groups() {
        let mut groups = BTreeMap::new();
        groups.insert(1, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        groups.insert(2, vec!["d".to_string()]);
        let grouping = Grouping::new(groups);

        let filtered = filter_groups(&grouping, 2);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.get(2).is_none());

        let fallback = filter_groups(&grouping, 20);
        assert_eq!(fallback, grouping);

        assert_eq!(filter_groups(&grouping, 0), grouping);
    }
}
