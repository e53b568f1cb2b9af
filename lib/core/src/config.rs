use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one load cycle of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory of member documents
    pub members_dir: PathBuf,
    /// Directory of ballot documents
    pub ballots_dir: PathBuf,
    /// Number of flat groups the linkage tree is cut into
    pub cluster_threshold: usize,
    /// Groups smaller than this are hidden from the user-facing grouping
    pub min_group_size: usize,
    /// Where the dendrogram is written; `None` disables rendering
    pub dendrogram_path: Option<PathBuf>,
    /// How many leading measures are offered to users as questions
    pub exposed_measures: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            members_dir: PathBuf::from("data/acteur"),
            ballots_dir: PathBuf::from("data/scrutins"),
            cluster_threshold: 30,
            min_group_size: 20,
            dendrogram_path: Some(PathBuf::from("static/dendrograms/dendrogram_initial.svg")),
            exposed_measures: 10,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cluster_threshold == 0 {
            return Err(Error::InvalidConfig(
                "cluster_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
