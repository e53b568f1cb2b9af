use crate::snapshot::Snapshot;
use hemicycle_core::{PipelineConfig, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Holds the current snapshot and swaps in a new one on reload
pub struct SnapshotStore {
    config: PipelineConfig,
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotStore {
    /// Load the initial snapshot
    pub fn open(config: PipelineConfig) -> Result<Self> {
        let snapshot = Snapshot::load(&config)?;
        Ok(Self::with_snapshot(config, snapshot))
    }

    /// Wrap an already-built snapshot
    pub fn with_snapshot(config: PipelineConfig, snapshot: Snapshot) -> Self {
        Self {
            config,
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    #[inline]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The snapshot in effect; holders keep it alive across a reload
    #[inline]
    #[must_use]
    pub fn current(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }

    /// Build a fresh snapshot and swap it in.
    ///
    /// Loading happens outside the lock, so readers are never blocked on I/O.
    /// On error the previous snapshot stays in effect.
    pub fn reload(&self) -> Result<Arc<Snapshot>> {
        let fresh = Arc::new(Snapshot::load(&self.config)?);
        *self.current.write() = fresh.clone();
        info!("Snapshot reloaded");
        Ok(fresh)
    }
}
