//! Agglomerative clustering with Ward's minimum-variance linkage
//!
//! Node ids follow the usual linkage-matrix convention: leaves are `0..n`,
//! and the `i`-th merge creates node `n + i`.

use hemicycle_core::{Error, Result};
use serde::Serialize;

/// One agglomeration step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    pub distance: f64,
    /// Number of leaves under the new node
    pub size: usize,
}

/// Full merge history over `n_leaves` observations
#[derive(Debug, Clone, Serialize)]
pub struct Dendrogram {
    merges: Vec<Merge>,
    n_leaves: usize,
}

/// Ward linkage over Euclidean distances between rows.
///
/// Rows must be finite and of equal length. Distances between the merged
/// cluster and every other cluster use the Lance-Williams update; ties go to
/// the first pair in row-major scan order.
pub fn ward_linkage(rows: &[Vec<f64>]) -> Result<Dendrogram> {
    let n = rows.len();
    if n == 0 {
        return Err(Error::EmptyMatrix);
    }

    let dim = rows[0].len();
    for (i, row) in rows.iter().enumerate() {
        if row.len() != dim {
            return Err(Error::ClusteringFailure(format!(
                "row {} has {} columns, expected {}",
                i,
                row.len(),
                dim
            )));
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(Error::ClusteringFailure(format!(
                "row {} contains a non-finite value",
                i
            )));
        }
    }

    let mut dist = vec![0.0f64; n * n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = hemicycle_core::vector::squared_l2(&rows[i], &rows[j]).sqrt();
            dist[i * n + j] = d;
            dist[j * n + i] = d;
        }
    }

    let mut active = vec![true; n];
    let mut sizes = vec![1usize; n];
    let mut node_of: Vec<usize> = (0..n).collect();
    let mut merges = Vec::with_capacity(n.saturating_sub(1));

    for step in 0..n.saturating_sub(1) {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..n {
            if !active[i] {
                continue;
            }
            for j in (i + 1)..n {
                if !active[j] {
                    continue;
                }
                let d = dist[i * n + j];
                if best.map_or(true, |(_, _, b)| d < b) {
                    best = Some((i, j, d));
                }
            }
        }

        let (i, j, d_ij) = best.ok_or_else(|| {
            Error::ClusteringFailure(format!("no mergeable pair at step {}", step))
        })?;

        let n_i = sizes[i] as f64;
        let n_j = sizes[j] as f64;
        for k in 0..n {
            if !active[k] || k == i || k == j {
                continue;
            }
            let n_k = sizes[k] as f64;
            let d_ik = dist[i * n + k];
            let d_jk = dist[j * n + k];
            let squared = ((n_i + n_k) * d_ik * d_ik + (n_j + n_k) * d_jk * d_jk
                - n_k * d_ij * d_ij)
                / (n_i + n_j + n_k);
            let d = squared.max(0.0).sqrt();
            dist[i * n + k] = d;
            dist[k * n + i] = d;
        }

        let (left, right) = if node_of[i] < node_of[j] {
            (node_of[i], node_of[j])
        } else {
            (node_of[j], node_of[i])
        };
        sizes[i] += sizes[j];
        merges.push(Merge {
            left,
            right,
            distance: d_ij,
            size: sizes[i],
        });

        active[j] = false;
        node_of[i] = n + step;
    }

    Ok(Dendrogram { merges, n_leaves: n })
}

impl Dendrogram {
    #[inline]
    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    #[inline]
    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    /// Number of flat clusters a cut at `k` produces
    #[inline]
    pub fn effective_clusters(&self, k: usize) -> usize {
        k.clamp(1, self.n_leaves.max(1))
    }

    /// Number of merges applied by a cut at `k`
    #[inline]
    pub fn merges_below_cut(&self, k: usize) -> usize {
        self.n_leaves - self.effective_clusters(k)
    }

    /// Cut into `min(k, n)` flat clusters.
    ///
    /// Returns one label per leaf in `1..=min(k, n)`, numbered by first
    /// appearance in leaf order.
    pub fn cut(&self, k: usize) -> Vec<u32> {
        let n = self.n_leaves;
        if n == 0 {
            return Vec::new();
        }

        let applied = self.merges_below_cut(k);
        let mut parent: Vec<Option<usize>> = vec![None; n + applied];
        for (step, merge) in self.merges.iter().take(applied).enumerate() {
            parent[merge.left] = Some(n + step);
            parent[merge.right] = Some(n + step);
        }

        let mut root_label: Vec<u32> = vec![0; n + applied];
        let mut next = 0u32;
        (0..n)
            .map(|leaf| {
                let mut node = leaf;
                while let Some(p) = parent[node] {
                    node = p;
                }
                if root_label[node] == 0 {
                    next += 1;
                    root_label[node] = next;
                }
                root_label[node]
            })
            .collect()
    }

    /// Leaves in left-to-right plotting order
    pub fn leaf_order(&self) -> Vec<usize> {
        let n = self.n_leaves;
        if n == 0 {
            return Vec::new();
        }

        let root = n + self.merges.len() - 1;
        let mut order = Vec::with_capacity(n);
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node < n {
                order.push(node);
            } else {
                let merge = &self.merges[node - n];
                stack.push(merge.right);
                stack.push(merge.left);
            }
        }
        order
    }
}
