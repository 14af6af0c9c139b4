use ahash::{AHashMap, AHashSet};
use log::debug;
use crate::error::Result;
use crate::types::{ClusteredModes, NOISE_LABEL};

/// Result of the noise-preserving post-processing: every input row, with
/// undersized clusters folded into the noise label.
#[derive(Debug, Clone, PartialEq)]
pub struct NoisePreserved {
    pub modes: ClusteredModes,
    /// Rows carrying `NOISE_LABEL` after folding.
    pub noise_count: usize,
}

/// Renumbers non-negative labels to `0..k` in order of first appearance.
/// Noise stays `-1`.
pub fn factorize(labels: &[i32]) -> Vec<i32> {
    let mut mapping: AHashMap<i32, i32> = AHashMap::new();
    for &label in labels {
        if label >= 0 && !mapping.contains_key(&label) {
            let next = mapping.len() as i32;
            mapping.insert(label, next);
        }
    }

    labels
        .iter()
        .map(|label| mapping.get(label).copied().unwrap_or(NOISE_LABEL))
        .collect()
}

/// Labels with strictly more than `min_cluster_size` rows.
fn kept_labels(labels: &[i32], min_cluster_size: usize) -> AHashSet<i32> {
    let mut counts: AHashMap<i32, usize> = AHashMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|&(_, count)| count > min_cluster_size)
        .map(|(label, _)| label)
        .collect()
}

/// Keeps only the rows of clusters larger than `min_cluster_size`, noise
/// excluded, and renumbers the surviving clusters from zero.
pub fn filter_clusters(clustered: &ClusteredModes, min_cluster_size: usize) -> Result<ClusteredModes> {
    let kept = kept_labels(clustered.labels(), min_cluster_size);
    let rows: Vec<usize> = clustered
        .labels()
        .iter()
        .enumerate()
        .filter(|(_, label)| **label >= 0 && kept.contains(*label))
        .map(|(row, _)| row)
        .collect();

    let labels: Vec<i32> = rows.iter().map(|&row| clustered.labels()[row]).collect();
    let result = ClusteredModes::new(clustered.modes().select_rows(&rows), factorize(&labels))?;

    debug!(
        "Kept {} of {} modes in {} clusters larger than {}",
        result.len(), clustered.len(), result.cluster_count(), min_cluster_size
    );
    Ok(result)
}

/// Keeps every row; rows of clusters not larger than `min_cluster_size` become
/// noise and the remaining clusters are renumbered from zero.
pub fn mark_small_clusters_as_noise(clustered: &ClusteredModes, min_cluster_size: usize) -> Result<NoisePreserved> {
    let kept = kept_labels(clustered.labels(), min_cluster_size);
    let folded: Vec<i32> = clustered
        .labels()
        .iter()
        .map(|label| if kept.contains(label) { *label } else { NOISE_LABEL })
        .collect();

    let modes = ClusteredModes::new(clustered.modes().clone(), factorize(&folded))?;
    let noise_count = modes.noise_count();

    debug!(
        "{} clusters larger than {}, {} of {} modes marked as noise",
        modes.cluster_count(), min_cluster_size, noise_count, modes.len()
    );
    Ok(NoisePreserved { modes, noise_count })
}
