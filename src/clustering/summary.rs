use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::selection::{resolve_damping_column, resolve_frequency_column, SIZE_COLUMN};
use crate::types::ClusteredModes;

/// Frequency band and mean modal parameters of one surviving cluster, the
/// starting point for configuring a mode tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub label: i32,
    pub count: usize,
    pub mean_frequency: f64,
    pub min_frequency: f64,
    pub max_frequency: f64,
    pub mean_damping: f64,
    pub mean_size: f64,
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    frequency_sum: f64,
    min_frequency: f64,
    max_frequency: f64,
    damping_sum: f64,
    size_sum: f64,
}

/// One summary per non-noise label, in ascending label order.
pub fn summarize(clustered: &ClusteredModes) -> Result<Vec<ClusterSummary>> {
    let modes = clustered.modes();
    let frequency = modes
        .column(resolve_frequency_column(modes)?)
        .ok_or(Error::MissingFrequency)?;
    let damping = modes
        .column(resolve_damping_column(modes)?)
        .ok_or(Error::MissingDamping)?;
    let size = modes
        .column(SIZE_COLUMN)
        .ok_or_else(|| Error::MissingColumns(vec![SIZE_COLUMN.to_string()]))?;

    let mut clusters: BTreeMap<i32, Accumulator> = BTreeMap::new();
    for (row, &label) in clustered.labels().iter().enumerate() {
        if label < 0 {
            continue;
        }
        let acc = clusters.entry(label).or_insert_with(|| Accumulator {
            min_frequency: f64::INFINITY,
            max_frequency: f64::NEG_INFINITY,
            ..Accumulator::default()
        });
        acc.count += 1;
        acc.frequency_sum += frequency[row];
        acc.min_frequency = acc.min_frequency.min(frequency[row]);
        acc.max_frequency = acc.max_frequency.max(frequency[row]);
        acc.damping_sum += damping[row];
        acc.size_sum += size[row];
    }

    Ok(clusters
        .into_iter()
        .map(|(label, acc)| {
            let n = acc.count as f64;
            ClusterSummary {
                label,
                count: acc.count,
                mean_frequency: acc.frequency_sum / n,
                min_frequency: acc.min_frequency,
                max_frequency: acc.max_frequency,
                mean_damping: acc.damping_sum / n,
                mean_size: acc.size_sum / n,
            }
        })
        .collect())
}
