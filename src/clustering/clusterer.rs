use log::info;
use crate::config::subsystems::{FeatureConfig, SelectionConfig};
use crate::error::Result;
use crate::features::{scale_features, FeatureMatrix};
use crate::selection::{select_modes, validate_columns};
use crate::types::{ClusteredModes, FrequencyRange, ModalTable};
use super::DensityAlgorithm;
use super::postprocess::{filter_clusters, mark_small_clusters_as_noise, NoisePreserved};

/// Clusters modal observations with a density clustering backend.
///
/// The clusterer itself is immutable: every [`fit`](Self::fit) returns a fresh
/// [`FittedModes`] that owns the labeled selection, so refitting never
/// disturbs an earlier result.
#[derive(Debug, Clone)]
pub struct ModeClusterer<A> {
    pub algorithm: A,
    pub selection: SelectionConfig,
    pub features: FeatureConfig,
}

impl<A: DensityAlgorithm> ModeClusterer<A> {
    /// Clusterer with the default selection thresholds and feature scaling.
    pub fn new(algorithm: A) -> Self {
        Self {
            algorithm,
            selection: SelectionConfig::default(),
            features: FeatureConfig::default(),
        }
    }

    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_features(mut self, features: FeatureConfig) -> Self {
        self.features = features;
        self
    }

    /// Physically plausible subset of `modes` inside the frequency band.
    pub fn select_data(&self, modes: &ModalTable, frequency_range: Option<FrequencyRange>) -> Result<ModalTable> {
        select_modes(
            modes,
            &self.features.cols,
            self.selection.min_size,
            self.selection.max_damping,
            frequency_range,
        )
    }

    /// Validates, selects, scales and clusters the modes.
    ///
    /// `frequency_range` overrides the configured band; with `None` the
    /// configured band (if any) applies.
    pub fn fit(&self, modes: &ModalTable, frequency_range: Option<FrequencyRange>) -> Result<FittedModes> {
        validate_columns(&self.features.cols, modes)?;

        let band = frequency_range.or(self.selection.frequency_range);
        let selected = self.select_data(modes, band)?;
        let features = scale_features(
            &selected,
            &self.features.cols,
            &self.features.multipliers,
            self.features.index_divider,
        )?;

        let labels = if selected.is_empty() {
            Vec::new()
        } else {
            self.algorithm.cluster(&features)?
        };
        let clustered = ClusteredModes::new(selected, labels)?;

        info!(
            "{} fit: {} of {} modes selected, {} raw clusters, {} noise",
            self.algorithm.name(),
            clustered.len(),
            modes.len(),
            clustered.cluster_count(),
            clustered.noise_count()
        );

        Ok(FittedModes {
            clustered,
            features,
            algorithm: self.algorithm.name(),
        })
    }
}

/// Outcome of one fit: the selected modes with their raw backend labels and
/// the feature matrix they were clustered on.
#[derive(Debug, Clone)]
pub struct FittedModes {
    clustered: ClusteredModes,
    features: FeatureMatrix,
    algorithm: &'static str,
}

impl FittedModes {
    pub fn clustered(&self) -> &ClusteredModes {
        &self.clustered
    }

    pub fn labels(&self) -> &[i32] {
        self.clustered.labels()
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    pub fn into_clustered(self) -> ClusteredModes {
        self.clustered
    }

    /// Modes of clusters with more than `min_cluster_size` members,
    /// relabeled from zero. Noise is dropped.
    pub fn predict(&self, min_cluster_size: usize) -> Result<ClusteredModes> {
        filter_clusters(&self.clustered, min_cluster_size)
    }

    /// Every selected mode; members of clusters with at most
    /// `min_cluster_size` modes become noise.
    pub fn predict_with_noise(&self, min_cluster_size: usize) -> Result<NoisePreserved> {
        mark_small_clusters_as_noise(&self.clustered, min_cluster_size)
    }
}
