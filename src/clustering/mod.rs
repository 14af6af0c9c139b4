// clustering/mod.rs
pub mod dbscan;
pub mod hierarchical;
pub mod clusterer;
pub mod postprocess;
pub mod summary;

use crate::error::Result;
use crate::features::FeatureMatrix;

/// A density clustering backend: assigns one label per feature row, with
/// `-1` for noise and non-negative ids for clusters.
pub trait DensityAlgorithm {
    fn name(&self) -> &'static str;

    fn cluster(&self, features: &FeatureMatrix) -> Result<Vec<i32>>;
}

pub use self::dbscan::Dbscan;
pub use self::hierarchical::{Hdbscan, Metric};
pub use self::clusterer::{FittedModes, ModeClusterer};
pub use self::postprocess::{factorize, filter_clusters, mark_small_clusters_as_noise, NoisePreserved};
pub use self::summary::{summarize, ClusterSummary};
