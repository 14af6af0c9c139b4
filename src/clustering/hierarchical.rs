use serde::{Serialize, Deserialize};
use log::debug;
use ::hdbscan::{DistanceMetric, HdbscanHyperParams};
use crate::error::{Error, Result};
use crate::features::FeatureMatrix;
use super::DensityAlgorithm;

/// Distance metric for the hierarchical backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Euclidean,
    Manhattan,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Euclidean => "euclidean",
            Metric::Manhattan => "manhattan",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_matches('"').to_lowercase().as_str() {
            "euclidean" => Some(Self::Euclidean),
            "manhattan" | "cityblock" => Some(Self::Manhattan),
            _ => None,
        }
    }
}

impl From<Metric> for DistanceMetric {
    fn from(metric: Metric) -> Self {
        match metric {
            Metric::Euclidean => DistanceMetric::Euclidean,
            Metric::Manhattan => DistanceMetric::Manhattan,
        }
    }
}

/// HDBSCAN over the scaled modal features, backed by the `hdbscan` crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hdbscan {
    /// Smallest group of modes the hierarchy accepts as a cluster.
    pub min_cluster_size: usize,
    /// Core point neighbourhood size; `None` means `min_cluster_size`.
    pub min_samples: Option<usize>,
    pub metric: Metric,
}

impl Default for Hdbscan {
    fn default() -> Self {
        Self {
            min_cluster_size: 5,
            min_samples: None,
            metric: Metric::Euclidean,
        }
    }
}

impl Hdbscan {
    pub fn new(min_cluster_size: usize, min_samples: Option<usize>, metric: Metric) -> Self {
        Self { min_cluster_size, min_samples, metric }
    }

    pub fn effective_min_samples(&self) -> usize {
        self.min_samples.unwrap_or(self.min_cluster_size)
    }
}

impl DensityAlgorithm for Hdbscan {
    fn name(&self) -> &'static str {
        "hdbscan"
    }

    fn cluster(&self, features: &FeatureMatrix) -> Result<Vec<i32>> {
        if self.min_cluster_size < 2 {
            return Err(Error::clustering(format!(
                "HDBSCAN min_cluster_size must be at least 2, got {}",
                self.min_cluster_size
            )));
        }
        if features.nrows() < self.effective_min_samples() {
            return Err(Error::clustering(format!(
                "HDBSCAN needs at least min_samples={} modes, got {}",
                self.effective_min_samples(),
                features.nrows()
            )));
        }
        features.check_finite()?;

        debug!(
            "Running HDBSCAN (min_cluster_size={}, min_samples={}, metric={}) on {} modes",
            self.min_cluster_size,
            self.effective_min_samples(),
            self.metric.as_str(),
            features.nrows()
        );

        let rows = features.to_rows();
        let hyper_params = HdbscanHyperParams::builder()
            .min_cluster_size(self.min_cluster_size)
            .min_samples(self.effective_min_samples())
            .dist_metric(self.metric.into())
            .build();
        let clusterer = ::hdbscan::Hdbscan::new(&rows, hyper_params);

        clusterer
            .cluster()
            .map_err(|e| Error::clustering(format!("HDBSCAN failed: {:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use crate::types::NOISE_LABEL;

    #[test]
    fn metric_names_round_trip() {
        for metric in [Metric::Euclidean, Metric::Manhattan] {
            assert_eq!(Metric::from_str(metric.as_str()), Some(metric));
        }
        assert_eq!(Metric::from_str("\"Cityblock\""), Some(Metric::Manhattan));
        assert_eq!(Metric::from_str("cosine"), None);
    }

    #[test]
    fn min_samples_defaults_to_cluster_size() {
        assert_eq!(Hdbscan::default().effective_min_samples(), 5);
        assert_eq!(Hdbscan::new(5, Some(2), Metric::Euclidean).effective_min_samples(), 2);
    }

    #[test]
    fn separates_two_dense_groups() {
        let mut rows = Vec::new();
        for i in 0..12 {
            rows.push([1.0 + (i % 4) as f64 * 0.1, 1.0 + (i / 4) as f64 * 0.1]);
        }
        for i in 0..12 {
            rows.push([50.0 + (i % 4) as f64 * 0.1, 50.0 + (i / 4) as f64 * 0.1]);
        }
        let values = Array2::from_shape_fn((rows.len(), 2), |(r, c)| rows[r][c]);
        let features = FeatureMatrix { names: vec!["x".into(), "y".into()], values };

        let labels = Hdbscan::new(5, Some(3), Metric::Euclidean).cluster(&features).unwrap();
        assert_eq!(labels.len(), 24);
        assert_ne!(labels[5], NOISE_LABEL);
        assert_ne!(labels[17], NOISE_LABEL);
        assert_ne!(labels[5], labels[17]);
    }

    #[test]
    fn rejects_degenerate_cluster_size() {
        let features = FeatureMatrix { names: vec!["x".into()], values: Array2::zeros((3, 1)) };
        let err = Hdbscan::new(1, None, Metric::Euclidean).cluster(&features).unwrap_err();
        assert!(matches!(err, Error::Clustering(_)));
    }

    #[test]
    fn too_few_modes_for_min_samples() {
        let features = FeatureMatrix { names: vec!["x".into()], values: Array2::zeros((3, 1)) };
        let err = Hdbscan::default().cluster(&features).unwrap_err();
        assert!(matches!(err, Error::Clustering(ref msg) if msg.contains("got 3")));
    }

    #[test]
    fn nan_feature_is_an_error() {
        let values = Array2::from_shape_fn((10, 1), |(r, _)| if r == 4 { f64::NAN } else { r as f64 });
        let features = FeatureMatrix { names: vec!["frequency".into()], values };
        let err = Hdbscan::default().cluster(&features).unwrap_err();
        assert!(matches!(err, Error::Shape(_)));
    }
}
