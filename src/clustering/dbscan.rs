use serde::{Serialize, Deserialize};
use log::debug;
use ndarray::Array1;
use linfa::ParamGuard;
use linfa::traits::Transformer;
use crate::error::{Error, Result};
use crate::features::FeatureMatrix;
use crate::types::NOISE_LABEL;
use super::DensityAlgorithm;

/// DBSCAN over the scaled modal features, backed by `linfa-clustering`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dbscan {
    /// Maximum distance between two modes for them to be neighbours.
    pub eps: f64,
    /// Neighbourhood population for a mode to be a core point, itself included.
    pub min_samples: usize,
}

impl Default for Dbscan {
    fn default() -> Self {
        Self {
            eps: 5.0,
            min_samples: 100,
        }
    }
}

impl Dbscan {
    pub fn new(eps: f64, min_samples: usize) -> Self {
        Self { eps, min_samples }
    }
}

impl DensityAlgorithm for Dbscan {
    fn name(&self) -> &'static str {
        "dbscan"
    }

    fn cluster(&self, features: &FeatureMatrix) -> Result<Vec<i32>> {
        features.check_finite()?;
        let params = linfa_clustering::Dbscan::params(self.min_samples)
            .tolerance(self.eps)
            .check()
            .map_err(|e| Error::clustering(format!("invalid DBSCAN parameters: {}", e)))?;

        debug!(
            "Running DBSCAN (eps={}, min_samples={}) on {} modes",
            self.eps, self.min_samples, features.nrows()
        );
        let memberships: Array1<Option<usize>> = params.transform(&features.values);

        memberships
            .iter()
            .map(|m| match m {
                Some(id) => i32::try_from(*id)
                    .map_err(|_| Error::clustering(format!("cluster id {} out of range", id))),
                None => Ok(NOISE_LABEL),
            })
            .collect()
    }
}
