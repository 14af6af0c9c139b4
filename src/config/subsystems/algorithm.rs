// src/config/subsystems/algorithm.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;
use crate::clustering::{DensityAlgorithm, Dbscan, Hdbscan, Metric};
use crate::features::FeatureMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    #[default]
    Dbscan,
    Hdbscan,
}

impl AlgorithmKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmKind::Dbscan => "dbscan",
            AlgorithmKind::Hdbscan => "hdbscan",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_matches('"').to_lowercase().as_str() {
            "dbscan" => Some(Self::Dbscan),
            "hdbscan" => Some(Self::Hdbscan),
            _ => None,
        }
    }
}

/// Backend selection plus the parameters of both backends. Only the
/// parameters of `kind` are used when clustering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlgorithmConfig {
    pub kind: AlgorithmKind,
    pub dbscan: Dbscan,
    pub hdbscan: Hdbscan,
}

impl DensityAlgorithm for AlgorithmConfig {
    fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    fn cluster(&self, features: &FeatureMatrix) -> Result<Vec<i32>> {
        match self.kind {
            AlgorithmKind::Dbscan => self.dbscan.cluster(features),
            AlgorithmKind::Hdbscan => self.hdbscan.cluster(features),
        }
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .parse::<usize>()
        .map_err(|_| Error::Config(format!("Invalid {}: {}", key, value)))
}

impl FromIni for AlgorithmConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        match (section_name, key) {
            ("algorithm", "kind") => {
                self.kind = match AlgorithmKind::from_str(value) {
                    Some(kind) => kind,
                    None => return Some(Err(Error::Config(
                        format!("Invalid clustering algorithm: {}", value)
                    ))),
                };
                Some(Ok(()))
            },
            ("dbscan", "eps") => match value.parse::<f64>() {
                Ok(eps) => {
                    self.dbscan.eps = eps;
                    Some(Ok(()))
                },
                Err(_) => Some(Err(Error::Config(format!("Invalid eps: {}", value)))),
            },
            ("dbscan", "min_samples") => Some(parse_count(key, value).map(|n| self.dbscan.min_samples = n)),
            ("hdbscan", "min_cluster_size") => {
                Some(parse_count(key, value).map(|n| self.hdbscan.min_cluster_size = n))
            },
            ("hdbscan", "min_samples") => {
                if value.trim_matches('"').eq_ignore_ascii_case("none") {
                    self.hdbscan.min_samples = None;
                    return Some(Ok(()));
                }
                Some(parse_count(key, value).map(|n| self.hdbscan.min_samples = Some(n)))
            },
            ("hdbscan", "metric") => {
                self.hdbscan.metric = match Metric::from_str(value) {
                    Some(metric) => metric,
                    None => return Some(Err(Error::Config(
                        format!("Invalid distance metric: {}", value)
                    ))),
                };
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl AlgorithmConfig {
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            AlgorithmKind::Dbscan => {
                if !(self.dbscan.eps > 0.0) {
                    return Err(Error::Config(format!("eps must be positive: {}", self.dbscan.eps)));
                }
                if self.dbscan.min_samples < 2 {
                    return Err(Error::Config(format!(
                        "dbscan min_samples must be at least 2: {}",
                        self.dbscan.min_samples
                    )));
                }
            },
            AlgorithmKind::Hdbscan => {
                if self.hdbscan.min_cluster_size < 2 {
                    return Err(Error::Config(format!(
                        "hdbscan min_cluster_size must be at least 2: {}",
                        self.hdbscan.min_cluster_size
                    )));
                }
                if self.hdbscan.min_samples == Some(0) {
                    return Err(Error::Config("hdbscan min_samples must be positive".to_string()));
                }
            },
        }
        Ok(())
    }
}
