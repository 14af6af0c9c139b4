// src/config/subsystems/predict.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictConfig {
    /// Clusters need strictly more rows than this to survive.
    pub min_cluster_size: usize,
    /// Keep every row and mark dropped clusters as noise instead of removing them.
    pub keep_noise: bool,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            min_cluster_size: 1000,
            keep_noise: false,
        }
    }
}

impl FromIni for PredictConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "predict" {
            return None;
        }

        match key {
            "min_cluster_size" => match value.parse::<usize>() {
                Ok(size) => {
                    self.min_cluster_size = size;
                    Some(Ok(()))
                },
                Err(_) => Some(Err(Error::Config(format!("Invalid min_cluster_size: {}", value)))),
            },
            "keep_noise" => match value.trim_matches('"').to_lowercase().parse::<bool>() {
                Ok(keep) => {
                    self.keep_noise = keep;
                    Some(Ok(()))
                },
                Err(_) => Some(Err(Error::Config(format!("Invalid keep_noise: {}", value)))),
            },
            _ => None,
        }
    }
}
