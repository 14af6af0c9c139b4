pub mod subsystems;

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use crate::error::Result;
use log::{warn, trace};

pub trait FromIni {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusteringConfig {
    pub input: subsystems::InputConfig,
    pub selection: subsystems::SelectionConfig,
    pub features: subsystems::FeatureConfig,
    pub algorithm: subsystems::AlgorithmConfig,
    pub predict: subsystems::PredictConfig,
    pub logging: subsystems::LoggingConfig,
}

impl ClusteringConfig {
    pub fn validate(&self) -> Result<()> {
        self.selection.validate()?;
        self.features.validate()?;
        self.algorithm.validate()?;
        Ok(())
    }

    pub fn from_ini<P: AsRef<Path>>(path: P) -> Result<Self> {
        trace!("Loading configuration from: {:?}", path.as_ref());
        let content = fs::read_to_string(&path)?;
        Self::from_ini_str(&content)
    }

    /// Parses INI text. Unknown keys and malformed values are logged and
    /// skipped, then the resulting configuration is validated.
    pub fn from_ini_str(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut current_section = String::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len()-1].trim().to_string();
                trace!("  Line {}: Found section: [{}]", line_num + 1, current_section);
                // An explicit multiplier section replaces the default multipliers
                if current_section == "features.multipliers" {
                    config.features.multipliers.clear();
                }
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                // Delegate to appropriate subsystem config
                if let Some(result) = match current_section.as_str() {
                    "input" => config.input.from_ini_section(&current_section, key, value),
                    "selection" => config.selection.from_ini_section(&current_section, key, value),
                    "features" | "features.multipliers" => {
                        config.features.from_ini_section(&current_section, key, value)
                    },
                    "algorithm" | "dbscan" | "hdbscan" => {
                        config.algorithm.from_ini_section(&current_section, key, value)
                    },
                    "predict" => config.predict.from_ini_section(&current_section, key, value),
                    "logging" => config.logging.from_ini_section(&current_section, key, value),
                    _ => None,
                } {
                    if let Err(e) = result {
                        warn!("Error processing config key {}={}: {}", key, value, e);
                    }
                } else {
                    warn!("Unrecognized config key: {}={} in section [{}]", key, value, current_section);
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}
