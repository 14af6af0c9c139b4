// src/config/subsystems/features.rs

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Feature columns, in the order they are handed to the clustering backend.
    pub cols: Vec<String>,
    /// Per-column scale factors. Damping columns are scaled as `(damping + 1)`.
    pub multipliers: BTreeMap<String, f64>,
    /// Adds a `time_diff` feature of `position / index_divider` when set.
    pub index_divider: Option<f64>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            cols: vec!["frequency".to_string(), "size".to_string(), "damping".to_string()],
            multipliers: BTreeMap::from([
                ("frequency".to_string(), 40.0),
                ("size".to_string(), 0.5),
                ("damping".to_string(), 1.0),
            ]),
            index_divider: None,
        }
    }
}

impl FromIni for FeatureConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        match (section_name, key) {
            ("features", "cols") => {
                let cols: Vec<String> = value
                    .trim_matches('"')
                    .split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect();
                if cols.is_empty() {
                    return Some(Err(Error::Config("cols must name at least one column".to_string())));
                }
                self.cols = cols;
                Some(Ok(()))
            },
            ("features", "index_divider") => {
                let value = value.trim_matches('"');
                if value.eq_ignore_ascii_case("none") {
                    self.index_divider = None;
                    return Some(Ok(()));
                }
                match value.parse::<f64>() {
                    Ok(divider) => {
                        self.index_divider = Some(divider);
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(format!("Invalid index_divider: {}", value)))),
                }
            },
            // Any key in this section names a column
            ("features.multipliers", column) => match value.parse::<f64>() {
                Ok(multiplier) => {
                    self.multipliers.insert(column.to_string(), multiplier);
                    Some(Ok(()))
                },
                Err(_) => Some(Err(Error::Config(
                    format!("Invalid multiplier for {}: {}", column, value)
                ))),
            },
            _ => None,
        }
    }
}

impl FeatureConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cols.is_empty() {
            return Err(Error::Config("cols must name at least one column".to_string()));
        }
        if let Some(key) = self.multipliers.keys().find(|k| !self.cols.contains(k)) {
            return Err(Error::Config(format!(
                "multiplier '{}' does not match any feature column {:?}",
                key, self.cols
            )));
        }
        if let Some(divider) = self.index_divider {
            if divider == 0.0 || !divider.is_finite() {
                return Err(Error::Config(format!("index_divider must be finite and non-zero: {}", divider)));
            }
        }
        Ok(())
    }
}
