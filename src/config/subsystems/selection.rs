// src/config/subsystems/selection.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;
use crate::types::FrequencyRange;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Modes must be strictly larger than this.
    pub min_size: f64,
    /// Modes must be strictly less damped than this.
    pub max_damping: f64,
    pub frequency_range: Option<FrequencyRange>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_size: 5.0,
            max_damping: 5.0,
            frequency_range: None,
        }
    }
}

impl FromIni for SelectionConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "selection" {
            return None;
        }

        match key {
            "min_size" => match value.parse::<f64>() {
                Ok(size) => {
                    self.min_size = size;
                    Some(Ok(()))
                },
                Err(_) => Some(Err(Error::Config(format!("Invalid min_size: {}", value)))),
            },
            "max_damping" => match value.parse::<f64>() {
                Ok(damping) => {
                    self.max_damping = damping;
                    Some(Ok(()))
                },
                Err(_) => Some(Err(Error::Config(format!("Invalid max_damping: {}", value)))),
            },
            "frequency_range" => {
                let value = value.trim_matches('"').trim();
                if value.is_empty() || value.eq_ignore_ascii_case("none") {
                    self.frequency_range = None;
                    return Some(Ok(()));
                }
                let bounds: Vec<&str> = value.split(',').map(str::trim).collect();
                match bounds.as_slice() {
                    [low, high] => match (low.parse::<f64>(), high.parse::<f64>()) {
                        (Ok(low), Ok(high)) => {
                            self.frequency_range = Some(FrequencyRange::new(low, high));
                            Some(Ok(()))
                        },
                        _ => Some(Err(Error::Config(format!("Invalid frequency_range: {}", value)))),
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid frequency_range (expected 'low, high'): {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

impl SelectionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_damping.is_nan() || self.min_size.is_nan() {
            return Err(Error::Config("min_size and max_damping must be numbers".to_string()));
        }
        if let Some(band) = self.frequency_range {
            if !(band.low <= band.high) {
                return Err(Error::Config(format!(
                    "frequency_range low ({}) must not exceed high ({})",
                    band.low, band.high
                )));
            }
        }
        Ok(())
    }
}
