// src/config/subsystems/input.rs

use serde::{Serialize, Deserialize};
use crate::error::Result;
use crate::config::FromIni;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// CSV column holding the observation time stamps. Rows are indexed by
    /// position when unset.
    pub index_column: Option<String>,
}

impl FromIni for InputConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        match (section_name, key) {
            ("input", "index_column") => {
                let value = value.trim_matches('"');
                self.index_column = if value.is_empty() { None } else { Some(value.to_string()) };
                Some(Ok(()))
            },
            _ => None,
        }
    }
}
