use std::collections::BTreeMap;
use log::debug;
use ndarray::Array2;
use crate::error::{Error, Result};
use crate::types::ModalTable;

/// Name of the optional temporal feature appended after the configured columns.
pub const TIME_DIFF_COLUMN: &str = "time_diff";

/// Numeric feature matrix handed to the density clustering backend.
/// One row per selected mode, one column per feature, in `names` order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub names: Vec<String>,
    pub values: Array2<f64>,
}

impl FeatureMatrix {
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values.column(i).to_vec())
    }

    /// Fails on the first NaN or infinite entry; the density backends cannot
    /// place such a row.
    pub fn check_finite(&self) -> Result<()> {
        for ((row, col), value) in self.values.indexed_iter() {
            if !value.is_finite() {
                return Err(Error::shape(format!(
                    "non-finite value {} in feature '{}' at row {}",
                    value, self.names[col], row
                )));
            }
        }
        Ok(())
    }

    /// Row-major copy, the layout the hierarchical backend consumes.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values.outer_iter().map(|row| row.to_vec()).collect()
    }
}

/// Rescales the configured feature columns so heterogeneous physical units
/// weigh comparably in the density clustering.
///
/// The table index is dropped: rows are addressed by position only, so time
/// gaps in the monitoring data do not leak into distances. Damping columns get
/// a `+1` bias before scaling. With `index_divider`, a `time_diff` feature of
/// `position / index_divider` is appended.
pub fn scale_features<S: AsRef<str>>(
    modes: &ModalTable,
    cols: &[S],
    multipliers: &BTreeMap<String, f64>,
    index_divider: Option<f64>,
) -> Result<FeatureMatrix> {
    let mut names: Vec<String> = cols.iter().map(|c| c.as_ref().to_string()).collect();

    if let Some(key) = multipliers.keys().find(|k| !names.contains(k)) {
        return Err(Error::MissingColumns(vec![key.clone()]));
    }

    let mut features = Vec::with_capacity(names.len() + 1);
    for name in &names {
        let column = modes
            .column(name)
            .ok_or_else(|| Error::MissingColumns(vec![name.clone()]))?;
        let scaled: Vec<f64> = match multipliers.get(name) {
            Some(&m) if name.contains("damping") => column.iter().map(|v| (v + 1.0) * m).collect(),
            Some(&m) => column.iter().map(|v| v * m).collect(),
            None => column.to_vec(),
        };
        features.push(scaled);
    }

    if let Some(divider) = index_divider {
        // Positions restart at zero, so the first row's offset is always 0
        features.push((0..modes.len()).map(|pos| pos as f64 / divider).collect());
        names.push(TIME_DIFF_COLUMN.to_string());
    }

    let nrows = modes.len();
    let ncols = features.len();
    let values = Array2::from_shape_fn((nrows, ncols), |(row, col)| features[col][row]);
    debug!("Scaled {} modes into features {:?}", nrows, names);

    let matrix = FeatureMatrix { names, values };
    matrix.check_finite()?;
    Ok(matrix)
}
