use serde::{Serialize, Deserialize};
use ahash::AHashMap;
use crate::error::{Error, Result};

/// Label assigned to rows that belong to no sufficiently large cluster.
pub const NOISE_LABEL: i32 = -1;

/// Name of the label column when a clustered table is written out.
pub const LABELS_COLUMN: &str = "labels";

/// Inclusive frequency band used to restrict a clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRange {
    pub low: f64,
    pub high: f64,
}

impl FrequencyRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, frequency: f64) -> bool {
        frequency >= self.low && frequency <= self.high
    }
}

/// Modal observations: one row per detected mode instance, one named numeric
/// column per modal parameter. The index carries the observation time (or the
/// original row position when the source had no explicit index).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModalTable {
    index: Vec<String>,
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl ModalTable {
    /// Builds a table with an implicit positional index.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> Result<Self> {
        let rows = columns.first().map(|(_, values)| values.len()).unwrap_or(0);
        let index = (0..rows).map(|i| i.to_string()).collect();
        Self::with_index(index, columns)
    }

    pub fn with_index<S: Into<String>>(index: Vec<String>, columns: Vec<(S, Vec<f64>)>) -> Result<Self> {
        let mut names = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(columns.len());

        for (name, column) in columns {
            let name = name.into();
            if column.len() != index.len() {
                return Err(Error::shape(format!(
                    "column '{}' has {} rows, index has {}",
                    name, column.len(), index.len()
                )));
            }
            if names.contains(&name) {
                return Err(Error::shape(format!("duplicate column '{}'", name)));
            }
            names.push(name);
            values.push(column);
        }

        Ok(Self { index, names, columns: values })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Returns the first column of `candidates` present in the table.
    pub fn first_present<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.iter().copied().find(|name| self.has_column(name))
    }

    /// Keeps the rows whose mask entry is true. The mask must span every row.
    pub fn filter(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.len() {
            return Err(Error::shape(format!(
                "row mask has {} entries, table has {} rows",
                mask.len(), self.len()
            )));
        }
        let keep: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &k)| k.then_some(i))
            .collect();
        Ok(self.select_rows(&keep))
    }

    /// Copies the given rows, in the given order. Indices must be in bounds.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            index: rows.iter().map(|&r| self.index[r].clone()).collect(),
            names: self.names.clone(),
            columns: self
                .columns
                .iter()
                .map(|column| rows.iter().map(|&r| column[r]).collect())
                .collect(),
        }
    }
}

/// A modal table together with one cluster label per row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClusteredModes {
    modes: ModalTable,
    labels: Vec<i32>,
}

impl ClusteredModes {
    pub fn new(modes: ModalTable, labels: Vec<i32>) -> Result<Self> {
        if modes.len() != labels.len() {
            return Err(Error::shape(format!(
                "{} labels for {} rows", labels.len(), modes.len()
            )));
        }
        Ok(Self { modes, labels })
    }

    pub fn modes(&self) -> &ModalTable {
        &self.modes
    }

    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    pub fn into_parts(self) -> (ModalTable, Vec<i32>) {
        (self.modes, self.labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Rows per distinct label, noise included.
    pub fn label_counts(&self) -> AHashMap<i32, usize> {
        let mut counts = AHashMap::new();
        for &label in &self.labels {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    /// Number of distinct non-noise labels.
    pub fn cluster_count(&self) -> usize {
        self.label_counts().keys().filter(|&&l| l != NOISE_LABEL).count()
    }

    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == NOISE_LABEL).count()
    }
}
