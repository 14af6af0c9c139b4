//! oma_clustering groups the per-timestamp mode estimates of an Operational
//! Modal Analysis into persistent clusters. Each cluster marks a frequency band
//! holding a stable physical mode, which mode tracking can be configured from.
//!
//! The pipeline selects plausible modes, scales the modal features, runs a
//! density clustering backend (DBSCAN or HDBSCAN) and drops clusters that are
//! too small.

// Module declarations
pub mod error;
pub mod types;
pub mod config;
pub mod selection;
pub mod features;
pub mod clustering;
pub mod colormap;
pub mod io;

// Re-exports
pub use error::{Error, Result};
pub use types::{ClusteredModes, FrequencyRange, ModalTable, NOISE_LABEL};
pub use clustering::{
    DensityAlgorithm,
    Dbscan,
    Hdbscan,
    Metric,
    ModeClusterer,
    FittedModes,
    NoisePreserved,
};
pub use colormap::generate_colormap;

// Re-export the config from config module
pub use config::ClusteringConfig;
