pub mod selection;
pub mod features;
pub mod algorithm;
pub mod predict;
pub mod logging;
pub mod input;

pub use selection::SelectionConfig;
pub use features::FeatureConfig;
pub use algorithm::{AlgorithmConfig, AlgorithmKind};
pub use predict::PredictConfig;
pub use logging::LoggingConfig;
pub use input::InputConfig;
