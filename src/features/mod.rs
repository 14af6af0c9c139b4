pub mod scaler;

pub use self::scaler::{scale_features, FeatureMatrix, TIME_DIFF_COLUMN};
