pub mod validator;
pub mod selector;

pub use self::validator::{check_columns, validate_columns};
pub use self::selector::{select_modes, resolve_frequency_column, resolve_damping_column};

/// Frequency column names, most preferred first.
pub const FREQUENCY_COLUMNS: [&str; 2] = ["mean_frequency", "frequency"];

/// Damping column names, most preferred first.
pub const DAMPING_COLUMNS: [&str; 2] = ["damping", "mean_damping"];

pub const SIZE_COLUMN: &str = "size";
