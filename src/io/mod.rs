pub mod csv;

pub use self::csv::{read_modal_csv, write_clustered_csv, write_summary_json};
