use log::debug;
use crate::error::{Error, Result};
use crate::types::ModalTable;

/// Checks whether every required column is present in the table.
pub fn check_columns<S: AsRef<str>>(cols: &[S], modes: &ModalTable) -> bool {
    cols.iter().all(|col| modes.has_column(col.as_ref()))
}

/// Strict form of [`check_columns`]: fails with the list of absent columns.
pub fn validate_columns<S: AsRef<str>>(cols: &[S], modes: &ModalTable) -> Result<()> {
    let missing: Vec<String> = cols
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| !modes.has_column(c))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        debug!("Validation failed, missing columns: {:?}", missing);
        Err(Error::MissingColumns(missing))
    }
}
