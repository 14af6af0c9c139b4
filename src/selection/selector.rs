use log::debug;
use crate::error::{Error, Result};
use crate::types::{FrequencyRange, ModalTable};
use super::{DAMPING_COLUMNS, FREQUENCY_COLUMNS, SIZE_COLUMN};

/// Picks `mean_frequency` over `frequency`.
pub fn resolve_frequency_column(modes: &ModalTable) -> Result<&'static str> {
    modes.first_present(&FREQUENCY_COLUMNS).ok_or(Error::MissingFrequency)
}

/// Picks `damping` over `mean_damping`.
pub fn resolve_damping_column(modes: &ModalTable) -> Result<&'static str> {
    modes.first_present(&DAMPING_COLUMNS).ok_or(Error::MissingDamping)
}

/// Selects the physically plausible modes used for clustering.
///
/// Small modes (`size <= min_size`) and highly damped modes
/// (`damping >= max_damping`) are non-physical and removed. When a frequency
/// band is given, only modes inside `[low, high]` are kept. Column resolution
/// happens before any row is touched, so a missing column fails fast.
///
/// The `cols` argument lists the feature columns the caller clusters on; they
/// are carried through untouched.
pub fn select_modes<S: AsRef<str>>(
    modes: &ModalTable,
    cols: &[S],
    min_size: f64,
    max_damping: f64,
    frequency_range: Option<FrequencyRange>,
) -> Result<ModalTable> {
    let frequency_col = resolve_frequency_column(modes)?;
    let damping_col = resolve_damping_column(modes)?;
    let size = modes
        .column(SIZE_COLUMN)
        .ok_or_else(|| Error::MissingColumns(vec![SIZE_COLUMN.to_string()]))?;
    // Resolution above guarantees both columns exist
    let frequency = modes.column(frequency_col).ok_or(Error::MissingFrequency)?;
    let damping = modes.column(damping_col).ok_or(Error::MissingDamping)?;

    debug!(
        "Selecting {} modes on columns {:?} (frequency='{}', damping='{}')",
        modes.len(),
        cols.iter().map(|c| c.as_ref()).collect::<Vec<_>>(),
        frequency_col,
        damping_col
    );

    let mut mask = vec![true; modes.len()];

    if let Some(band) = frequency_range {
        for (keep, &f) in mask.iter_mut().zip(frequency) {
            *keep = band.contains(f);
        }
        debug!(
            "  {} modes inside [{}, {}] Hz",
            mask.iter().filter(|&&k| k).count(), band.low, band.high
        );
    }

    for (keep, &s) in mask.iter_mut().zip(size) {
        *keep &= s > min_size;
    }
    debug!("  {} modes with size > {}", mask.iter().filter(|&&k| k).count(), min_size);

    for (keep, &d) in mask.iter_mut().zip(damping) {
        *keep &= d < max_damping;
    }
    debug!("  {} modes with damping < {}", mask.iter().filter(|&&k| k).count(), max_damping);

    modes.filter(&mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLS: [&str; 3] = ["frequency", "size", "damping"];

    fn modes() -> ModalTable {
        ModalTable::from_columns(vec![
            ("frequency", vec![0.5, 1.0, 1.5, 2.0, 2.5]),
            ("size", vec![10.0, 10.0, 3.0, 10.0, 10.0]),
            ("damping", vec![1.0, 1.0, 1.0, 6.0, 1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn valid_data_passes_unchanged() {
        let valid = modes().filter(&[true, true, false, false, true]).unwrap();
        let selected = select_modes(&valid, &COLS, 5.0, 5.0, None).unwrap();
        assert_eq!(selected, valid);
    }

    #[test]
    fn removes_small_and_highly_damped_modes() {
        let selected = select_modes(&modes(), &COLS, 5.0, 5.0, None).unwrap();
        assert_eq!(selected.column("frequency").unwrap(), &[0.5, 1.0, 2.5]);
        assert_eq!(selected.index(), &["0", "1", "4"]);
    }

    #[test]
    fn thresholds_are_exclusive() {
        let selected = select_modes(&modes(), &COLS, 10.0, 1.0, None).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn frequency_band_bounds_are_inclusive() {
        let band = FrequencyRange::new(1.0, 2.5);
        let selected = select_modes(&modes(), &COLS, 5.0, 5.0, Some(band)).unwrap();
        assert_eq!(selected.column("frequency").unwrap(), &[1.0, 2.5]);
    }

    #[test]
    fn prefers_mean_frequency() {
        let modes = ModalTable::from_columns(vec![
            ("frequency", vec![1.0, 9.0]),
            ("mean_frequency", vec![9.0, 1.0]),
            ("size", vec![10.0, 10.0]),
            ("damping", vec![1.0, 1.0]),
        ])
        .unwrap();
        let band = FrequencyRange::new(0.0, 2.0);
        let selected = select_modes(&modes, &COLS, 5.0, 5.0, Some(band)).unwrap();
        assert_eq!(selected.index(), &["1"]);
    }

    #[test]
    fn falls_back_to_mean_damping() {
        let modes = ModalTable::from_columns(vec![
            ("frequency", vec![1.0, 2.0]),
            ("size", vec![10.0, 10.0]),
            ("mean_damping", vec![1.0, 7.0]),
        ])
        .unwrap();
        let selected = select_modes(&modes, &["frequency"], 5.0, 5.0, None).unwrap();
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn missing_damping_fails_before_filtering() {
        let modes = ModalTable::from_columns(vec![
            ("frequency", vec![1.0]),
            ("size", vec![0.0]),
        ])
        .unwrap();
        let err = select_modes(&modes, &["frequency"], 5.0, 5.0, None).unwrap_err();
        assert!(matches!(err, Error::MissingDamping));
    }

    #[test]
    fn missing_frequency_is_reported() {
        let modes = ModalTable::from_columns(vec![
            ("size", vec![10.0]),
            ("damping", vec![1.0]),
        ])
        .unwrap();
        let err = select_modes(&modes, &["size"], 5.0, 5.0, None).unwrap_err();
        assert!(matches!(err, Error::MissingFrequency));
    }
}
