use std::collections::BTreeMap;
use oma_clustering::{
    ClusteringConfig,
    Dbscan,
    Error,
    FrequencyRange,
    Hdbscan,
    Metric,
    ModalTable,
    ModeClusterer,
    NOISE_LABEL,
    clustering::summarize,
    config::subsystems::{AlgorithmKind, FeatureConfig},
    io::{read_modal_csv, write_clustered_csv},
};

/// Two stable modes (0.30 Hz and 1.20 Hz), three isolated spurious estimates,
/// and rows that fail the plausibility thresholds.
fn monitoring_data() -> ModalTable {
    let mut frequency = Vec::new();
    let mut size = Vec::new();
    let mut damping = Vec::new();

    for i in 0..60 {
        let jitter = (i as f64).sin();
        frequency.push(0.30 + 0.01 * jitter);
        size.push(20.0 + 2.0 * jitter);
        damping.push(1.0 + 0.2 * (i as f64 * 0.7).cos());
    }
    for i in 0..40 {
        let jitter = (i as f64 * 1.3).sin();
        frequency.push(1.20 + 0.01 * jitter);
        size.push(30.0 + 2.0 * jitter);
        damping.push(0.8 + 0.2 * (i as f64).cos());
    }
    for f in [3.0, 5.0, 8.0] {
        frequency.push(f);
        size.push(15.0);
        damping.push(1.0);
    }
    // implausible: tiny, then overdamped
    frequency.extend([0.30, 0.30]);
    size.extend([1.0, 20.0]);
    damping.extend([1.0, 9.0]);

    let index = (0..frequency.len()).map(|i| format!("2023-06-01T{:02}:{:02}", i / 6, (i % 6) * 10)).collect();
    ModalTable::with_index(index, vec![
        ("frequency", frequency),
        ("size", size),
        ("damping", damping),
    ])
    .unwrap()
}

fn band_of(frequency: f64) -> usize {
    if frequency < 1.0 { 0 } else { 1 }
}

#[test]
fn dbscan_finds_both_modes() {
    let fitted = ModeClusterer::new(Dbscan::new(5.0, 5)).fit(&monitoring_data(), None).unwrap();
    assert_eq!(fitted.labels().len(), 103);

    let predicted = fitted.predict(30).unwrap();
    assert_eq!(predicted.len(), 100);
    assert_eq!(predicted.cluster_count(), 2);
    // first-appearance order: the 0.30 Hz mode comes first
    assert!(predicted.labels()[..60].iter().all(|&l| l == 0));
    assert!(predicted.labels()[60..].iter().all(|&l| l == 1));

    let predicted = fitted.predict(50).unwrap();
    assert_eq!(predicted.len(), 60);
    assert!(predicted.labels().iter().all(|&l| l == 0));
}

#[test]
fn dbscan_noise_preserving_prediction() {
    let fitted = ModeClusterer::new(Dbscan::new(5.0, 5)).fit(&monitoring_data(), None).unwrap();
    let preserved = fitted.predict_with_noise(50).unwrap();

    assert_eq!(preserved.modes.len(), 103);
    assert_eq!(preserved.noise_count, 43);
    assert!(preserved.modes.labels()[..60].iter().all(|&l| l == 0));
    assert!(preserved.modes.labels()[60..].iter().all(|&l| l == NOISE_LABEL));
}

#[test]
fn frequency_band_limits_the_fit() {
    let fitted = ModeClusterer::new(Dbscan::new(5.0, 5))
        .fit(&monitoring_data(), Some(FrequencyRange::new(1.0, 2.0)))
        .unwrap();
    let predicted = fitted.predict(30).unwrap();
    assert_eq!(predicted.len(), 40);
    assert!(predicted.modes().column("frequency").unwrap().iter().all(|f| *f > 1.0));
}

#[test]
fn hdbscan_keeps_modes_apart() {
    let data = monitoring_data();
    let fitted = ModeClusterer::new(Hdbscan::new(10, None, Metric::Euclidean)).fit(&data, None).unwrap();
    let clustered = fitted.clustered();
    let frequency = clustered.modes().column("frequency").unwrap();

    let mut bands: BTreeMap<i32, usize> = BTreeMap::new();
    for (f, &label) in frequency.iter().zip(clustered.labels()) {
        if *f > 2.0 {
            assert_eq!(label, NOISE_LABEL, "isolated estimate at {} Hz clustered", f);
            continue;
        }
        if label >= 0 {
            let band = *bands.entry(label).or_insert_with(|| band_of(*f));
            assert_eq!(band, band_of(*f), "cluster {} spans both modes", label);
        }
    }
    assert!(bands.values().any(|&b| b == 0));
    assert!(bands.values().any(|&b| b == 1));
}

#[test]
fn time_feature_is_appended() {
    let features = FeatureConfig { index_divider: Some(10.0), ..FeatureConfig::default() };
    let fitted = ModeClusterer::new(Dbscan::new(5.0, 5))
        .with_features(features)
        .fit(&monitoring_data(), None)
        .unwrap();
    assert_eq!(fitted.features().names.last().map(String::as_str), Some("time_diff"));
    assert_eq!(fitted.features().column("time_diff").unwrap()[10], 1.0);
}

#[test]
fn configured_algorithm_dispatches() {
    let mut config = ClusteringConfig::default();
    config.algorithm.kind = AlgorithmKind::Dbscan;
    config.algorithm.dbscan = Dbscan::new(5.0, 5);

    let fitted = ModeClusterer::new(config.algorithm.clone()).fit(&monitoring_data(), None).unwrap();
    assert_eq!(fitted.algorithm(), "dbscan");
    assert_eq!(fitted.predict(30).unwrap().cluster_count(), 2);
}

#[test]
fn summary_reports_frequency_bands() {
    let fitted = ModeClusterer::new(Dbscan::new(5.0, 5)).fit(&monitoring_data(), None).unwrap();
    let summary = summarize(&fitted.predict(30).unwrap()).unwrap();

    assert_eq!(summary.len(), 2);
    assert!((summary[0].mean_frequency - 0.30).abs() < 0.01);
    assert!((summary[1].mean_frequency - 1.20).abs() < 0.01);
    assert!(summary[0].min_frequency >= 0.29 && summary[0].max_frequency <= 0.31);
}

#[test]
fn missing_damping_column_aborts_fit() {
    let data = ModalTable::from_columns(vec![
        ("frequency", vec![0.3, 0.3]),
        ("size", vec![20.0, 20.0]),
    ])
    .unwrap();
    let features = FeatureConfig {
        cols: vec!["frequency".to_string(), "size".to_string()],
        multipliers: BTreeMap::new(),
        index_divider: None,
    };
    let err = ModeClusterer::new(Dbscan::default()).with_features(features).fit(&data, None).unwrap_err();
    assert!(matches!(err, Error::MissingDamping));
}

#[test]
fn hdbscan_rejects_selection_smaller_than_min_samples() {
    // only the 3 Hz and 5 Hz outliers fall inside the band
    let band = FrequencyRange::new(2.5, 5.5);
    let err = ModeClusterer::new(Hdbscan::default())
        .fit(&monitoring_data(), Some(band))
        .unwrap_err();
    assert!(matches!(err, Error::Clustering(_)));
}

fn with_missing_frequency() -> ModalTable {
    let mut frequency: Vec<f64> = (0..10).map(|i| 1.0 + 0.002 * i as f64).collect();
    frequency[4] = f64::NAN;
    ModalTable::from_columns(vec![
        ("frequency", frequency),
        ("size", vec![10.0; 10]),
        ("damping", vec![1.0; 10]),
    ])
    .unwrap()
}

#[test]
fn missing_frequency_value_is_an_error_for_both_backends() {
    let modes = with_missing_frequency();

    let err = ModeClusterer::new(Dbscan::new(5.0, 2)).fit(&modes, None).unwrap_err();
    assert!(matches!(err, Error::Shape(ref msg) if msg.contains("row 4")));

    let err = ModeClusterer::new(Hdbscan::default()).fit(&modes, None).unwrap_err();
    assert!(matches!(err, Error::Shape(ref msg) if msg.contains("row 4")));
}

#[test]
fn csv_round_trip_keeps_labels() {
    let fitted = ModeClusterer::new(Dbscan::new(5.0, 5)).fit(&monitoring_data(), None).unwrap();
    let predicted = fitted.predict(30).unwrap();
    let out = tempfile::NamedTempFile::new().unwrap();

    write_clustered_csv(out.path(), &predicted).unwrap();
    let reread = read_modal_csv(out.path(), Some("index")).unwrap();

    assert_eq!(reread.len(), predicted.len());
    assert_eq!(reread.index()[0], "2023-06-01T00:00");
    let labels: Vec<i32> = reread.column("labels").unwrap().iter().map(|l| *l as i32).collect();
    assert_eq!(labels, predicted.labels());
}
