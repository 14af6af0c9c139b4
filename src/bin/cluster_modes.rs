use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use chrono::Local;
use clap::Parser;
use log::{info, warn};
use oma_clustering::{
    ClusteringConfig,
    ClusteredModes,
    FrequencyRange,
    ModeClusterer,
    Result,
    clustering::summarize,
    config::subsystems::AlgorithmKind,
    io::{read_modal_csv, write_clustered_csv, write_summary_json},
};

/// Cluster OMA mode estimates into persistent physical modes.
#[derive(Debug, Parser)]
#[command(name = "cluster_modes", version)]
struct Args {
    /// INI configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV file with one mode estimate per row
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the clustered modes (CSV)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Where to write the per-cluster summary (JSON)
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Override the configured backend (dbscan or hdbscan)
    #[arg(long)]
    algorithm: Option<String>,

    /// Override the minimum number of modes a cluster must exceed
    #[arg(long)]
    min_cluster_size: Option<usize>,

    /// Keep every mode and label dropped clusters as noise
    #[arg(long)]
    keep_noise: bool,

    /// Lower bound of the frequency band (Hz)
    #[arg(long, requires = "freq_high")]
    freq_low: Option<f64>,

    /// Upper bound of the frequency band (Hz)
    #[arg(long, requires = "freq_low")]
    freq_high: Option<f64>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn load_config(args: &Args) -> Result<ClusteringConfig> {
    let mut config = match &args.config {
        Some(path) => ClusteringConfig::from_ini(path)?,
        None => ClusteringConfig::default(),
    };

    if let Some(name) = &args.algorithm {
        config.algorithm.kind = AlgorithmKind::from_str(name).ok_or_else(|| {
            oma_clustering::Error::config(format!("Invalid clustering algorithm: {}", name))
        })?;
    }
    if let Some(size) = args.min_cluster_size {
        config.predict.min_cluster_size = size;
    }
    if args.keep_noise {
        config.predict.keep_noise = true;
    }
    if let (Some(low), Some(high)) = (args.freq_low, args.freq_high) {
        config.selection.frequency_range = Some(FrequencyRange::new(low, high));
    }

    config.validate()?;
    Ok(config)
}

fn init_logging(config: &ClusteringConfig) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, config.logging.get_log_level());

    if let Some(path) = &config.logging.file {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    builder.init();
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;

    if args.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    init_logging(&config)?;
    info!("Starting mode clustering with log level: {:?}", config.logging.get_log_level());

    let input = args
        .input
        .as_ref()
        .ok_or_else(|| oma_clustering::Error::config("--input is required"))?;
    let modes = read_modal_csv(input, config.input.index_column.as_deref())?;

    let clusterer = ModeClusterer::new(config.algorithm.clone())
        .with_selection(config.selection.clone())
        .with_features(config.features.clone());
    let fitted = clusterer.fit(&modes, None)?;

    let min_cluster_size = config.predict.min_cluster_size;
    let clustered: ClusteredModes = if config.predict.keep_noise {
        let preserved = fitted.predict_with_noise(min_cluster_size)?;
        info!("{} modes marked as noise", preserved.noise_count);
        preserved.modes
    } else {
        fitted.predict(min_cluster_size)?
    };

    info!(
        "{} clusters with more than {} modes ({} modes)",
        clustered.cluster_count(), min_cluster_size, clustered.len()
    );
    if clustered.cluster_count() == 0 {
        warn!("No cluster exceeds {} modes; consider a smaller --min-cluster-size", min_cluster_size);
    }

    let summary = summarize(&clustered)?;
    for cluster in &summary {
        println!(
            "cluster {:>3}: {:>7} modes, {:.4} Hz [{:.4} - {:.4}], damping {:.3}",
            cluster.label,
            cluster.count,
            cluster.mean_frequency,
            cluster.min_frequency,
            cluster.max_frequency,
            cluster.mean_damping
        );
    }

    if let Some(path) = &args.output {
        write_clustered_csv(path, &clustered)?;
        info!("Clustered modes written to {:?}", path);
    }
    if let Some(path) = &args.summary {
        write_summary_json(path, &summary)?;
        info!("Cluster summary written to {:?}", path);
    }

    Ok(())
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
