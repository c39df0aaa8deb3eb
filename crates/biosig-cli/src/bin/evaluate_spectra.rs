//! Train and evaluate the biosignature classifier on a generated dataset

use std::path::PathBuf;

use anyhow::Context;
use biosig_cli::{RunConfig, init_tracing};
use clap::Parser;
use classifier::{ClassificationPipeline, ScalerKind, write_artifacts};
use dataset::{LabeledDataset, dataset_path, read_parquet};
use system_params::FillGas;
use tracing::info;

#[derive(Parser)]
#[command(name = "evaluate-spectra")]
#[command(about = "Scale, reduce and classify a spectra dataset, then report", long_about = None)]
struct Cli {
    /// Fill gas whose dataset is evaluated, e.g. H2 or N2
    fill_gas: String,

    /// TOML file with [evaluation] settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding multirex_spectra_<GAS>.parquet
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Directory for the report, confusion matrix and metrics
    #[arg(short, long, default_value = "final_results")]
    results_dir: PathBuf,

    /// Feature scaler: standard or robust
    #[arg(short, long)]
    scaler: Option<ScalerKind>,

    /// Worker threads for the forest, 0 for all cores
    #[arg(short, long)]
    jobs: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = RunConfig::load(cli.config.as_deref())?.evaluation;
    if let Some(scaler) = cli.scaler {
        config.scaler = scaler;
    }
    if cli.jobs.is_some() {
        config.forest.n_jobs = cli.jobs;
    }

    let fill_gas = FillGas::parse(&cli.fill_gas);
    info!("--- Loading and Preparing {fill_gas} Dataset ---");
    let path = dataset_path(&cli.data_dir, &fill_gas);
    let frame = read_parquet(&path).with_context(|| format!("loading {}", path.display()))?;
    let dataset = LabeledDataset::from_frame(frame)
        .with_context(|| format!("preparing features from {}", path.display()))?;

    let pipeline = ClassificationPipeline::new(config);
    let outcome = pipeline
        .run(&dataset)
        .with_context(|| format!("evaluating {fill_gas} dataset"))?;

    println!("\nClassification Report for {fill_gas} Dataset:");
    println!("{}", outcome.report.render());

    let artifacts = write_artifacts(
        &cli.results_dir,
        fill_gas.identity(),
        pipeline.config(),
        &outcome,
    )
    .with_context(|| format!("writing results to {}", cli.results_dir.display()))?;
    info!(
        report = %artifacts.report.display(),
        confusion_matrix = %artifacts.confusion_matrix.display(),
        metrics = %artifacts.metrics.display(),
        "evaluation complete"
    );
    Ok(())
}
