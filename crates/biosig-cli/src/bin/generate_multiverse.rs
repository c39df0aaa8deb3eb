//! Generate the labeled synthetic spectra dataset for one fill gas

use std::path::PathBuf;

use anyhow::Context;
use biosig_cli::{RunConfig, init_tracing};
use clap::Parser;
use dataset::{DatasetAssembler, dataset_path, write_parquet};
use multiverse::TransmissionSimulator;
use system_params::FillGas;
use tracing::info;

#[derive(Parser)]
#[command(name = "generate-multiverse")]
#[command(about = "Simulate transmission spectra and write a labeled parquet dataset", long_about = None)]
struct Cli {
    /// Fill gas of the atmospheres, e.g. H2 or N2
    fill_gas: String,

    /// TOML file with [generation] settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the parquet file is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Run seed; overrides the config
    #[arg(long)]
    seed: Option<u64>,

    /// Signal-to-noise ratio; overrides the config
    #[arg(long)]
    snr: Option<f64>,

    /// Noisy observations per draw; overrides the config
    #[arg(long)]
    observations: Option<usize>,

    /// Worker threads, 0 for all cores
    #[arg(short, long)]
    jobs: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = RunConfig::load(cli.config.as_deref())?.generation;
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(snr) = cli.snr {
        config.snr = snr;
    }
    if let Some(observations) = cli.observations {
        config.n_observations = observations;
    }
    if cli.jobs.is_some() {
        config.n_jobs = cli.jobs;
    }

    let fill_gas = FillGas::parse(&cli.fill_gas);
    let assembler = DatasetAssembler::new(TransmissionSimulator::default(), config);
    let assembled = assembler
        .assemble(&fill_gas)
        .with_context(|| format!("generating {fill_gas} dataset"))?;

    let path = dataset_path(&cli.output_dir, &fill_gas);
    write_parquet(&assembled.frame, &path)
        .with_context(|| format!("writing {}", path.display()))?;

    info!(
        path = %path.display(),
        rows = assembled.frame.n_rows(),
        yes = assembled.labels.yes,
        no = assembled.labels.no,
        seed = assembled.seed,
        "dataset written"
    );
    println!("{}", path.display());
    Ok(())
}
