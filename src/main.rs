//! Trains a feed-forward network on a whitespace-delimited dataset and
//! reports test accuracy.
//!
//! Usage: tabular-nn [DATASET] [--epochs N] [--lr RATE] [--seed S] ...

use std::process::ExitCode;

use anyhow::{ensure, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tabular_nn::{
    rng, train_test_split, Accuracy, Dataset, Model, ModelSpec, RunConfig, Scaler, ScalerKind,
};

#[derive(Parser)]
#[command(name = "tabular-nn")]
#[command(about = "Train a small feed-forward network on tabular data", long_about = None)]
struct Cli {
    /// Dataset name; reads `<DATASET>.txt`
    dataset: Option<String>,

    /// Number of passes over the training data
    #[arg(short, long)]
    epochs: Option<usize>,

    /// SGD learning rate (overrides the one in --arch)
    #[arg(long)]
    lr: Option<f64>,

    /// RNG seed for splitting and weight init; 0 picks one at random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Fraction of samples used for training
    #[arg(long)]
    train_ratio: Option<f64>,

    /// Keep the file order when splitting
    #[arg(long)]
    no_shuffle: bool,

    /// Feature scaling applied after the split
    #[arg(long, value_enum)]
    scaler: Option<ScalerArg>,

    /// JSON model spec; its first/last layer widths are fitted to the data
    #[arg(long)]
    arch: Option<String>,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScalerArg {
    Minmax,
    Standard,
    #[value(name = "none")]
    Unscaled,
}

impl From<ScalerArg> for ScalerKind {
    fn from(arg: ScalerArg) -> Self {
        match arg {
            ScalerArg::Minmax => ScalerKind::MinMax,
            ScalerArg::Standard => ScalerKind::Standard,
            ScalerArg::Unscaled => ScalerKind::None,
        }
    }
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        let defaults = RunConfig::default();
        RunConfig {
            dataset: self.dataset.clone().unwrap_or(defaults.dataset),
            learning_rate: self.lr.unwrap_or(defaults.learning_rate),
            epochs: self.epochs.unwrap_or(defaults.epochs),
            train_ratio: self.train_ratio.unwrap_or(defaults.train_ratio),
            shuffle: !self.no_shuffle,
            seed: self.seed.unwrap_or(defaults.seed),
            hidden: defaults.hidden,
            scaler: self.scaler.map_or(defaults.scaler, ScalerKind::from),
        }
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Progress lines go to stderr as bare messages.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_level(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.run_config();
    ensure!(
        config.train_ratio > 0.0 && config.train_ratio < 1.0,
        "train ratio must be between 0 and 1, got {}",
        config.train_ratio
    );
    ensure!(config.epochs >= 1, "epochs must be at least 1");

    let dataset = Dataset::load(config.dataset_path())?;
    let mut rng = rng::seeded(config.seed);

    let mut split = train_test_split(&dataset, config.train_ratio, config.shuffle, &mut rng);
    ensure!(split.x_train.rows > 0, "training split is empty; dataset has {} rows", dataset.len());

    if let Some(mut scaler) = config.scaler.build() {
        scaler.fit(&split.x_train);
        scaler.transform(&mut split.x_train);
        scaler.transform(&mut split.x_test);
    }

    let mut spec = match &cli.arch {
        Some(path) => ModelSpec::load_json(path)
            .with_context(|| format!("failed to load model spec {path}"))?,
        None => ModelSpec::single_hidden(1, config.hidden, 1, config.learning_rate),
    };
    spec.fit_to_data(split.x_train.cols, split.y_train.cols);
    if let Some(lr) = cli.lr {
        spec.learning_rate = lr;
    }

    let mut model = Model::from_spec(&spec)?;
    for line in model.overview().lines() {
        info!("{line}");
    }

    model.init_params(&mut rng);
    model.train(&split.x_train, &split.y_train, config.epochs);

    let predicted = model.predict(&split.x_test);
    println!("{}", Accuracy::compute(&predicted, &split.y_test));
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_tracing(&cli.log_level) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
