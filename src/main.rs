//! Evaluation driver: builds the index from a training IDX pair, classifies
//! every point of a test IDX pair in parallel, and reports mismatches and
//! per-phase timing.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;

use kdnn::core::index::strategy_from_name;
use kdnn::{load_idx_dataset, Config, KdTree, KnnClassifier, KnnError};

#[derive(Parser, Debug)]
#[command(version, about = "Exact k=3 nearest-neighbor evaluation over IDX datasets")]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Training images (IDX, big-endian headers)
    #[arg(long)]
    train_images: Option<PathBuf>,

    /// Training labels (IDX)
    #[arg(long)]
    train_labels: Option<PathBuf>,

    /// Test images (IDX)
    #[arg(long)]
    test_images: Option<PathBuf>,

    /// Test labels (IDX)
    #[arg(long)]
    test_labels: Option<PathBuf>,

    /// Search strategy: linear, bound-vector or rejection-flag
    #[arg(long)]
    strategy: Option<String>,

    /// Worker threads for classification (0 = one per core)
    #[arg(long)]
    threads: Option<usize>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(path) = self.train_images {
            config.train_images = path;
        }
        if let Some(path) = self.train_labels {
            config.train_labels = path;
        }
        if let Some(path) = self.test_images {
            config.test_images = path;
        }
        if let Some(path) = self.test_labels {
            config.test_labels = path;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let config = Args::parse().into_config()?;
    if config.threads > 0 {
        rayon::ThreadPoolBuilder::new().num_threads(config.threads).build_global()?;
    }

    let started = Instant::now();
    let training = load_idx_dataset(&config.train_images, &config.train_labels)
        .context("loading training set")?;
    println!(
        "Loaded {} training points of {} dimensions in {:.2?}",
        training.len(),
        training.dim(),
        started.elapsed()
    );

    let started = Instant::now();
    let tree = KdTree::build(training);
    println!("Built index in {:.2?}", started.elapsed());

    let test = load_idx_dataset(&config.test_images, &config.test_labels)
        .context("loading test set")?;
    let classifier = KnnClassifier::new(tree, strategy_from_name(&config.strategy)?);

    let started = Instant::now();
    let mismatches = (0..test.len())
        .into_par_iter()
        .map(|i| -> Result<u64, KnnError> {
            let predicted = classifier.predict(test.attrs(i))?;
            Ok(u64::from(predicted != Some(test.label(i))))
        })
        .try_reduce(|| 0, |a, b| Ok(a + b))?;

    println!(
        "Test cases: {}; mismatches: {} (strategy {}, {:.2?})",
        test.len(),
        mismatches,
        classifier.strategy_name(),
        started.elapsed()
    );
    Ok(())
}
