use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::common::KnnError;
use crate::core::index::strategy_from_name;

/// Configuration for an evaluation run: where the IDX dataset pairs live,
/// which traversal strategy answers queries, and how many worker threads
/// classify the test set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub train_images: PathBuf,
    pub train_labels: PathBuf,
    pub test_images: PathBuf,
    pub test_labels: PathBuf,
    /// One of `linear`, `bound-vector`, `rejection-flag`.
    pub strategy: String,
    /// Worker threads for test-set classification; 0 means one per core.
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            train_images: PathBuf::from("train-images.idx3-ubyte"),
            train_labels: PathBuf::from("train-labels.idx1-ubyte"),
            test_images: PathBuf::from("t10k-images.idx3-ubyte"),
            test_labels: PathBuf::from("t10k-labels.idx1-ubyte"),
            strategy: "rejection-flag".to_string(),
            threads: 0,
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the strategy name is unknown. Dataset paths are
    /// checked when the files are opened.
    pub fn validate(&self) -> Result<(), KnnError> {
        strategy_from_name(&self.strategy).map(|_| ())
    }

    /// Loads configuration from a TOML file. A missing file yields the
    /// default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read (other than not existing),
    /// fails to parse, or fails validation.
    pub fn load_from_file(path: &Path) -> Result<Self, KnnError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config: Self = toml::from_str(&contents).map_err(|e| {
                    KnnError::Configuration(format!(
                        "Failed to parse config file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(KnnError::Io(e)),
        }
    }
}
