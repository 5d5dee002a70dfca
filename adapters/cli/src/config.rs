use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use warren_core::{BoundsPolicy, Capacity};

/// Generation settings read from a TOML file. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    /// Maximum number of cells to scatter.
    pub(crate) capacity: Option<usize>,
    /// Seed for the generator.
    pub(crate) seed: Option<u64>,
    /// Whether normalization keeps the extreme row and column.
    pub(crate) bounds: Option<BoundsPolicy>,
}

impl FileConfig {
    /// Loads a configuration file from disk.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config file at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse config toml")?;
        if config.capacity == Some(0) {
            bail!("capacity must be positive");
        }
        Ok(config)
    }
}

/// Values supplied on the command line; they override the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub(crate) capacity: Option<usize>,
    pub(crate) seed: Option<u64>,
    pub(crate) bounds: Option<BoundsPolicy>,
}

/// Fully resolved generation settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) capacity: usize,
    pub(crate) seed: Option<u64>,
    pub(crate) bounds: BoundsPolicy,
}

impl Settings {
    /// Layers command-line overrides over file values over defaults.
    pub(crate) fn resolve(overrides: Overrides, file: Option<FileConfig>) -> Self {
        let file = file.unwrap_or_default();
        Self {
            capacity: overrides
                .capacity
                .or(file.capacity)
                .unwrap_or(Capacity::DEFAULT),
            seed: overrides.seed.or(file.seed),
            bounds: overrides.bounds.or(file.bounds).unwrap_or_default(),
        }
    }
}
