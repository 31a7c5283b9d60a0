//! Configuration of the adapter.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`ReducedLanderEnv`](crate::ReducedLanderEnv).
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ReducedLanderEnvConfig {
    /// Dimension of the observations produced by the state processor.
    ///
    /// Required when the adapter is built with a processor, ignored otherwise.
    pub reduced_dim: Option<usize>,

    /// Seed applied right after the adapter is built.
    pub seed: Option<u64>,
}

impl ReducedLanderEnvConfig {
    /// Constructs [`ReducedLanderEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ReducedLanderEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }

    /// Sets the dimension of reduced observations.
    pub fn reduced_dim(mut self, v: usize) -> Self {
        self.reduced_dim = Some(v);
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = Some(v);
        self
    }
}
