//! Configuration of [`GymLander`](crate::GymLander).
use anyhow::Result;
use reddim_core::RenderMode;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
    time::Duration,
};

/// Configuration of [`GymLander`](crate::GymLander).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GymLanderConfig {
    /// Environment id given to `gymnasium.make()`.
    pub name: String,

    /// Continuous action space.
    pub continuous: bool,

    /// Render mode given to `gymnasium.make()`.
    pub render_mode: Option<RenderMode>,

    /// Wait time after every rendered step.
    pub wait: Duration,
}

impl Default for GymLanderConfig {
    fn default() -> Self {
        Self {
            name: "LunarLander-v3".to_string(),
            continuous: true,
            render_mode: None,
            wait: Duration::from_millis(0),
        }
    }
}

impl GymLanderConfig {
    /// Constructs [`GymLanderConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`GymLanderConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }

    /// Set the name of the environment.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the render mode.
    pub fn render_mode(mut self, render_mode: Option<RenderMode>) -> Self {
        self.render_mode = render_mode;
        self
    }

    /// Set wait time at every rendered step.
    pub fn wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }
}
