//! Simulation.
use super::{SimInfo, SimStep};
use crate::BoxSpace;
use anyhow::Result;
use ndarray::{Array1, Array3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rendering mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Renders to a window.
    Human,

    /// Returns an RGB frame.
    RgbArray,
}

impl Default for RenderMode {
    fn default() -> Self {
        RenderMode::Human
    }
}

impl RenderMode {
    /// Name of the mode as known by Gymnasium.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Human => "human",
            RenderMode::RgbArray => "rgb_array",
        }
    }
}

/// Value of a simulation specific reset option.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean flag.
    Bool(bool),

    /// Integer.
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// String.
    Str(String),
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

/// Options passed verbatim to [`Simulation::reset`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResetOptions {
    /// Seed of the simulation's own random generator.
    pub seed: Option<u64>,

    /// Simulation specific options.
    pub options: BTreeMap<String, OptionValue>,
}

impl ResetOptions {
    /// Sets the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Adds a simulation specific option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Represents a continuous-control lunar lander simulation.
///
/// A raw state is `[x, y, vx, vy, angle, angular_velocity, ...]`, with at least six components.
pub trait Simulation {
    /// Descriptor of the action space.
    fn action_space(&self) -> &BoxSpace;

    /// Descriptor of the observation space of the raw state.
    fn observation_space(&self) -> &BoxSpace;

    /// Seeds the samplers of the action and observation spaces.
    fn seed_spaces(&mut self, seed: u64) -> Result<()>;

    /// Samples an action from the action space.
    fn sample_action(&mut self) -> Result<Array1<f32>>;

    /// Samples a raw state from the observation space.
    fn sample_observation(&mut self) -> Result<Array1<f32>>;

    /// Starts a new episode and returns the initial raw state.
    fn reset(&mut self, options: &ResetOptions) -> Result<(Array1<f32>, SimInfo)>;

    /// Performs a simulation step.
    fn step(&mut self, act: &Array1<f32>) -> Result<SimStep>;

    /// Renders the current state.
    ///
    /// Returns an RGB frame of shape `(height, width, 3)` if the simulation produces one.
    fn render(&mut self, mode: RenderMode) -> Result<Option<Array3<u8>>>;

    /// Releases resources of the simulation.
    fn close(&mut self) -> Result<()>;
}
