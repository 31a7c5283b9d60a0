#![warn(missing_docs)]
//! Lunar lander environment adapter with reduced-dimension observations.
//!
//! [`ReducedLanderEnv`] wraps a continuous-control lunar lander simulation
//! (anything implementing [`Simulation`]) and exposes a bounded observation
//! space derived from the raw state of the simulation.
//!
//! ## Observation
//!
//! The raw state of the lander is `[x, y, vx, vy, angle, angular_velocity, ...]`.
//! It is turned into an observation by an [`ObservationReducer`] selected once,
//! when the adapter is built:
//!
//! * [`FixedSixSelector`] keeps the first six components of the raw state.
//!   The observation space is `[-1, 1]^6`.
//! * [`ExternalModelProjector`] feeds the raw state, as a batch of one, into a
//!   pre-trained [`StateProcessor`] and returns its output. The observation
//!   space is `[-1, 1]^reduced_dim`.
//!
//! Processors are run in inference mode, see [`StateProcessor::infer`].
//! Backends for `tch` and `candle` models live in separate crates.
//!
//! ## Randomness
//!
//! There is no process-wide random generator. [`ReducedLanderEnv::seed`] reseeds
//! the [`RandomSource`] handed to the adapter and the samplers of the action and
//! observation spaces of the simulation.
pub mod dummy;
pub mod error;

mod base;
pub use base::{
    OptionValue, RenderMode, ResetOptions, SimInfo, SimStep, Simulation, StateProcessor,
    RAW_STATE_DIM,
};

mod config;
pub use config::ReducedLanderEnvConfig;

mod env;
pub use env::{ReducedLanderEnv, ReducedStep, MAX_EPISODE_STEPS, VELOCITY_LIMIT};

mod reducer;
pub use reducer::{reduce_state, ExternalModelProjector, FixedSixSelector, ObservationReducer};

mod rng;
pub use rng::RandomSource;

mod space;
pub use space::BoxSpace;
