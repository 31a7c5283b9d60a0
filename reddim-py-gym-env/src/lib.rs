//! Gymnasium's lunar lander on Python as a [`Simulation`].
//!
//! [`GymLander`] drives `gymnasium.make("LunarLander-v3", continuous=True)` through
//! [`PyO3`](https://github.com/PyO3/pyo3). Raw states and actions cross the
//! boundary as numpy arrays and are converted to and from [`ndarray::Array1`].
//!
//! The spaces of the Python environment are read once, when the environment is
//! built, into [`BoxSpace`] descriptors. Seeding and sampling of the spaces are
//! delegated to the Python samplers.
//!
//! [`Simulation`]: reddim_core::Simulation
//! [`BoxSpace`]: reddim_core::BoxSpace
mod base;
mod config;
pub mod util;
pub use base::GymLander;
pub use config::GymLanderConfig;
