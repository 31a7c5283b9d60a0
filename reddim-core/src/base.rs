//! Core functionalities.
mod processor;
mod simulation;
mod step;
pub use processor::StateProcessor;
pub use simulation::{OptionValue, RenderMode, ResetOptions, Simulation};
pub use step::{SimInfo, SimStep};

/// Number of components of the raw state used by the adapter:
/// `[x, y, vx, vy, angle, angular_velocity]`.
pub const RAW_STATE_DIM: usize = 6;
