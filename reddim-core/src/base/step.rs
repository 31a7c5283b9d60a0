//! Simulation step.
use ndarray::Array1;

/// Auxiliary information returned by a simulation with its state.
///
/// The adapter discards it. Currently it is empty and used to match the type signature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimInfo {}

/// Outcome of a single step of the simulation.
#[derive(Clone, Debug)]
pub struct SimStep {
    /// Raw state after the step.
    pub state: Array1<f32>,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if the episode is terminated.
    pub is_terminated: bool,

    /// Flag denoting if the episode is truncated.
    pub is_truncated: bool,

    /// Information given by the simulation.
    pub info: SimInfo,
}

impl SimStep {
    /// Constructs a [`SimStep`] object.
    pub fn new(
        state: Array1<f32>,
        reward: f32,
        is_terminated: bool,
        is_truncated: bool,
        info: SimInfo,
    ) -> Self {
        Self {
            state,
            reward,
            is_terminated,
            is_truncated,
            info,
        }
    }
}
