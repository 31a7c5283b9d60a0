//! Conversion of raw states into observations.
use crate::{error::ReducedEnvError, StateProcessor, RAW_STATE_DIM};
use anyhow::Result;
use log::trace;
use ndarray::{s, Array1, Axis};

/// Turns a raw state of the simulation into the observation given to the agent.
pub trait ObservationReducer {
    /// Declared dimension of the observations.
    fn dim(&self) -> usize;

    /// Converts a raw state into an observation.
    fn reduce(&self, state: Array1<f32>) -> Result<Array1<f32>>;
}

/// Takes `[x, y, vx, vy, angle, angular_velocity]`, the first six components of a raw state.
pub fn reduce_state(state: &Array1<f32>) -> Result<Array1<f32>> {
    if state.len() < RAW_STATE_DIM {
        return Err(ReducedEnvError::ShortRawState(state.len()).into());
    }
    Ok(state.slice(s![..RAW_STATE_DIM]).to_owned())
}

/// Keeps the first six components of the raw state.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedSixSelector;

impl ObservationReducer for FixedSixSelector {
    fn dim(&self) -> usize {
        RAW_STATE_DIM
    }

    fn reduce(&self, state: Array1<f32>) -> Result<Array1<f32>> {
        reduce_state(&state)
    }
}

/// Projects the raw state with a pre-trained [`StateProcessor`].
///
/// The raw state is given to the processor as a batch with a single row and
/// the output is flattened. The length of the output is not compared with
/// `reduced_dim`, which is only used to declare the observation space.
#[derive(Debug)]
pub struct ExternalModelProjector<P> {
    processor: P,
    reduced_dim: usize,
}

impl<P: StateProcessor> ExternalModelProjector<P> {
    /// Constructs a projector declaring observations of `reduced_dim` components.
    pub fn new(processor: P, reduced_dim: usize) -> Result<Self> {
        if reduced_dim == 0 {
            return Err(ReducedEnvError::ZeroReducedDim.into());
        }
        Ok(Self {
            processor,
            reduced_dim,
        })
    }

    /// Returns the processor.
    pub fn processor(&self) -> &P {
        &self.processor
    }
}

impl<P: StateProcessor> ObservationReducer for ExternalModelProjector<P> {
    fn dim(&self) -> usize {
        self.reduced_dim
    }

    fn reduce(&self, state: Array1<f32>) -> Result<Array1<f32>> {
        let batch = state.insert_axis(Axis(0));
        let out = self.processor.infer(batch)?;
        trace!("ExternalModelProjector::reduce(): output shape {:?}", out.shape());
        Ok(out.iter().cloned().collect())
    }
}
