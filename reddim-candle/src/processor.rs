//! State processor running a [`candle_nn::Module`].
use crate::util::{array2_to_tensor, tensor_to_array2};
use anyhow::Result;
use candle_core::Device;
use candle_nn::Module;
use log::trace;
use ndarray::Array2;
use reddim_core::StateProcessor;

/// Runs a module on batches of raw states.
pub struct CandleProcessor<M> {
    module: M,
    device: Device,
}

impl<M: Module> CandleProcessor<M> {
    /// Runs `module` on the CPU.
    pub fn new(module: M) -> Self {
        Self::with_device(module, Device::Cpu)
    }

    /// Runs `module` on `device`; inputs are moved there before the forward pass.
    pub fn with_device(module: M, device: Device) -> Self {
        Self { module, device }
    }

    /// Returns the module.
    pub fn module(&self) -> &M {
        &self.module
    }
}

impl<M: Module> StateProcessor for CandleProcessor<M> {
    fn infer(&self, batch: Array2<f32>) -> Result<Array2<f32>> {
        trace!("CandleProcessor::infer(): batch shape {:?}", batch.shape());
        let xs = array2_to_tensor(&batch, &self.device)?;
        let ys = self.module.forward(&xs)?;
        tensor_to_array2(&ys)
    }
}
