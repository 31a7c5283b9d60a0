//! State processor running a TorchScript model.
use crate::util::{array2_to_tensor, tensor_to_array2};
use anyhow::Result;
use log::{info, trace};
use ndarray::Array2;
use reddim_core::StateProcessor;
use std::path::Path;
use tch::{no_grad, CModule, Device};

/// Runs a TorchScript model, e.g. saved with `torch.jit.save()` in Python.
///
/// The model is switched to evaluation mode when loaded.
pub struct ScriptProcessor {
    module: CModule,
    device: Device,
}

impl ScriptProcessor {
    /// Loads the model on `device`.
    pub fn load(path: impl AsRef<Path>, device: Device) -> Result<Self> {
        info!("Load TorchScript model from {:?}", path.as_ref());
        let mut module = CModule::load_on_device(path, device)?;
        module.set_eval();
        Ok(Self { module, device })
    }
}

impl StateProcessor for ScriptProcessor {
    fn infer(&self, batch: Array2<f32>) -> Result<Array2<f32>> {
        trace!("ScriptProcessor::infer(): batch shape {:?}", batch.shape());
        let xs = array2_to_tensor(&batch, self.device)?;
        let ys = no_grad(|| self.module.forward_ts(&[xs]))?;
        tensor_to_array2(&ys)
    }
}
