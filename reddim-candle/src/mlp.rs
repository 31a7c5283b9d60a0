//! Multilayer perceptron encoding raw states.
mod config;
pub use config::MlpEncoderConfig;
use anyhow::Result;
use candle_core::{DType, Device, Tensor};
use candle_nn::{linear, Linear, Module, VarBuilder, VarMap};
use log::info;
use std::path::Path;

/// Returns vector of linear modules from [`MlpEncoderConfig`].
fn create_linear_layers(
    prefix: &str,
    vs: VarBuilder,
    config: &MlpEncoderConfig,
) -> Result<Vec<Linear>> {
    let mut dims = vec![config.in_dim];
    dims.extend(config.units.iter().cloned());
    dims.push(config.out_dim);
    let vs = vs.pp(prefix);

    let mut layers = Vec::with_capacity(dims.len() - 1);
    for (i, pair) in dims.windows(2).enumerate() {
        layers.push(linear(pair[0], pair[1], vs.pp(format!("ln{}", i)))?);
    }
    Ok(layers)
}

/// Multilayer perceptron with ReLU activation function.
///
/// The encoder owns its [`VarMap`].
pub struct MlpEncoder {
    config: MlpEncoderConfig,
    device: Device,
    varmap: VarMap,
    layers: Vec<Linear>,
}

impl MlpEncoder {
    /// Builds an encoder with randomly initialized parameters.
    pub fn build(config: MlpEncoderConfig, device: Device) -> Result<Self> {
        let varmap = VarMap::new();
        let vs = VarBuilder::from_varmap(&varmap, DType::F32, &device);
        let layers = create_linear_layers("mlp", vs, &config)?;

        Ok(Self {
            config,
            device,
            varmap,
            layers,
        })
    }

    /// Builds an encoder with pre-trained parameters in a safetensors file.
    pub fn load(config: MlpEncoderConfig, path: impl AsRef<Path>, device: Device) -> Result<Self> {
        let mut enc = Self::build(config, device)?;
        enc.varmap.load(&path)?;
        info!("Loaded encoder parameters from {:?}", path.as_ref());
        Ok(enc)
    }

    /// Saves the parameters in safetensors format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.varmap.save(&path)?;
        info!("Saved encoder parameters to {:?}", path.as_ref());
        Ok(())
    }

    /// Configuration.
    pub fn config(&self) -> &MlpEncoderConfig {
        &self.config
    }
}

impl Module for MlpEncoder {
    fn forward(&self, xs: &Tensor) -> candle_core::Result<Tensor> {
        let n_layers = self.layers.len();
        let mut xs = xs.to_device(&self.device)?;

        for layer in &self.layers[..n_layers - 1] {
            xs = layer.forward(&xs)?.relu()?;
        }
        let xs = self.layers[n_layers - 1].forward(&xs)?;

        match self.config.activation_out {
            true => xs.relu(),
            false => xs.tanh(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::CandleProcessor;
    use ndarray::{Array1, Array2};
    use reddim_core::{dummy::DummySimulation, ReducedLanderEnv, ResetOptions, StateProcessor};
    use tempdir::TempDir;

    fn config() -> MlpEncoderConfig {
        MlpEncoderConfig::new(8, vec![16, 16], 3, false)
    }

    #[test]
    fn test_encoder_in_adapter() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();
        let processor = CandleProcessor::new(MlpEncoder::build(config(), Device::Cpu)?);
        let mut env = ReducedLanderEnv::with_processor(DummySimulation::new(), processor, 3)?;

        let obs = env.reset(&ResetOptions::default())?;
        assert_eq!(obs.len(), 3);
        assert!(env.observation_space().contains(&obs));

        let step = env.step(&Array1::zeros(2))?;
        assert_eq!(step.obs.len(), 3);
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let dir = TempDir::new("mlp_encoder")?;
        let weights = dir.path().join("encoder.safetensors");
        let config_path = dir.path().join("encoder.yaml");

        let enc = MlpEncoder::build(config(), Device::Cpu)?;
        enc.save(&weights)?;
        enc.config().save(&config_path)?;

        let enc_ = MlpEncoder::load(MlpEncoderConfig::load(&config_path)?, &weights, Device::Cpu)?;
        let batch = Array2::from_elem((1, 8), 0.5f32);
        let p1 = CandleProcessor::new(enc);
        let p2 = CandleProcessor::new(enc_);
        assert_eq!(p1.infer(batch.clone())?, p2.infer(batch)?);
        Ok(())
    }
}
