//! Multilayer perceptron encoding raw states.
mod config;
pub use config::MlpEncoderConfig;
use anyhow::Result;
use log::info;
use std::path::Path;
use tch::{nn, nn::Module, Device, Tensor};

/// Multilayer perceptron with ReLU activation function.
///
/// The encoder owns its [`nn::VarStore`].
pub struct MlpEncoder {
    config: MlpEncoderConfig,
    device: Device,
    var_store: nn::VarStore,
    seq: nn::Sequential,
}

impl std::fmt::Debug for MlpEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MlpEncoder")
            .field("config", &self.config)
            .field("device", &self.device)
            .finish()
    }
}

impl MlpEncoder {
    fn create_net(var_store: &nn::VarStore, config: &MlpEncoderConfig) -> nn::Sequential {
        let p = &(var_store.root() / "mlp");
        let mut seq = nn::seq();
        let mut in_dim = config.in_dim;

        for (i, &out_dim) in config.units.iter().enumerate() {
            seq = seq.add(nn::linear(
                p / format!("{}{}", "ln", i),
                in_dim,
                out_dim,
                Default::default(),
            ));
            seq = seq.add_fn(|x| x.relu());
            in_dim = out_dim;
        }

        seq = seq.add(nn::linear(
            p / format!("{}{}", "ln", config.units.len()),
            in_dim,
            config.out_dim,
            Default::default(),
        ));

        if config.activation_out {
            seq.add_fn(|x| x.relu())
        } else {
            seq.add_fn(|x| x.tanh())
        }
    }

    /// Builds an encoder with randomly initialized parameters.
    pub fn build(config: MlpEncoderConfig, device: Device) -> Self {
        let var_store = nn::VarStore::new(device);
        let seq = Self::create_net(&var_store, &config);

        Self {
            config,
            device,
            var_store,
            seq,
        }
    }

    /// Builds an encoder with pre-trained parameters.
    ///
    /// The parameters are frozen.
    pub fn load(config: MlpEncoderConfig, path: impl AsRef<Path>, device: Device) -> Result<Self> {
        let mut enc = Self::build(config, device);
        enc.var_store.load(&path)?;
        enc.var_store.freeze();
        info!("Loaded encoder parameters from {:?}", path.as_ref());
        Ok(enc)
    }

    /// Saves the parameters.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.var_store.save(&path)?;
        info!("Saved encoder parameters to {:?}", path.as_ref());
        Ok(())
    }

    /// Configuration.
    pub fn config(&self) -> &MlpEncoderConfig {
        &self.config
    }
}

impl Module for MlpEncoder {
    fn forward(&self, xs: &Tensor) -> Tensor {
        self.seq.forward(&xs.to(self.device))
    }
}
