#![warn(missing_docs)]
//! State processors running [tch](https://crates.io/crates/tch) models.
//!
//! * [`TchProcessor`] runs any [`tch::nn::Module`], for example an [`MlpEncoder`].
//! * [`ScriptProcessor`] runs a TorchScript model exported from PyTorch.
//!
//! Both run the model inside [`tch::no_grad`], so no autograd graph is built
//! and the gradient mode is restored when the call returns.
mod mlp;
mod processor;
mod script;
pub mod util;
pub use mlp::{MlpEncoder, MlpEncoderConfig};
pub use processor::TchProcessor;
pub use script::ScriptProcessor;
