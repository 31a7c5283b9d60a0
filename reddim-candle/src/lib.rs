//! State processors running [candle](https://crates.io/crates/candle-core) models.
//!
//! Candle records operations only for tensors derived from variables. The
//! output of [`CandleProcessor`] is detached and copied out, so nothing of the
//! graph is kept after a call.
mod mlp;
mod processor;
pub mod util;
pub use mlp::{MlpEncoder, MlpEncoderConfig};
pub use processor::CandleProcessor;
