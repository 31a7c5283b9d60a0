//! State processor.
use anyhow::Result;
use ndarray::Array2;

/// A pre-trained model mapping raw states to reduced-dimension states.
///
/// The adapter does not own the training or persistence of the model, it only
/// calls [`StateProcessor::infer`] on every reset and step.
pub trait StateProcessor {
    /// Maps a batch of raw states, one per row, to a batch of reduced states.
    ///
    /// Implementations must run in inference mode: no gradient is recorded and
    /// no training-mode side effect survives the call, including when the
    /// model fails.
    fn infer(&self, batch: Array2<f32>) -> Result<Array2<f32>>;
}

impl<P: StateProcessor + ?Sized> StateProcessor for Box<P> {
    fn infer(&self, batch: Array2<f32>) -> Result<Array2<f32>> {
        (**self).infer(batch)
    }
}
