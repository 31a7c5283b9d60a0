//! Errors in the library.
use thiserror::Error;

/// Errors raised by the adapter itself.
///
/// Failures of the simulation or of a state processor are not wrapped; they
/// are passed to the caller as they are.
#[derive(Error, Debug, PartialEq)]
pub enum ReducedEnvError {
    /// The raw state is too short to take its first six components.
    #[error("raw state has {0} components, at least 6 are required")]
    ShortRawState(usize),

    /// The state passed to the velocity check does not have six components.
    #[error("state has {0} components, expected [x, y, vx, vy, angle, angular_velocity]")]
    StateArity(usize),

    /// A state processor is given without the dimension of its output.
    #[error("reduced_dim is required when a state processor is given")]
    MissingReducedDim,

    /// The dimension of the reduced observation is zero.
    #[error("reduced_dim must be positive")]
    ZeroReducedDim,

    /// Bounds of a box space are inconsistent.
    #[error("invalid box bounds: {0}")]
    InvalidBounds(String),
}
