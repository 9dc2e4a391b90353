/// Invalid player configuration.
///
/// Returned by every constructor that validates its inputs, so a bad configuration fails at
/// construction instead of turning into NaN frame indexes later.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("frame sequence must contain at least one frame")]
    NoFrames,

    #[error("scroll distance factor must be a positive finite number, got {0}")]
    InvalidScrollDistance(f64),

    #[error("preload batch size must be at least 1")]
    EmptyBatch,

    #[error("mobile breakpoint must be a positive finite width, got {0}")]
    InvalidBreakpoint(f64),
}
