//! Configuration errors reported by [`ProgressCircleBuilder::build`](crate::ProgressCircleBuilder::build).

use thiserror::Error;

/// Why a progress circle could not be configured.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Animated mode was requested but no progress source was supplied.
    #[error("animated progress requires a progress source")]
    MissingProgressSource,

    /// A progress source was supplied while animated mode is off.
    #[error("progress source supplied without enabling animated mode")]
    UnexpectedProgressSource,

    /// The surface size must be finite and positive.
    #[error("invalid size {0}: must be finite and greater than zero")]
    InvalidSize(f64),

    /// The stroke thickness must be finite and non-negative.
    #[error("invalid thickness {0}: must be finite and not negative")]
    InvalidThickness(f64),

    /// The border width must be finite and non-negative.
    #[error("invalid border width {0}: must be finite and not negative")]
    InvalidBorderWidth(f64),
}
