//! Configuration error types
//!
//! Invalid tuning is the only fallible path in the crate: it is rejected
//! once, when a game is constructed. Everything after that is infallible.

use thiserror::Error;

/// Errors raised while building or validating a [`crate::GameConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A dimension, speed or interval that must be strictly positive.
    #[error("invalid configuration: `{field}` must be positive and finite, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// A margin or offset that may be zero but not negative.
    #[error("invalid configuration: `{field}` must be non-negative and finite, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// A flap must push the bird upward (negative y).
    #[error("invalid configuration: `flap_velocity` must be negative, got {0}")]
    FlapNotUpward(f32),

    /// The gap swallows the whole playfield.
    #[error("invalid configuration: gap {gap} must be smaller than world height {world_height}")]
    GapTooLarge {
        /// Configured gap.
        gap: f32,
        /// Configured world height.
        world_height: f32,
    },

    /// No valid top-segment height exists for a pipe.
    #[error(
        "invalid configuration: gap {gap} plus two margins of {margin} exceed world height {world_height}"
    )]
    NoRoomForPipes {
        /// Configured gap.
        gap: f32,
        /// Configured pipe margin.
        margin: f32,
        /// Configured world height.
        world_height: f32,
    },

    /// The bird would start outside the playfield.
    #[error(
        "invalid configuration: bird start ({x}, {y}) with radius {radius} lies outside the world"
    )]
    BirdOutOfBounds {
        /// Fixed bird column.
        x: f32,
        /// Start height.
        y: f32,
        /// Collision radius.
        radius: f32,
    },

    /// The host passed unparsable JSON.
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
