//! Error types for chakra-grid.

use thiserror::Error;

/// Recoverable errors raised by grid map operations.
///
/// Malformed geometry and mismatched layer dimensions are programming
/// errors and assert instead; routine negative outcomes of a moving
/// window (clipped or disjoint submap queries) are `Option`s, not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// The named layer does not exist in the map.
    #[error("no layer '{0}' in map")]
    LayerNotFound(String),

    /// A position-indexed access fell outside the current map window.
    #[error("position ({x:.3}, {y:.3}) is outside the map")]
    PositionOutOfMap {
        /// Queried world X coordinate in meters.
        x: f32,
        /// Queried world Y coordinate in meters.
        y: f32,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GridError>;
