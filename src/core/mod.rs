//! Core types and pure math for the layered grid map.
//!
//! - [`Position`], [`Position3`]: world-frame coordinates (meters)
//! - [`GridIndex`], [`GridSize`]: circular-buffer cell indices and counts
//! - [`Matrix`]: dense per-layer cell storage
//! - [`math`]: position↔index transforms and wraparound normalization

pub mod math;
mod matrix;
mod point;

pub use matrix::Matrix;
pub use point::{GridIndex, GridSize, Position, Position3};
