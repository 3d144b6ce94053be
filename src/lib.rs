//! # Chakra-Grid: Circular-Buffer Grid Maps for Mobile Robots
//!
//! A multi-layer, geometrically-indexed 2D grid container for
//! robot-centric spatial maps (elevation, cost, traversability) that
//! follow a moving agent at high frequency.
//!
//! The container is a ring buffer in two dimensions: the map's
//! world-anchored window slides by updating a per-axis start index and
//! the center position, never by shifting stored data. A recenter call
//! invalidates only the cells vacated by the shift, so its cost is
//! proportional to the moved distance, not the map size.
//!
//! ## Quick start
//!
//! ```rust
//! use chakra_grid::{GridMap, Position};
//!
//! let mut map = GridMap::new(["elevation"]);
//! map.set_basic_layers(["elevation"]);
//! map.set_geometry(Position::new(5.0, 5.0), 1.0, Position::ZERO);
//! map.add_constant("elevation", 0.0);
//!
//! // Follow the robot: one strip of cells becomes "no data", the rest
//! // keeps its values and its world meaning.
//! let result = map.recenter(Position::new(1.0, 0.0));
//! assert!(result.moved);
//! assert_eq!(result.new_regions.len(), 1);
//!
//! // Cut out an independent, non-circular snapshot.
//! let sub = map.submap(map.position(), Position::new(3.0, 3.0)).unwrap();
//! assert_eq!(sub.start_index(), chakra_grid::GridIndex::ZERO);
//! ```
//!
//! ## Coordinate frame
//!
//! World coordinates follow the ROS REP-103 convention (X forward, Y
//! left, meters). Buffer axis 0 runs antiparallel to world X and axis 1
//! antiparallel to world Y: cell (0, 0) sits at the corner of maximal
//! world coordinates. Because the buffer is circular, a physical cell's
//! world meaning changes across recenter calls — always re-derive it
//! through [`GridMap::position_at`] / [`GridMap::index_at`], never cache
//! a buffer index across a [`GridMap::recenter`].
//!
//! ## Layers and validity
//!
//! A map holds any number of named layers sharing one geometry. Cells
//! store `f32` values; `f32::NAN` is the "no data" sentinel. A subset of
//! layers can be designated *basic*: they define per-cell validity and
//! are the only layers invalidated by a window shift — derived layers
//! are expected to be recomputed downstream.
//!
//! ## Modules
//!
//! - [`core`]: value types ([`Position`], [`GridIndex`], [`Matrix`]) and
//!   the pure coordinate math ([`core::math`])
//! - [`grid`]: the [`GridMap`] container, recentering and submap
//!   extraction

pub mod core;
pub mod error;
pub mod grid;

pub use crate::core::{GridIndex, GridSize, Matrix, Position, Position3};
pub use crate::error::{GridError, Result};
pub use crate::grid::{
    buffer_regions_for_submap, BufferRegion, GridMap, LayerStore, MoveResult, Quadrant,
    SubmapGeometry, VacatedRegion,
};
