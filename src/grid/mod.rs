//! The layered grid map container and its window algorithms.
//!
//! - [`GridMap`]: the aggregate — geometry, circular access, validity
//! - [`LayerStore`]: insertion-ordered layer bookkeeping
//! - [`shift`]: sliding-window recentering ([`GridMap::recenter`])
//! - [`submap`]: wrapped-buffer submap extraction ([`GridMap::submap`])

mod layers;
mod map;
mod shift;
mod submap;

pub use layers::LayerStore;
pub use map::GridMap;
pub use shift::{MoveResult, VacatedRegion};
pub use submap::{buffer_regions_for_submap, BufferRegion, Quadrant, SubmapGeometry};
