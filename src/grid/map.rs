//! The multi-layer grid map aggregate.
//!
//! Owns the geometry (length, resolution, world position, cell counts),
//! the circular start index, and the named layer matrices. The physical
//! storage never rotates: only `start_index` and `position` change when
//! the window recenters (see [`recenter`](GridMap::recenter)), so a
//! physical cell can represent different world locations at different
//! times. World meaning is always re-derived from `(start_index,
//! position)` at access time.

use serde::{Deserialize, Serialize};

use crate::core::{math, GridIndex, GridSize, Matrix, Position, Position3};
use crate::error::{GridError, Result};
use crate::grid::layers::LayerStore;
use crate::grid::submap::SubmapGeometry;

/// A multi-layer, geometrically-indexed 2D grid with circular addressing.
///
/// All layers share one geometry. Cells holding `f32::NAN` carry no data;
/// see the `is_valid_*` queries.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GridMap {
    store: LayerStore,
    position: Position,
    length: Position,
    resolution: f32,
    size: GridSize,
    start_index: GridIndex,
    timestamp: u64,
    frame_id: String,
}

impl GridMap {
    /// Create a map with the given layer names and zero geometry.
    ///
    /// Call [`set_geometry`](Self::set_geometry) before storing data.
    pub fn new<I, S>(layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            store: LayerStore::new(layers.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    // ── Geometry ────────────────────────────────────────────────────────

    /// Set the map geometry and re-allocate all layers.
    ///
    /// Cell counts are the requested length over resolution, rounded to
    /// the nearest integer per axis; the stored length snaps to
    /// `size * resolution` and may differ slightly from the request. All
    /// layers are cleared to the sentinel and the start index resets to
    /// zero.
    ///
    /// Panics if either length component or the resolution is not
    /// positive; that is a caller contract violation, not a runtime
    /// condition.
    pub fn set_geometry(&mut self, length: Position, resolution: f32, position: Position) {
        assert!(
            length.x > 0.0 && length.y > 0.0,
            "map length must be positive, got ({}, {})",
            length.x,
            length.y
        );
        assert!(
            resolution > 0.0,
            "map resolution must be positive, got {}",
            resolution
        );

        let size = GridSize::new(
            (length.x / resolution).round() as i32,
            (length.y / resolution).round() as i32,
        );
        self.resize(size);
        self.clear_all();

        self.resolution = resolution;
        self.length = Position::new(size.x as f32 * resolution, size.y as f32 * resolution);
        self.position = position;
        self.start_index = GridIndex::ZERO;
    }

    /// Set the geometry from a clipped submap description.
    pub fn set_submap_geometry(&mut self, geometry: &SubmapGeometry) {
        self.set_geometry(geometry.length, geometry.resolution, geometry.position);
    }

    /// Re-allocate every layer matrix to a new cell count.
    pub(crate) fn resize(&mut self, size: GridSize) {
        self.size = size;
        for matrix in self.store.matrices_mut() {
            matrix.resize(size);
        }
    }

    // ── Layers ──────────────────────────────────────────────────────────

    /// Add a layer, overwriting its data if the name already exists.
    ///
    /// Panics if the matrix shape does not match the map size.
    pub fn add(&mut self, layer: &str, data: Matrix) {
        assert!(
            data.size() == self.size,
            "layer '{}' has shape ({}, {}), map size is ({}, {})",
            layer,
            data.rows(),
            data.cols(),
            self.size.x,
            self.size.y
        );
        self.store.insert(layer, data);
    }

    /// Add a layer filled with a constant value.
    pub fn add_constant(&mut self, layer: &str, value: f32) {
        self.add(layer, Matrix::constant(self.size, value));
    }

    /// True if a layer with this name exists.
    #[inline]
    pub fn exists(&self, layer: &str) -> bool {
        self.store.exists(layer)
    }

    /// The layer's matrix.
    pub fn get(&self, layer: &str) -> Result<&Matrix> {
        self.store.get(layer)
    }

    /// The layer's matrix, mutably.
    ///
    /// The borrow ends before any structural mutation (`set_geometry`,
    /// `erase`, `recenter`) can run, so stale views cannot outlive a
    /// window shift.
    pub fn get_mut(&mut self, layer: &str) -> Result<&mut Matrix> {
        self.store.get_mut(layer)
    }

    /// Remove a layer. Returns whether it existed.
    pub fn erase(&mut self, layer: &str) -> bool {
        self.store.erase(layer)
    }

    /// Layer names in insertion order.
    #[inline]
    pub fn layers(&self) -> &[String] {
        self.store.layers()
    }

    /// Replace the basic-layer subset (the layers that define cell
    /// validity and get invalidated on window shifts).
    pub fn set_basic_layers<I, S>(&mut self, layers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.store
            .set_basic_layers(layers.into_iter().map(Into::into).collect());
    }

    /// Names of the basic layers.
    #[inline]
    pub fn basic_layers(&self) -> &[String] {
        self.store.basic_layers()
    }

    // ── Circular access ─────────────────────────────────────────────────

    /// Buffer index of the cell containing a world position, or `None`
    /// when the position lies outside the map.
    pub fn index_at(&self, position: Position) -> Option<GridIndex> {
        math::position_to_index(
            position,
            self.length,
            self.position,
            self.resolution,
            self.size,
            self.start_index,
        )
    }

    /// World position of a cell center, or `None` when the index is out
    /// of range.
    pub fn position_at(&self, index: GridIndex) -> Option<Position> {
        math::index_to_position(
            index,
            self.length,
            self.position,
            self.resolution,
            self.size,
            self.start_index,
        )
    }

    /// True if the world position lies within the current map extent.
    pub fn is_inside(&self, position: Position) -> bool {
        math::is_position_within(position, self.length, self.position)
    }

    /// Cell value by buffer index.
    ///
    /// The index must already be circularly resolved (within `[0, size)`);
    /// a missing layer is a recoverable error, an out-of-range index a
    /// panic.
    pub fn at(&self, layer: &str, index: GridIndex) -> Result<f32> {
        Ok(self.store.get(layer)?.get(index))
    }

    /// Mutable cell value by buffer index.
    pub fn at_mut(&mut self, layer: &str, index: GridIndex) -> Result<&mut f32> {
        Ok(self.store.get_mut(layer)?.get_mut(index))
    }

    /// Cell value by world position.
    ///
    /// Distinguishes a position outside the window
    /// ([`GridError::PositionOutOfMap`]) from an absent layer
    /// ([`GridError::LayerNotFound`]).
    pub fn at_position(&self, layer: &str, position: Position) -> Result<f32> {
        let index = self
            .index_at(position)
            .ok_or(GridError::PositionOutOfMap {
                x: position.x,
                y: position.y,
            })?;
        self.at(layer, index)
    }

    /// Mutable cell value by world position.
    pub fn at_position_mut(&mut self, layer: &str, position: Position) -> Result<&mut f32> {
        let index = self
            .index_at(position)
            .ok_or(GridError::PositionOutOfMap {
                x: position.x,
                y: position.y,
            })?;
        self.at_mut(layer, index)
    }

    // ── Validity ────────────────────────────────────────────────────────

    /// True if every basic layer holds finite data at this index.
    ///
    /// False when no basic layers are configured.
    pub fn is_valid(&self, index: GridIndex) -> bool {
        self.is_valid_layers(index, self.store.basic_layers())
    }

    /// True if the named layer holds finite data at this index.
    ///
    /// A missing layer never holds data, so it reads as invalid.
    pub fn is_valid_layer(&self, index: GridIndex, layer: &str) -> bool {
        self.store
            .get(layer)
            .map(|m| m.get(index).is_finite())
            .unwrap_or(false)
    }

    /// True if the list is non-empty and every named layer holds finite
    /// data at this index.
    pub fn is_valid_layers<S: AsRef<str>>(&self, index: GridIndex, layers: &[S]) -> bool {
        !layers.is_empty()
            && layers
                .iter()
                .all(|layer| self.is_valid_layer(index, layer.as_ref()))
    }

    /// 3D point combining the cell's world position with the layer value
    /// as height. `None` if the cell holds no data in that layer.
    pub fn position3(&self, layer: &str, index: GridIndex) -> Option<Position3> {
        if !self.is_valid_layer(index, layer) {
            return None;
        }
        let position = self.position_at(index)?;
        let z = self.store.get(layer).ok()?.get(index);
        Some(Position3::new(position.x, position.y, z))
    }

    /// 3-vector composed from the layers `prefix + "x"/"y"/"z"`.
    /// `None` unless all three components are finite at this index.
    pub fn vector(&self, layer_prefix: &str, index: GridIndex) -> Option<[f32; 3]> {
        let names = [
            format!("{layer_prefix}x"),
            format!("{layer_prefix}y"),
            format!("{layer_prefix}z"),
        ];
        if !self.is_valid_layers(index, &names) {
            return None;
        }
        let mut out = [0.0; 3];
        for (value, name) in out.iter_mut().zip(&names) {
            *value = self.store.get(name).ok()?.get(index);
        }
        Some(out)
    }

    // ── Clearing ────────────────────────────────────────────────────────

    /// Sentinel-fill one layer.
    pub fn clear(&mut self, layer: &str) -> Result<()> {
        self.store.get_mut(layer)?.fill(f32::NAN);
        Ok(())
    }

    /// Sentinel-fill all basic layers.
    pub fn clear_basic(&mut self) {
        for matrix in self.store.basic_matrices_mut() {
            matrix.fill(f32::NAN);
        }
    }

    /// Sentinel-fill every layer.
    ///
    /// Broader than the strip invalidation done by a window shift, which
    /// touches only basic layers.
    pub fn clear_all(&mut self) {
        for matrix in self.store.matrices_mut() {
            matrix.fill(f32::NAN);
        }
    }

    /// Sentinel-fill `n` whole lines of the basic layers along one buffer
    /// axis, starting at physical line `start`.
    pub(crate) fn clear_lines(&mut self, axis: usize, start: i32, n: i32) {
        for matrix in self.store.basic_matrices_mut() {
            match axis {
                0 => matrix.fill_rows(start as usize, n as usize, f32::NAN),
                _ => matrix.fill_cols(start as usize, n as usize, f32::NAN),
            }
        }
    }

    // ── Geometry and metadata accessors ─────────────────────────────────

    /// World position of the map center.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Physical side lengths in meters (always `size * resolution`).
    #[inline]
    pub fn length(&self) -> Position {
        self.length
    }

    /// Cell edge length in meters.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Cell counts per buffer axis.
    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Circular-buffer start index (physical cell of logical (0, 0)).
    #[inline]
    pub fn start_index(&self) -> GridIndex {
        self.start_index
    }

    /// Overwrite the start index. Components must lie in `[0, size)`.
    pub fn set_start_index(&mut self, start_index: GridIndex) {
        self.start_index = start_index;
    }

    pub(crate) fn shift_start_index(&mut self, shift: GridIndex) {
        self.start_index = math::wrap_index(self.start_index + shift, self.size);
    }

    pub(crate) fn shift_position(&mut self, shift: Position) {
        self.position += shift;
    }

    /// Map timestamp (opaque to the container).
    #[inline]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Set the map timestamp.
    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    /// Reset the timestamp to zero.
    pub fn reset_timestamp(&mut self) {
        self.timestamp = 0;
    }

    /// Coordinate frame identifier (opaque to the container).
    #[inline]
    pub fn frame_id(&self) -> &str {
        &self.frame_id
    }

    /// Set the coordinate frame identifier.
    pub fn set_frame_id(&mut self, frame_id: impl Into<String>) {
        self.frame_id = frame_id.into();
    }
}
