//! Submap extraction from the circular buffer.
//!
//! A queried rectangle is first clipped against the source extent
//! ([`SubmapGeometry`]), then mapped onto the physical buffer as up to
//! four axis-aligned blocks ([`BufferRegion`]) whose reassembly undoes
//! the circular wraparound. The extracted map is a deep, disjoint copy
//! with a zero start index.

use log::warn;

use crate::core::{math, GridIndex, GridSize, Position};
use crate::grid::map::GridMap;

/// Geometry of a clipped submap query.
///
/// Produced by [`SubmapGeometry::new`]; consumed by
/// [`GridMap::set_submap_geometry`] and the region decomposition.
#[derive(Clone, Copy, Debug)]
pub struct SubmapGeometry {
    /// Physical source-buffer index of the submap's top-left cell (the
    /// corner of maximal world coordinates).
    pub top_left_index: GridIndex,
    /// Submap cell counts.
    pub size: GridSize,
    /// World position of the submap center (after clipping).
    pub position: Position,
    /// Submap side lengths (`size * resolution`).
    pub length: Position,
    /// Cell edge length, inherited from the source.
    pub resolution: f32,
    /// Cell of the submap containing the requested center position,
    /// clamped into the clipped extent.
    pub requested_index_in_submap: GridIndex,
}

impl SubmapGeometry {
    /// Clip a rectangular query against a source map.
    ///
    /// Returns `None` when the query rectangle and the source extent are
    /// disjoint; a partial overlap yields a shrunk geometry.
    pub fn new(map: &GridMap, position: Position, length: Position) -> Option<Self> {
        let map_position = map.position();
        let map_length = map.length();
        let resolution = map.resolution();

        let half = length * 0.5;
        let map_half = map_length * 0.5;
        let disjoint = position.x + half.x <= map_position.x - map_half.x
            || position.x - half.x >= map_position.x + map_half.x
            || position.y + half.y <= map_position.y - map_half.y
            || position.y - half.y >= map_position.y + map_half.y;
        if disjoint {
            return None;
        }

        // Pin both query corners onto the source, then index them. The
        // top-left corner is the one of maximal world coordinates.
        let top_left_position =
            math::clamp_position_to_map(position + half, map_length, map_position);
        let bottom_right_position =
            math::clamp_position_to_map(position - half, map_length, map_position);
        let top_left_index = map.index_at(top_left_position)?;
        let bottom_right_index = map.index_at(bottom_right_position)?;

        let top_left_logical =
            math::logical_index_from_buffer(top_left_index, map.size(), map.start_index());
        let bottom_right_logical =
            math::logical_index_from_buffer(bottom_right_index, map.size(), map.start_index());
        let size = GridSize::new(
            bottom_right_logical.x - top_left_logical.x + 1,
            bottom_right_logical.y - top_left_logical.y + 1,
        );
        let sub_length = Position::new(
            size.x as f32 * resolution,
            size.y as f32 * resolution,
        );

        // Submap center from the top-left cell's outer corner.
        let top_left_cell = map.position_at(top_left_index)?;
        let corner = top_left_cell + Position::new(resolution * 0.5, resolution * 0.5);
        let sub_position = corner - sub_length * 0.5;

        let requested_index_in_submap = math::position_to_index(
            math::clamp_position_to_map(position, sub_length, sub_position),
            sub_length,
            sub_position,
            resolution,
            size,
            GridIndex::ZERO,
        )?;

        Some(Self {
            top_left_index,
            size,
            position: sub_position,
            length: sub_length,
            resolution,
            requested_index_in_submap,
        })
    }
}

/// Corner of the destination a physical source block maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    /// Block before the wraparound on both axes.
    TopLeft,
    /// Block that wrapped on axis 1 only.
    TopRight,
    /// Block that wrapped on axis 0 only.
    BottomLeft,
    /// Block that wrapped on both axes.
    BottomRight,
}

/// One physical source block of a wrapped submap copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferRegion {
    /// Physical buffer index of the block's first cell in the source.
    pub index: GridIndex,
    /// Block extent in cells.
    pub size: GridSize,
    /// Destination corner the block belongs to.
    pub quadrant: Quadrant,
}

/// Span of one buffer axis, with the wraparound split applied.
#[derive(Clone, Copy)]
struct Span {
    index: i32,
    n: i32,
}

fn split_span(start: i32, n: i32, size: i32) -> (Span, Option<Span>) {
    if start + n <= size {
        (Span { index: start, n }, None)
    } else {
        (
            Span {
                index: start,
                n: size - start,
            },
            Some(Span {
                index: 0,
                n: n - (size - start),
            }),
        )
    }
}

/// Decompose a logically-contiguous submap into physical source blocks.
///
/// `top_left` is the physical buffer index of the submap's first cell.
/// Returns `None` when the unwrapped request exceeds the source bounds.
pub fn buffer_regions_for_submap(
    top_left: GridIndex,
    submap_size: GridSize,
    size: GridSize,
    start_index: GridIndex,
) -> Option<Vec<BufferRegion>> {
    let logical = math::logical_index_from_buffer(top_left, size, start_index);
    if logical.x + submap_size.x > size.x || logical.y + submap_size.y > size.y {
        warn!(
            "cannot access submap of size ({}, {}) at logical index ({}, {})",
            submap_size.x, submap_size.y, logical.x, logical.y
        );
        return None;
    }

    let (rows_a, rows_b) = split_span(top_left.x, submap_size.x, size.x);
    let (cols_a, cols_b) = split_span(top_left.y, submap_size.y, size.y);

    let mut regions = Vec::with_capacity(4);
    let mut push = |rows: Span, cols: Span, quadrant: Quadrant| {
        regions.push(BufferRegion {
            index: GridIndex::new(rows.index, cols.index),
            size: GridSize::new(rows.n, cols.n),
            quadrant,
        });
    };

    push(rows_a, cols_a, Quadrant::TopLeft);
    if let Some(cols) = cols_b {
        push(rows_a, cols, Quadrant::TopRight);
    }
    if let Some(rows) = rows_b {
        push(rows, cols_a, Quadrant::BottomLeft);
        if let Some(cols) = cols_b {
            push(rows, cols, Quadrant::BottomRight);
        }
    }
    Some(regions)
}

impl GridMap {
    /// Extract an independent, non-circular snapshot of a rectangular
    /// world region.
    ///
    /// The result shares the source's layer names, basic layers,
    /// timestamp and frame id, has a zero start index, and owns its data
    /// outright. The query is clipped to the source extent; `None` means
    /// the query was disjoint from the source or could not be
    /// decomposed — a routine outcome of a moving window, not an error.
    pub fn submap(&self, position: Position, length: Position) -> Option<GridMap> {
        let geometry = SubmapGeometry::new(self, position, length)?;
        self.extract_submap(&geometry)
    }

    /// Like [`GridMap::submap`], additionally returning the submap cell
    /// containing the requested center position (clamped into the
    /// clipped extent, so a partially overlapping query still yields a
    /// valid index).
    pub fn submap_with_index(
        &self,
        position: Position,
        length: Position,
    ) -> Option<(GridMap, GridIndex)> {
        let geometry = SubmapGeometry::new(self, position, length)?;
        let submap = self.extract_submap(&geometry)?;
        Some((submap, geometry.requested_index_in_submap))
    }

    fn extract_submap(&self, geometry: &SubmapGeometry) -> Option<GridMap> {
        let mut submap = GridMap::new(self.layers().to_vec());
        submap.set_basic_layers(self.basic_layers().to_vec());
        submap.set_timestamp(self.timestamp());
        submap.set_frame_id(self.frame_id());
        submap.set_submap_geometry(geometry);

        let regions = buffer_regions_for_submap(
            geometry.top_left_index,
            submap.size(),
            self.size(),
            self.start_index(),
        )?;

        let sub_size = submap.size();
        for layer in self.layers() {
            let src = self.get(layer).ok()?;
            let dst = submap.get_mut(layer).ok()?;
            for region in &regions {
                let dst_index = match region.quadrant {
                    Quadrant::TopLeft => GridIndex::ZERO,
                    Quadrant::TopRight => GridIndex::new(0, sub_size.y - region.size.y),
                    Quadrant::BottomLeft => GridIndex::new(sub_size.x - region.size.x, 0),
                    Quadrant::BottomRight => GridIndex::new(
                        sub_size.x - region.size.x,
                        sub_size.y - region.size.y,
                    ),
                };
                dst.copy_block(dst_index, src, region.index, region.size);
            }
        }

        Some(submap)
    }
}
