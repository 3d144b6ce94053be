//! Pure coordinate math for the circular grid buffer.
//!
//! All transforms between world positions and buffer indices live here, so
//! the sliding-window update and submap extraction share one wraparound
//! routine instead of growing divergent modulo logic.
//!
//! Conventions:
//! - Buffer axis 0 runs antiparallel to world X, axis 1 antiparallel to
//!   world Y. Cell (0, 0) is the corner of maximal world coordinates.
//! - A position is inside the map iff it lies in `(c - L/2, c + L/2]` per
//!   axis, where `c` is the map center and `L` the map length.
//! - The stored `start_index` marks the physical cell holding logical
//!   index (0, 0); the buffer itself never rotates.

use crate::core::{GridIndex, GridSize, Position};

/// Wrap a single index component into `[0, size)`.
#[inline]
pub fn wrap_index_value(index: i32, size: i32) -> i32 {
    debug_assert!(size > 0);
    index.rem_euclid(size)
}

/// Wrap both index components into `[0, size)`.
#[inline]
pub fn wrap_index(index: GridIndex, size: GridSize) -> GridIndex {
    GridIndex::new(
        wrap_index_value(index.x, size.x),
        wrap_index_value(index.y, size.y),
    )
}

/// Translate a logical (unwrapped) index into a physical buffer index.
#[inline]
pub fn buffer_index_from_logical(logical: GridIndex, size: GridSize, start: GridIndex) -> GridIndex {
    wrap_index(logical + start, size)
}

/// Translate a physical buffer index into a logical (unwrapped) index.
#[inline]
pub fn logical_index_from_buffer(buffer: GridIndex, size: GridSize, start: GridIndex) -> GridIndex {
    wrap_index(buffer - start, size)
}

/// Check whether a world position lies within the map extent.
pub fn is_position_within(position: Position, length: Position, map_position: Position) -> bool {
    // Buffer-order offset from the maximal corner: 0 at the corner of
    // cell (0, 0), growing toward higher indices.
    let u = map_position + length * 0.5 - position;
    u.x >= 0.0 && u.y >= 0.0 && u.x < length.x && u.y < length.y
}

/// Convert a world position to a physical buffer index.
///
/// Returns `None` when the position lies outside the map extent.
pub fn position_to_index(
    position: Position,
    length: Position,
    map_position: Position,
    resolution: f32,
    size: GridSize,
    start_index: GridIndex,
) -> Option<GridIndex> {
    if !is_position_within(position, length, map_position) {
        return None;
    }
    let u = map_position + length * 0.5 - position;
    let logical = GridIndex::new(
        (u.x / resolution).floor() as i32,
        (u.y / resolution).floor() as i32,
    );
    Some(buffer_index_from_logical(logical, size, start_index))
}

/// Convert a physical buffer index to the world position of the cell center.
///
/// Returns `None` when the index lies outside `[0, size)`.
pub fn index_to_position(
    index: GridIndex,
    length: Position,
    map_position: Position,
    resolution: f32,
    size: GridSize,
    start_index: GridIndex,
) -> Option<Position> {
    if !size.contains(index) {
        return None;
    }
    let logical = logical_index_from_buffer(index, size, start_index);
    // First cell center sits half a cell inside the maximal corner.
    Some(Position::new(
        map_position.x + (length.x - resolution) * 0.5 - logical.x as f32 * resolution,
        map_position.y + (length.y - resolution) * 0.5 - logical.y as f32 * resolution,
    ))
}

/// Quantize a world-position delta to a whole-cell index shift.
///
/// Rounds half away from zero per axis, then negates into buffer order
/// (positive world motion decreases the buffer index).
pub fn index_shift_from_position_shift(shift: Position, resolution: f32) -> GridIndex {
    GridIndex::new(
        -round_half_away(shift.x / resolution),
        -round_half_away(shift.y / resolution),
    )
}

/// The grid-aligned world delta corresponding to a whole-cell index shift.
///
/// Inverse of [`index_shift_from_position_shift`] on its image.
pub fn position_shift_from_index_shift(shift: GridIndex, resolution: f32) -> Position {
    Position::new(-shift.x as f32 * resolution, -shift.y as f32 * resolution)
}

#[inline]
fn round_half_away(value: f32) -> i32 {
    (value + 0.5 * value.signum()) as i32
}

/// Clamp a world position into the map extent, staying strictly inside.
///
/// Used to pin submap query corners onto the source map before indexing
/// them; positions already inside are unchanged.
pub fn clamp_position_to_map(
    position: Position,
    length: Position,
    map_position: Position,
) -> Position {
    let mut u = map_position + length * 0.5 - position;
    u.x = clamp_component(u.x, length.x, position.x);
    u.y = clamp_component(u.y, length.y, position.y);
    map_position + length * 0.5 - u
}

fn clamp_component(u: f32, length: f32, position: f32) -> f32 {
    let mut epsilon = 10.0 * f32::EPSILON;
    if position.abs() > 1.0 {
        epsilon *= position.abs();
    }
    if u <= 0.0 {
        epsilon
    } else if u >= length {
        length - epsilon
    } else {
        u
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const LENGTH: Position = Position { x: 5.0, y: 4.0 };
    const CENTER: Position = Position { x: 1.0, y: -0.5 };
    const RESOLUTION: f32 = 0.5;
    const SIZE: GridSize = GridSize { x: 10, y: 8 };

    #[test]
    fn wrap_handles_negative_values() {
        assert_eq!(wrap_index_value(-1, 5), 4);
        assert_eq!(wrap_index_value(-6, 5), 4);
        assert_eq!(wrap_index_value(7, 5), 2);
        assert_eq!(wrap_index_value(0, 5), 0);
    }

    #[test]
    fn logical_buffer_round_trip() {
        let size = GridSize::new(6, 5);
        let start = GridIndex::new(4, 2);
        for x in 0..6 {
            for y in 0..5 {
                let logical = GridIndex::new(x, y);
                let buffer = buffer_index_from_logical(logical, size, start);
                assert_eq!(logical_index_from_buffer(buffer, size, start), logical);
            }
        }
    }

    #[test]
    fn window_membership_is_half_open() {
        // The maximal corner belongs to the map, the minimal one does not.
        assert!(is_position_within(
            Position::new(CENTER.x + 2.5, CENTER.y + 2.0),
            LENGTH,
            CENTER
        ));
        assert!(!is_position_within(
            Position::new(CENTER.x - 2.5, CENTER.y),
            LENGTH,
            CENTER
        ));
        assert!(is_position_within(CENTER, LENGTH, CENTER));
    }

    #[test]
    fn maximal_corner_maps_to_cell_zero() {
        let corner = Position::new(CENTER.x + 2.5, CENTER.y + 2.0);
        let index =
            position_to_index(corner, LENGTH, CENTER, RESOLUTION, SIZE, GridIndex::ZERO).unwrap();
        assert_eq!(index, GridIndex::ZERO);
    }

    #[test]
    fn outside_position_has_no_index() {
        let outside = Position::new(CENTER.x + 3.0, CENTER.y);
        assert!(
            position_to_index(outside, LENGTH, CENTER, RESOLUTION, SIZE, GridIndex::ZERO).is_none()
        );
    }

    #[test]
    fn position_index_round_trip_is_within_half_a_cell() {
        let start = GridIndex::new(3, 6);
        let mut p = Position::new(CENTER.x - 2.4, CENTER.y - 1.9);
        while p.x < CENTER.x + 2.5 {
            p.y = CENTER.y - 1.9;
            while p.y < CENTER.y + 2.0 {
                let index =
                    position_to_index(p, LENGTH, CENTER, RESOLUTION, SIZE, start).unwrap();
                let back =
                    index_to_position(index, LENGTH, CENTER, RESOLUTION, SIZE, start).unwrap();
                assert!((back.x - p.x).abs() <= RESOLUTION * 0.5 + 1e-5);
                assert!((back.y - p.y).abs() <= RESOLUTION * 0.5 + 1e-5);
                p.y += 0.3;
            }
            p.x += 0.3;
        }
    }

    #[test]
    fn index_shift_rounds_half_away_from_zero() {
        let r = 1.0;
        assert_eq!(
            index_shift_from_position_shift(Position::new(0.4, -0.4), r),
            GridIndex::ZERO
        );
        assert_eq!(
            index_shift_from_position_shift(Position::new(0.5, -0.5), r),
            GridIndex::new(-1, 1)
        );
        assert_eq!(
            index_shift_from_position_shift(Position::new(2.2, -1.6), r),
            GridIndex::new(-2, 2)
        );
    }

    #[test]
    fn shift_round_trip_is_grid_aligned() {
        let shift = GridIndex::new(-3, 2);
        let aligned = position_shift_from_index_shift(shift, RESOLUTION);
        assert_relative_eq!(aligned.x, 1.5);
        assert_relative_eq!(aligned.y, -1.0);
        assert_eq!(index_shift_from_position_shift(aligned, RESOLUTION), shift);
    }

    #[test]
    fn clamp_pins_outside_positions_to_the_edge() {
        let outside = Position::new(CENTER.x + 10.0, CENTER.y);
        let clamped = clamp_position_to_map(outside, LENGTH, CENTER);
        assert!(is_position_within(clamped, LENGTH, CENTER));
        assert_relative_eq!(clamped.x, CENTER.x + 2.5, epsilon = 1e-4);
        // Positions already inside are untouched.
        let inside = Position::new(CENTER.x + 0.3, CENTER.y - 0.7);
        let unclamped = clamp_position_to_map(inside, LENGTH, CENTER);
        assert_relative_eq!(unclamped.x, inside.x, epsilon = 1e-6);
        assert_relative_eq!(unclamped.y, inside.y, epsilon = 1e-6);
    }
}
