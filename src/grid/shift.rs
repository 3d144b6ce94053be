//! Sliding-window recentering.
//!
//! Recentering never moves stored data. The position delta is quantized
//! to whole cells, the start index slides (wrapped) by that shift, and
//! only the physical lines vacated by the shift are invalidated — in the
//! basic layers. Non-basic layers keep stale values and are expected to
//! be recomputed downstream from basic-layer validity. Cost is
//! O(vacated cells), not O(map).

use log::debug;

use crate::core::{math, GridIndex, GridSize, Position};
use crate::grid::map::GridMap;

/// One vacated strip of the buffer, spanning the full other axis.
///
/// Describes cells that entered the window and need fresh data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VacatedRegion {
    /// Physical buffer index of the strip's first cell.
    pub index: GridIndex,
    /// Strip extent in cells.
    pub size: GridSize,
}

/// Outcome of a [`GridMap::recenter`] call.
#[derive(Clone, Debug, Default)]
pub struct MoveResult {
    /// Whether any axis actually shifted. False means the buffer and
    /// start index are bit-identical to before the call.
    pub moved: bool,
    /// Vacated strips needing fresh data, one or two per shifted axis.
    /// Empty when an axis shift dropped the entire window (the whole map
    /// was invalidated; no strip describes that).
    pub new_regions: Vec<VacatedRegion>,
}

/// Contiguous run of physical lines along one buffer axis.
#[derive(Clone, Copy)]
struct Lines {
    index: i32,
    n: i32,
}

impl GridMap {
    /// Recenter the map window onto `target`, invalidating exactly the
    /// vacated cells.
    ///
    /// The applied position change is the cell-quantized shift, so the
    /// map corner stays resolution-aligned; `position()` afterwards may
    /// differ from `target` by up to half a cell per axis. A shift of at
    /// least the full buffer size on either axis drops the whole window:
    /// every layer is sentinel-filled, basic or not.
    ///
    /// Panics if [`GridMap::set_geometry`] was never called.
    pub fn recenter(&mut self, target: Position) -> MoveResult {
        assert!(
            self.resolution() > 0.0,
            "recenter requires a configured geometry, resolution is {}",
            self.resolution()
        );
        let position_shift = target - self.position();
        let index_shift = math::index_shift_from_position_shift(position_shift, self.resolution());
        if index_shift == GridIndex::ZERO {
            return MoveResult::default();
        }
        let aligned_shift = math::position_shift_from_index_shift(index_shift, self.resolution());

        let size = self.size().to_array();
        let start = self.start_index().to_array();
        let shift = index_shift.to_array();

        // Vacated line runs per axis; at most two when the run crosses
        // the buffer's wraparound boundary.
        let mut vacated: [Vec<Lines>; 2] = [Vec::new(), Vec::new()];

        for axis in 0..2 {
            let s = shift[axis];
            if s == 0 {
                continue;
            }
            if s.abs() >= size[axis] {
                // The window moved past all previous content.
                debug!(
                    "recenter dropped the entire window (axis {axis} shift {s}, size {})",
                    size[axis]
                );
                self.clear_all();
                continue;
            }

            let sign = if s > 0 { 1 } else { -1 };
            let first = start[axis] - if sign < 0 { 1 } else { 0 };
            let last = first - sign + s;
            let n = s.abs();
            let index = math::wrap_index_value(if sign > 0 { first } else { last }, size[axis]);

            if index + n <= size[axis] {
                self.clear_lines(axis, index, n);
                vacated[axis].push(Lines { index, n });
            } else {
                // The run crosses the wraparound boundary; split it at
                // the physical end of the buffer.
                let first_n = size[axis] - index;
                self.clear_lines(axis, index, first_n);
                vacated[axis].push(Lines { index, n: first_n });

                let second_n = n - first_n;
                self.clear_lines(axis, 0, second_n);
                vacated[axis].push(Lines {
                    index: 0,
                    n: second_n,
                });
            }
        }

        self.shift_start_index(index_shift);
        self.shift_position(aligned_shift);

        let full = self.size();
        let mut new_regions = Vec::with_capacity(vacated[0].len() + vacated[1].len());
        for lines in &vacated[0] {
            new_regions.push(VacatedRegion {
                index: GridIndex::new(lines.index, 0),
                size: GridSize::new(lines.n, full.y),
            });
        }
        for lines in &vacated[1] {
            new_regions.push(VacatedRegion {
                index: GridIndex::new(0, lines.index),
                size: GridSize::new(full.x, lines.n),
            });
        }

        MoveResult {
            moved: true,
            new_regions,
        }
    }
}
