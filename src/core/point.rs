//! Position and index types for the layered grid map.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// World-frame position or extent (meters, f32).
///
/// Follows the ROS REP-103 convention: X forward, Y left. The same type
/// doubles as a physical side-length pair (always positive in that role).
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate in meters (forward).
    pub x: f32,
    /// Y coordinate in meters (left).
    pub y: f32,
}

impl Position {
    /// Zero position (origin).
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    /// Create a new position.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    #[inline]
    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Position {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Position::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Position {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Position::new(self.x - other.x, self.y - other.y)
    }
}

impl AddAssign for Position {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Mul<f32> for Position {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Position::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Position {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Position::new(-self.x, -self.y)
    }
}

/// World-frame 3D position (meters, f32).
///
/// Used when a layer value is lifted into the third dimension, e.g. an
/// elevation layer queried at a cell.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Position3 {
    /// X coordinate in meters.
    pub x: f32,
    /// Y coordinate in meters.
    pub y: f32,
    /// Z coordinate in meters (layer value).
    pub z: f32,
}

impl Position3 {
    /// Create a new 3D position.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Cell index into the circular buffer.
///
/// Axis 0 (`x`) runs antiparallel to world X, axis 1 (`y`) antiparallel to
/// world Y: cell (0, 0) sits at the corner of maximal world coordinates.
/// Components are kept within `[0, size)` wherever a buffer index is
/// stored; intermediate arithmetic may leave the range and is re-wrapped
/// through [`crate::core::math::wrap_index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridIndex {
    /// Index along buffer axis 0 (matrix row).
    pub x: i32,
    /// Index along buffer axis 1 (matrix column).
    pub y: i32,
}

impl GridIndex {
    /// Zero index.
    pub const ZERO: GridIndex = GridIndex { x: 0, y: 0 };

    /// Create a new index.
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Components as an array, indexed by buffer axis.
    #[inline]
    pub fn to_array(self) -> [i32; 2] {
        [self.x, self.y]
    }

    /// Build from per-axis components.
    #[inline]
    pub fn from_array(a: [i32; 2]) -> Self {
        Self { x: a[0], y: a[1] }
    }
}

impl Add for GridIndex {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridIndex::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridIndex {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridIndex::new(self.x - other.x, self.y - other.y)
    }
}

/// Cell counts per buffer axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSize {
    /// Cell count along buffer axis 0 (matrix rows).
    pub x: i32,
    /// Cell count along buffer axis 1 (matrix columns).
    pub y: i32,
}

impl GridSize {
    /// Zero size.
    pub const ZERO: GridSize = GridSize { x: 0, y: 0 };

    /// Create a new size.
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(self) -> usize {
        self.x as usize * self.y as usize
    }

    /// Components as an array, indexed by buffer axis.
    #[inline]
    pub fn to_array(self) -> [i32; 2] {
        [self.x, self.y]
    }

    /// True if the index lies within `[0, size)` on both axes.
    #[inline]
    pub fn contains(self, index: GridIndex) -> bool {
        index.x >= 0 && index.y >= 0 && index.x < self.x && index.y < self.y
    }
}
