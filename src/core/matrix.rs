//! Dense cell storage for a single map layer.
//!
//! Row-major `Vec<f32>` backing, sized to the map's cell counts. Block
//! fills and copies work row by row with `copy_from_slice`, which LLVM
//! turns into memset/memcpy.

use serde::{Deserialize, Serialize};

use crate::core::{GridIndex, GridSize};

/// A 2D matrix of cell values for one layer.
///
/// Rows correspond to buffer axis 0, columns to buffer axis 1. The
/// sentinel value for "no data" is `f32::NAN`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Matrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a matrix of the given size, filled with the sentinel.
    pub fn sentinel(size: GridSize) -> Self {
        Self::constant(size, f32::NAN)
    }

    /// Create a matrix of the given size, filled with a constant value.
    pub fn constant(size: GridSize, value: f32) -> Self {
        let rows = size.x.max(0) as usize;
        let cols = size.y.max(0) as usize;
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Number of rows (buffer axis 0).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (buffer axis 1).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Matrix shape as a grid size.
    #[inline]
    pub fn size(&self) -> GridSize {
        GridSize::new(self.rows as i32, self.cols as i32)
    }

    /// Value at a buffer index. Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, index: GridIndex) -> f32 {
        self.data[self.offset(index)]
    }

    /// Mutable value at a buffer index. Panics if the index is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: GridIndex) -> &mut f32 {
        let offset = self.offset(index);
        &mut self.data[offset]
    }

    #[inline]
    fn offset(&self, index: GridIndex) -> usize {
        debug_assert!(self.size().contains(index));
        index.x as usize * self.cols + index.y as usize
    }

    /// Fill the whole matrix with one value.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Re-allocate to a new size. Contents are unspecified afterwards;
    /// callers clear explicitly.
    pub fn resize(&mut self, size: GridSize) {
        self.rows = size.x.max(0) as usize;
        self.cols = size.y.max(0) as usize;
        self.data.resize(self.rows * self.cols, f32::NAN);
    }

    /// Fill `n_rows` whole rows starting at `start_row` with one value.
    pub fn fill_rows(&mut self, start_row: usize, n_rows: usize, value: f32) {
        debug_assert!(start_row + n_rows <= self.rows);
        let begin = start_row * self.cols;
        let end = (start_row + n_rows) * self.cols;
        self.data[begin..end].fill(value);
    }

    /// Fill `n_cols` whole columns starting at `start_col` with one value.
    pub fn fill_cols(&mut self, start_col: usize, n_cols: usize, value: f32) {
        debug_assert!(start_col + n_cols <= self.cols);
        for row in 0..self.rows {
            let begin = row * self.cols + start_col;
            self.data[begin..begin + n_cols].fill(value);
        }
    }

    /// Copy a `(n_rows, n_cols)` block from `src` at `src_index` into this
    /// matrix at `dst_index`. Both blocks must lie fully inside their
    /// matrices.
    pub fn copy_block(
        &mut self,
        dst_index: GridIndex,
        src: &Matrix,
        src_index: GridIndex,
        block: GridSize,
    ) {
        let n_rows = block.x as usize;
        let n_cols = block.y as usize;
        debug_assert!(dst_index.x as usize + n_rows <= self.rows);
        debug_assert!(dst_index.y as usize + n_cols <= self.cols);
        debug_assert!(src_index.x as usize + n_rows <= src.rows);
        debug_assert!(src_index.y as usize + n_cols <= src.cols);

        for row in 0..n_rows {
            let src_begin = (src_index.x as usize + row) * src.cols + src_index.y as usize;
            let dst_begin = (dst_index.x as usize + row) * self.cols + dst_index.y as usize;
            self.data[dst_begin..dst_begin + n_cols]
                .copy_from_slice(&src.data[src_begin..src_begin + n_cols]);
        }
    }

    /// Iterate over all values.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied()
    }

    /// Raw row-major slice of the cell values.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}
