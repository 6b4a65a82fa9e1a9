//! Dense 2-D matrices with explicit storage order

use crate::error::Error;

/// Storage order of a [`Matrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// C order: columns vary fastest
    #[default]
    RowMajor,
    /// Fortran order: rows vary fastest
    ColumnMajor,
}

/// Dense matrix stored in one contiguous buffer.
///
/// A 0×0 matrix is "unshaped": decoding into it adopts the file's
/// dimensions. Any other matrix only accepts files of its own shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    layout: Layout,
    data: Vec<T>,
}

impl<T: Copy> Matrix<T> {
    /// Build from a buffer already in `layout` order
    pub fn new(rows: usize, cols: usize, layout: Layout, data: Vec<T>) -> Result<Self, Error> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(Error::DimensionMismatch {
                expected: vec![rows as u64, cols as u64],
                found: vec![data.len() as u64],
            });
        }
        Ok(Self {
            rows,
            cols,
            layout,
            data,
        })
    }

    /// Unshaped matrix that takes its dimensions from the first decode
    pub fn empty(layout: Layout) -> Self {
        Self {
            rows: 0,
            cols: 0,
            layout,
            data: Vec::new(),
        }
    }

    /// Fails with `DimensionMismatch` when `rows * cols` overflows
    pub fn filled(rows: usize, cols: usize, layout: Layout, value: T) -> Result<Self, Error> {
        let len = rows
            .checked_mul(cols)
            .ok_or_else(|| Error::DimensionMismatch {
                expected: vec![rows as u64, cols as u64],
                found: vec![],
            })?;
        Self::new(rows, cols, layout, vec![value; len])
    }

    /// Build a row-major matrix from equally sized rows
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, Error> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|row| row.len() != cols) {
            return Err(Error::DimensionMismatch {
                expected: vec![rows.len() as u64, cols as u64],
                found: vec![bad.len() as u64],
            });
        }
        let data = rows.iter().flatten().copied().collect();
        Self::new(rows.len(), cols, Layout::RowMajor, data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub(crate) fn is_unshaped(&self) -> bool {
        self.rows == 0 && self.cols == 0
    }

    /// Raw buffer in [`Matrix::layout`] order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        match self.layout {
            Layout::RowMajor => row * self.cols + col,
            Layout::ColumnMajor => col * self.rows + row,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(self.offset(row, col)).copied()
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        let offset = self.offset(row, col);
        self.data[offset] = value;
        true
    }

    pub fn row(&self, row: usize) -> Option<Vec<T>> {
        (row < self.rows).then(|| (0..self.cols).filter_map(|c| self.get(row, c)).collect())
    }

    /// Values in row-major order regardless of layout
    pub fn to_row_major(&self) -> Vec<T> {
        match self.layout {
            Layout::RowMajor => self.data.clone(),
            Layout::ColumnMajor => reorder(&self.data, &[self.rows, self.cols], true),
        }
    }

    pub(crate) fn replace(&mut self, rows: usize, cols: usize, data: Vec<T>) {
        self.rows = rows;
        self.cols = cols;
        self.data = data;
    }
}

/// Convert `values`, laid out for `shape` in one storage order, into the
/// other one. `from_fortran` names the order of the input.
pub(crate) fn reorder<T: Copy>(values: &[T], shape: &[usize], from_fortran: bool) -> Vec<T> {
    let ndim = shape.len();
    let mut strides = vec![0usize; ndim];
    let mut step = 1;
    if from_fortran {
        for axis in 0..ndim {
            strides[axis] = step;
            step *= shape[axis];
        }
    } else {
        for axis in (0..ndim).rev() {
            strides[axis] = step;
            step *= shape[axis];
        }
    }

    let mut out = Vec::with_capacity(values.len());
    let mut index = vec![0usize; ndim];
    for _ in 0..values.len() {
        let offset: usize = index.iter().zip(&strides).map(|(i, s)| i * s).sum();
        out.push(values[offset]);

        // output order: C when reading Fortran input, Fortran otherwise
        for n in 0..ndim {
            let axis = if from_fortran { ndim - 1 - n } else { n };
            index[axis] += 1;
            if index[axis] < shape[axis] {
                break;
            }
            index[axis] = 0;
        }
    }
    out
}
