use crate::grid::Grid;
use crate::types::RaycastError;

/// Dense row-major grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2d<T> {
    rows: u32,
    cols: u32,
    data: Vec<T>,
}

impl<T> Grid2d<T> {
    pub fn new(rows: u32, cols: u32, data: Vec<T>) -> Result<Self, RaycastError> {
        let expected_len = (rows as usize) * (cols as usize);
        if data.len() != expected_len {
            return Err(RaycastError::InvalidMetadata(format!(
                "data length {} does not match map size {}",
                data.len(),
                expected_len
            )));
        }

        Ok(Self { rows, cols, data })
    }

    pub fn new_with_value(rows: u32, cols: u32, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            rows,
            cols,
            data: vec![value; (rows as usize) * (cols as usize)],
        }
    }

    /// Build a grid from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, RaycastError> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(RaycastError::InvalidMetadata(format!(
                "row {} has {} cells, expected {}",
                idx,
                row.len(),
                cols
            )));
        }

        let row_count = rows.len() as u32;
        let data = rows.into_iter().flatten().collect();
        Self::new(row_count, cols as u32, data)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn get(&self, row: u32, col: u32) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let idx = self.index(row, col);
        Some(&self.data[idx])
    }

    pub fn set(&mut self, row: u32, col: u32, value: T) -> Result<(), RaycastError> {
        if row >= self.rows || col >= self.cols {
            return Err(RaycastError::OutOfBounds(format!(
                "cell ({}, {}) out of bounds for map {}x{}",
                row, col, self.rows, self.cols
            )));
        }
        let idx = self.index(row, col);
        self.data[idx] = value;
        Ok(())
    }

    fn index(&self, row: u32, col: u32) -> usize {
        (row as usize) * (self.cols as usize) + (col as usize)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }
}

impl<T> Grid for Grid2d<T> {
    type Cell = T;

    fn rows(&self) -> u32 {
        self.rows
    }

    fn cols(&self) -> u32 {
        self.cols
    }

    fn get(&self, row: u32, col: u32) -> Option<&Self::Cell> {
        Grid2d::get(self, row, col)
    }
}
