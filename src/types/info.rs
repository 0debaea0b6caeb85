//! Map metadata.

use crate::types::Bounds;

/// World geometry of a grid: its dimensions in cells and the edge length of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapInfo {
    pub rows: u32,
    pub cols: u32,
    /// Edge length of a cell in world units.
    pub cell_size: f32,
}

impl Default for MapInfo {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            cell_size: 1.0,
        }
    }
}

impl MapInfo {
    pub fn new(rows: u32, cols: u32, cell_size: f32) -> Self {
        Self {
            rows,
            cols,
            cell_size,
        }
    }

    pub fn square(size: u32, cell_size: f32) -> Self {
        Self::new(size, size, cell_size)
    }

    /// Width of the map in world units.
    #[inline]
    pub fn world_width(&self) -> f32 {
        self.cols as f32 * self.cell_size
    }

    /// Height of the map in world units.
    #[inline]
    pub fn world_height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// World rectangle covered by the map, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_size(self.world_width(), self.world_height())
    }
}
