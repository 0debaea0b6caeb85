use glam::Vec2;
use tracing::debug;

use crate::grid::{Grid, Occupancy};
use crate::raycast::utils::cell_index;
use crate::raycast::{CastResult, Ray};
use crate::types::{Bounds, MapInfo, RaycastError};

/// Finds the first obstacle a ray meets on a uniform grid.
///
/// The grid is borrowed for the lifetime of the caster and never mutated, so a caster can be
/// shared between threads whenever the grid and predicate are `Sync`. Casting walks horizontal
/// and vertical grid-line crossings separately and keeps the closer hit.
pub struct Raycaster<'a, G: Grid, P = fn(&<G as Grid>::Cell) -> bool> {
    grid: &'a G,
    info: MapInfo,
    is_obstacle: P,
}

impl<'a, G> Raycaster<'a, G>
where
    G: Grid,
    G::Cell: Occupancy,
{
    /// Caster that treats every "truthy" cell as an obstacle.
    pub fn new(grid: &'a G, cell_size: f32) -> Result<Self, RaycastError> {
        Self::with_predicate(grid, cell_size, <G::Cell as Occupancy>::is_obstacle)
    }
}

impl<'a, G, P> Raycaster<'a, G, P>
where
    G: Grid,
    P: Fn(&G::Cell) -> bool,
{
    pub fn with_predicate(
        grid: &'a G,
        cell_size: f32,
        is_obstacle: P,
    ) -> Result<Self, RaycastError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(RaycastError::InvalidCellSize(cell_size));
        }

        Ok(Self {
            grid,
            info: MapInfo::new(grid.rows(), grid.cols(), cell_size),
            is_obstacle,
        })
    }

    pub fn grid(&self) -> &'a G {
        self.grid
    }

    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    /// World rectangle covered by the grid.
    pub fn bounds(&self) -> Bounds {
        self.info.bounds()
    }

    /// Cast `ray` and return the nearest impact, or `None` on a miss.
    pub fn cast_ray(&self, ray: &Ray) -> Option<CastResult> {
        let mut out = CastResult::default();
        self.cast_ray_into(ray, &mut out).then_some(out)
    }

    /// Cast `ray` into a caller-owned buffer.
    ///
    /// Returns `true` on a hit. On a miss `out` is left untouched.
    pub fn cast_ray_into(&self, ray: &Ray, out: &mut CastResult) -> bool {
        if ray.max_distance.is_some_and(|max| max < 0.0) {
            debug!(?ray, "negative distance budget, skipping cast");
            return false;
        }

        // Already embedded in an obstacle.
        if self.is_obstacle_at(ray.origin) {
            out.impact = ray.origin;
            out.distance = 0.0;
            return true;
        }

        let horizontal = self.cast_against_horizontal(ray);
        let vertical = self.cast_against_vertical(ray);

        let impact = match (horizontal, vertical) {
            (Some(h), Some(v)) => {
                if ray.origin.distance(h) < ray.origin.distance(v) {
                    h
                } else {
                    v
                }
            }
            (Some(h), None) => h,
            (None, Some(v)) => v,
            (None, None) => {
                debug!(?ray, "ray left the grid without a hit");
                return false;
            }
        };

        let distance = ray.origin.distance(impact);
        if ray.max_distance.is_some_and(|max| distance > max) {
            debug!(?ray, distance, "impact beyond distance budget");
            return false;
        }

        out.impact = impact;
        out.distance = distance;
        true
    }

    /// Cell under `point`, if it lies on the grid.
    pub(crate) fn cell_at(&self, point: Vec2) -> Option<&'a G::Cell> {
        let cell = cell_index(point, &self.info)?;
        self.grid.get(cell.y, cell.x)
    }

    pub(crate) fn is_obstacle_at(&self, point: Vec2) -> bool {
        self.cell_at(point).is_some_and(|cell| (self.is_obstacle)(cell))
    }

    pub(crate) fn is_obstacle(&self, cell: &G::Cell) -> bool {
        (self.is_obstacle)(cell)
    }
}
