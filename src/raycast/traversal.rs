//! Grid-line traversals.
//!
//! Each traversal only visits crossings of one family of grid lines: horizontal lines
//! (constant y, one per row boundary) or vertical lines (constant x, one per column
//! boundary). Samples taken exactly on a line are nudged by a fraction of a cell against
//! the direction of travel when moving toward smaller coordinates, so the cell being
//! entered is tested rather than the one being left.

use glam::Vec2;
use tracing::trace;

use crate::grid::Grid;
use crate::raycast::utils::axis_direction;
use crate::raycast::{Ray, Raycaster};
use crate::types::EPSILON_RATIO;

impl<G, P> Raycaster<'_, G, P>
where
    G: Grid,
    P: Fn(&G::Cell) -> bool,
{
    /// First obstacle met on a horizontal grid line, if any.
    pub(crate) fn cast_against_horizontal(&self, ray: &Ray) -> Option<Vec2> {
        let dir = axis_direction(ray.angle);
        // A ray parallel to this family of lines never crosses one.
        if dir.y == 0.0 || dir.is_nan() {
            return None;
        }

        let cell_size = self.info().cell_size;
        let origin = ray.origin;
        let pointing_down = dir.y > 0.0;
        let x_per_y = dir.x / dir.y;

        let y_offset = if pointing_down { cell_size } else { 0.0 };
        let y = (origin.y / cell_size).floor() * cell_size + y_offset;
        let x = origin.x + (y - origin.y) * x_per_y;

        let y_step = if pointing_down { cell_size } else { -cell_size };
        let x_step = y_step * x_per_y;

        let epsilon_y = if pointing_down { 0.0 } else { -cell_size * EPSILON_RATIO };
        let epsilon = Vec2::new(0.0, epsilon_y);
        self.step_until_hit(ray, Vec2::new(x, y), Vec2::new(x_step, y_step), epsilon)
    }

    /// First obstacle met on a vertical grid line, if any.
    pub(crate) fn cast_against_vertical(&self, ray: &Ray) -> Option<Vec2> {
        let dir = axis_direction(ray.angle);
        if dir.x == 0.0 || dir.is_nan() {
            return None;
        }

        let cell_size = self.info().cell_size;
        let origin = ray.origin;
        let pointing_right = dir.x > 0.0;
        let y_per_x = dir.y / dir.x;

        let x_offset = if pointing_right { cell_size } else { 0.0 };
        let x = (origin.x / cell_size).floor() * cell_size + x_offset;
        let y = origin.y + (x - origin.x) * y_per_x;

        let x_step = if pointing_right { cell_size } else { -cell_size };
        let y_step = x_step * y_per_x;

        let epsilon_x = if pointing_right { 0.0 } else { -cell_size * EPSILON_RATIO };
        let epsilon = Vec2::new(epsilon_x, 0.0);
        self.step_until_hit(ray, Vec2::new(x, y), Vec2::new(x_step, y_step), epsilon)
    }

    /// Walk from `start` by `step` until an obstacle is found, the grid is left, or the
    /// ray's distance budget runs out.
    fn step_until_hit(&self, ray: &Ray, start: Vec2, step: Vec2, epsilon: Vec2) -> Option<Vec2> {
        // Overflowing slopes or origins.
        if !step.is_finite() || !start.is_finite() {
            return None;
        }

        let info = self.info();
        let bounds = info.bounds();
        let distance_per_step = step.length();
        let mut travelled = ray.origin.distance(start);
        let mut point = start;

        // Every step crosses one more line of the family, so this is never reached by a
        // well-formed walk.
        let max_steps = info.rows as usize + info.cols as usize + 2;

        for _ in 0..max_steps {
            if !bounds.contains(point) {
                trace!(?point, "traversal left the grid");
                return None;
            }

            let Some(cell) = self.cell_at(point + epsilon) else {
                trace!(?point, "sampled cell outside the grid");
                return None;
            };

            if self.is_obstacle(cell) {
                return Some(point);
            }

            point += step;
            travelled += distance_per_step;

            if ray.max_distance.is_some_and(|max| travelled > max) {
                trace!(travelled, "distance budget exhausted");
                return None;
            }
        }

        trace!(max_steps, "traversal hit the iteration cap");
        None
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::grid::Grid2d;
    use crate::types::{EMPTY, SOLID};

    fn striped_grid() -> Grid2d<u8> {
        // Solid bottom row and solid right column on a 4x4 map.
        let mut grid = Grid2d::new_with_value(4, 4, EMPTY);
        for i in 0..4 {
            grid.set(3, i, SOLID).expect("cell should be in bounds");
            grid.set(i, 3, SOLID).expect("cell should be in bounds");
        }
        grid
    }

    #[test]
    fn horizontal_ray_yields_no_horizontal_crossing() {
        let grid = striped_grid();
        let caster = Raycaster::new(&grid, 1.0).expect("caster should build");
        let ray = Ray::new(Vec2::new(0.5, 0.5), 0.0);

        assert!(caster.cast_against_horizontal(&ray).is_none());
        let hit = caster.cast_against_vertical(&ray).expect("hit expected");
        assert!((hit - Vec2::new(3.0, 0.5)).length() < 1e-5);
    }

    #[test]
    fn vertical_ray_is_found_by_horizontal_traversal() {
        let grid = striped_grid();
        let caster = Raycaster::new(&grid, 1.0).expect("caster should build");
        let ray = Ray::new(Vec2::new(0.5, 0.5), FRAC_PI_2);

        assert!(caster.cast_against_vertical(&ray).is_none());
        let hit = caster.cast_against_horizontal(&ray).expect("hit expected");
        assert!((hit - Vec2::new(0.5, 3.0)).length() < 1e-5);
    }

    #[test]
    fn upward_walk_samples_the_cell_above_each_line() {
        // Only (0, 0) is solid. Walking up from row 2 samples row 1 on the line y = 2 and
        // row 0 on the line y = 1, so the hit is the bottom face of row 0.
        let mut grid = Grid2d::new_with_value(3, 1, EMPTY);
        grid.set(0, 0, SOLID).expect("cell should be in bounds");
        let caster = Raycaster::new(&grid, 1.0).expect("caster should build");

        let ray = Ray::new(Vec2::new(0.5, 2.5), -FRAC_PI_2);
        let hit = caster.cast_against_horizontal(&ray).expect("hit expected");
        assert!((hit - Vec2::new(0.5, 1.0)).length() < 1e-5);
    }

    #[test]
    fn leftward_walk_exits_through_open_edge() {
        let grid = Grid2d::new_with_value(1, 3, EMPTY);
        let caster = Raycaster::new(&grid, 1.0).expect("caster should build");
        let ray = Ray::new(Vec2::new(2.5, 0.5), PI);
        assert!(caster.cast_against_vertical(&ray).is_none());
    }

    #[test]
    fn budget_stops_walk_before_far_obstacle() {
        let grid = striped_grid();
        let caster = Raycaster::new(&grid, 1.0).expect("caster should build");

        let short = Ray::new(Vec2::new(0.5, 0.5), 0.0).with_max_distance(1.5);
        assert!(caster.cast_against_vertical(&short).is_none());

        let exact = Ray::new(Vec2::new(0.5, 0.5), 0.0).with_max_distance(2.5);
        assert!(caster.cast_against_vertical(&exact).is_some());
    }

    #[test]
    fn cardinal_ray_on_parallel_line_ignores_the_neighbouring_wall() {
        // Column 0 is solid. Rays run along x = 1, the face of that column, so the vertical
        // traversal has nothing to cross and the horizontal one samples column 1.
        let mut grid = Grid2d::new_with_value(4, 3, EMPTY);
        for row in 0..4 {
            grid.set(row, 0, SOLID).expect("cell should be in bounds");
        }
        grid.set(3, 1, SOLID).expect("cell should be in bounds");
        let caster = Raycaster::new(&grid, 1.0).expect("caster should build");

        let down = Ray::new(Vec2::new(1.0, 0.5), FRAC_PI_2);
        assert!(caster.cast_against_vertical(&down).is_none());
        let hit = caster.cast_against_horizontal(&down).expect("hit expected");
        assert_eq!(hit, Vec2::new(1.0, 3.0));

        let up = Ray::new(Vec2::new(1.0, 2.5), -FRAC_PI_2);
        assert!(caster.cast_against_vertical(&up).is_none());
        assert!(caster.cast_against_horizontal(&up).is_none());
        assert!(caster.cast_ray(&up).is_none());
    }

    #[test]
    fn leftward_ray_on_parallel_line_ignores_the_row_above() {
        // Row 0 is solid and the ray runs left along its bottom face, y = 1.
        let mut grid = Grid2d::new_with_value(2, 4, EMPTY);
        for col in 0..4 {
            grid.set(0, col, SOLID).expect("cell should be in bounds");
        }
        grid.set(1, 0, SOLID).expect("cell should be in bounds");
        let caster = Raycaster::new(&grid, 1.0).expect("caster should build");

        let ray = Ray::new(Vec2::new(3.5, 1.0), PI);
        assert!(caster.cast_against_horizontal(&ray).is_none());
        let hit = caster.cast_ray(&ray).expect("hit expected");
        assert_eq!(hit.impact, Vec2::new(1.0, 1.0));
        assert!((hit.distance - 2.5).abs() < 1e-5);
    }

    #[test]
    fn non_finite_angle_yields_nothing() {
        let grid = striped_grid();
        let caster = Raycaster::new(&grid, 1.0).expect("caster should build");
        let ray = Ray::new(Vec2::new(0.5, 0.5), f32::NAN);

        assert!(caster.cast_against_horizontal(&ray).is_none());
        assert!(caster.cast_against_vertical(&ray).is_none());
        assert!(caster.cast_ray(&ray).is_none());
    }
}
