use std::f32::consts::TAU;

use glam::Vec2;

use crate::grid::Grid;
use crate::raycast::{CastResult, Ray, Raycaster};

impl<G, P> Raycaster<'_, G, P>
where
    G: Grid,
    P: Fn(&G::Cell) -> bool,
{
    /// Cast `count` rays from `origin`, evenly spread over `sweep` radians starting at
    /// `start_angle`.
    ///
    /// A sweep of a full turn or more spaces the rays by `sweep / count`, so the last ray does
    /// not repeat the first; narrower sweeps include both ends.
    pub fn cast_fan(
        &self,
        origin: Vec2,
        start_angle: f32,
        sweep: f32,
        count: usize,
        max_distance: Option<f32>,
    ) -> Vec<Option<CastResult>> {
        let step = match count {
            0 | 1 => 0.0,
            _ if sweep.abs() >= TAU => sweep / count as f32,
            _ => sweep / (count - 1) as f32,
        };

        (0..count)
            .map(|idx| {
                let ray = Ray {
                    origin,
                    angle: start_angle + step * idx as f32,
                    max_distance,
                };
                self.cast_ray(&ray)
            })
            .collect()
    }

    /// Whether nothing blocks the straight segment from `from` to `to`.
    ///
    /// An obstacle face lying exactly at `to` does not block it. A point embedded in an
    /// obstacle sees nothing.
    pub fn has_line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        let ray = Ray::towards(from, to);
        match self.cast_ray(&ray) {
            None => true,
            Some(hit) => hit.distance > 0.0 && hit.distance >= from.distance(to),
        }
    }
}
