use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use tracing::debug;

use crate::grid::Grid;
use crate::raycast::utils::{angle_difference, axis_direction};
use crate::raycast::{CastResult, Ray, Raycaster};

impl<G, P> Raycaster<'_, G, P>
where
    G: Grid,
    P: Fn(&G::Cell) -> bool,
{
    /// Move the origin of a ray that starts outside the grid onto the point where it enters
    /// the grid, shortening any distance budget by the distance skipped.
    ///
    /// Rays that start on the grid, never cross it, or point away from it are returned
    /// unchanged; casting those behaves as it would have without adaptation.
    ///
    /// "Pointing away" is detected by comparing the ray's angle with the angle toward the
    /// candidate entry point. The candidate always lies on the ray's supporting line, so the
    /// two either agree or differ by half a turn; anything beyond a quarter turn is rejected.
    pub fn adapt_ray(&self, ray: &Ray) -> Ray {
        let bounds = self.bounds();
        let origin = ray.origin;

        if bounds.contains(origin) {
            return *ray;
        }

        let dir = axis_direction(ray.angle);
        let closest = bounds.clamp(origin);

        // Crossing of the nearest vertical edge, then of the nearest horizontal edge. A zero
        // component makes the matching candidate non-finite, which `contains` rejects.
        let on_vertical_edge =
            Vec2::new(closest.x, origin.y + (closest.x - origin.x) * dir.y / dir.x);
        let on_horizontal_edge =
            Vec2::new(origin.x + (closest.y - origin.y) * dir.x / dir.y, closest.y);

        let entry = if bounds.contains(on_vertical_edge) {
            on_vertical_edge
        } else if bounds.contains(on_horizontal_edge) {
            on_horizontal_edge
        } else {
            debug!(?ray, "ray line never enters the grid");
            return *ray;
        };

        let to_entry = entry - origin;
        if angle_difference(to_entry.y.atan2(to_entry.x), ray.angle) > FRAC_PI_2 {
            debug!(?ray, ?entry, "ray points away from the grid");
            return *ray;
        }

        let consumed = origin.distance(entry);
        debug!(?ray, ?entry, consumed, "moved ray origin onto the grid");

        Ray {
            origin: entry,
            angle: ray.angle,
            max_distance: ray.max_distance.map(|max| max - consumed),
        }
    }

    /// [`adapt_ray`](Self::adapt_ray) followed by [`cast_ray`](Self::cast_ray).
    ///
    /// The reported distance is measured from the adapted origin.
    pub fn cast_adapted(&self, ray: &Ray) -> Option<CastResult> {
        self.cast_ray(&self.adapt_ray(ray))
    }
}
