use glam::Vec2;

mod adapt;
pub mod caster;
mod sweep;
mod traversal;
mod utils;

pub use caster::Raycaster;

/// A ray in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    /// Heading in radians. 0 points along +x and increasing angles turn toward +y.
    pub angle: f32,
    /// Travel budget in world units; `None` is unbounded.
    pub max_distance: Option<f32>,
}

impl Ray {
    pub fn new(origin: Vec2, angle: f32) -> Self {
        Self {
            origin,
            angle,
            max_distance: None,
        }
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    /// Ray from `from` aimed at `to`, with a budget of exactly the distance between them.
    pub fn towards(from: Vec2, to: Vec2) -> Self {
        let delta = to - from;
        Self::new(from, delta.y.atan2(delta.x)).with_max_distance(delta.length())
    }

    /// Unit direction vector.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct CastResult {
    /// First point where the ray touches an obstacle (world units).
    pub impact: Vec2,
    /// Distance from the ray origin to `impact` (world units).
    pub distance: f32,
}

impl CastResult {
    /// Extract hit distance, or return `default` if miss.
    pub fn distance_or(hit: Option<Self>, default: f32) -> f32 {
        hit.map(|h| h.distance).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn towards_sets_angle_and_budget() {
        let ray = Ray::towards(Vec2::new(15.0, 15.0), Vec2::new(15.0, 35.0));
        assert!((ray.angle - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(ray.max_distance, Some(20.0));
        assert!((ray.direction() - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn distance_or_falls_back_on_miss() {
        let hit = CastResult {
            impact: Vec2::ZERO,
            distance: 3.0,
        };
        assert_eq!(CastResult::distance_or(Some(hit), 10.0), 3.0);
        assert_eq!(CastResult::distance_or(None, 10.0), 10.0);
    }
}
