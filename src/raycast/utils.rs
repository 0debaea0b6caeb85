use std::f32::consts::TAU;

use glam::{UVec2, Vec2};

use crate::types::{DIRECTION_EPSILON, MapInfo};

/// Cell containing `point` as `(col, row)`, or `None` outside the map.
#[inline]
pub fn cell_index(point: Vec2, info: &MapInfo) -> Option<UVec2> {
    let cell = (point / info.cell_size).floor();
    if !cell.is_finite()
        || cell.x < 0.0
        || cell.y < 0.0
        || cell.x >= info.cols as f32
        || cell.y >= info.rows as f32
    {
        return None;
    }
    Some(cell.as_uvec2())
}

/// Unit direction of `angle` with near-zero components snapped to zero.
///
/// `f32` trig leaves residue such as `FRAC_PI_2.cos() == -4.4e-8`, which would otherwise
/// give a cardinal ray a sign and a finite slope on the axis it runs parallel to.
#[inline]
pub fn axis_direction(angle: f32) -> Vec2 {
    let snap = |v: f32| if v.abs() <= DIRECTION_EPSILON { 0.0 } else { v };
    let dir = Vec2::from_angle(angle);
    Vec2::new(snap(dir.x), snap(dir.y))
}

/// Unsigned difference between two angles, wrapped into [0, PI].
#[inline]
pub fn angle_difference(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(TAU);
    diff.min(TAU - diff)
}
