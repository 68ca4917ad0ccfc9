//! Circle collision and angle helpers shared by movement, AI and combat.

use std::f32::consts::{PI, TAU};

pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = ax - bx;
    let dy = ay - by;
    (dx * dx + dy * dy).sqrt()
}

/// Two circles overlap when their centres are closer than the sum of radii.
pub fn circles_overlap(ax: f32, ay: f32, a_radius: f32, bx: f32, by: f32, b_radius: f32) -> bool {
    distance(ax, ay, bx, by) < a_radius + b_radius
}

/// Signed shortest rotation from `from` to `to`, in `[-PI, PI)`.
pub fn angle_difference(from: f32, to: f32) -> f32 {
    (to - from + PI).rem_euclid(TAU) - PI
}

/// Heading from `(x, y)` to `(tx, ty)`.
pub fn angle_to(x: f32, y: f32, tx: f32, ty: f32) -> f32 {
    (ty - y).atan2(tx - x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_strict() {
        assert!(circles_overlap(0.0, 0.0, 5.0, 9.0, 0.0, 5.0));
        assert!(!circles_overlap(0.0, 0.0, 5.0, 10.0, 0.0, 5.0));
    }

    #[test]
    fn angle_difference_wraps() {
        let d = angle_difference(3.0, -3.0);
        assert!(d > 0.0 && d < 0.3);
        let d = angle_difference(0.0, PI / 2.0);
        assert!((d - PI / 2.0).abs() < 1e-6);
        let d = angle_difference(0.5, 0.5);
        assert!(d.abs() < 1e-6);
    }

    #[test]
    fn angle_to_points_east() {
        assert!(angle_to(0.0, 0.0, 10.0, 0.0).abs() < 1e-6);
    }
}
