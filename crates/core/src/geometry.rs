//! 2D vector helpers and axis-aligned bounds.
//!
//! [`Vector2`] is `glam::DVec2`; the free functions here add the few
//! operations the shape synthesizers need on top of glam, with total
//! behaviour for degenerate input (normalizing a zero vector yields zero,
//! never NaN).

use glam::DVec2;

/// Two-dimensional f64 vector (value type).
pub type Vector2 = DVec2;

/// Unit vector pointing along `angle` radians.
pub fn from_angle(angle: f64) -> Vector2 {
    DVec2::new(angle.cos(), angle.sin())
}

/// Perpendicular rotated 90° counter-clockwise in screen space: `(-y, x)`.
pub fn perp_left(v: Vector2) -> Vector2 {
    DVec2::new(-v.y, v.x)
}

/// Normalizes `v`, returning zero for a zero-length vector.
pub fn normalize(v: Vector2) -> Vector2 {
    v.normalize_or_zero()
}

/// Linear interpolation `a + (b - a) * t` without clamping.
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    (b - a) * t + a
}

/// Axis-aligned rectangle used for containment tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Bounds {
    /// Creates bounds from origin and size.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Bounds covering a whole `dimension × dimension` tile.
    pub fn tile(dimension: usize) -> Self {
        let d = dimension as f64;
        Self::new(0.0, 0.0, d, d)
    }

    /// Shrinks the bounds by `margin` on every side.
    pub fn inset(self, margin: f64) -> Self {
        Self::new(
            self.x + margin,
            self.y + margin,
            self.w - 2.0 * margin,
            self.h - 2.0 * margin,
        )
    }

    /// Half-open containment: `x <= v.x < x + w` and `y <= v.y < y + h`.
    pub fn contains(&self, v: Vector2) -> bool {
        v.x >= self.x && v.y >= self.y && v.x < self.x + self.w && v.y < self.y + self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn from_angle_is_unit_length() {
        for i in 0..16 {
            let v = from_angle(i as f64 * 0.4);
            assert!((v.length() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn perp_left_is_orthogonal() {
        let v = DVec2::new(3.0, -2.0);
        assert!(perp_left(v).dot(v).abs() < EPSILON);
        assert_eq!(perp_left(DVec2::X), DVec2::Y);
    }

    #[test]
    fn normalize_zero_vector_is_zero_not_nan() {
        let n = normalize(DVec2::ZERO);
        assert_eq!(n, DVec2::ZERO);
    }

    #[test]
    fn lerp_f64_hits_endpoints_and_midpoint() {
        assert_eq!(lerp_f64(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp_f64(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp_f64(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn contains_is_half_open() {
        let b = Bounds::tile(32);
        assert!(b.contains(DVec2::new(0.0, 0.0)));
        assert!(b.contains(DVec2::new(31.9, 31.9)));
        assert!(!b.contains(DVec2::new(32.0, 5.0)));
        assert!(!b.contains(DVec2::new(5.0, -0.1)));
    }

    #[test]
    fn inset_shrinks_every_side() {
        let b = Bounds::tile(32).inset(1.0);
        assert_eq!(b, Bounds::new(1.0, 1.0, 30.0, 30.0));
        assert!(!b.contains(DVec2::new(0.5, 10.0)));
        assert!(!b.contains(DVec2::new(31.0, 10.0)));
        assert!(b.contains(DVec2::new(30.9, 10.0)));
    }
}
