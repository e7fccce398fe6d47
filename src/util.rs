//! Shared utility functions

/// Normalize a yaw angle or yaw difference into (-180, 180] degrees.
#[inline]
pub fn normalize_yaw(angle: f32) -> f32 {
    let mut a = angle;
    while a > 180.0 {
        a -= 360.0;
    }
    while a <= -180.0 {
        a += 360.0;
    }
    a
}

/// Horizontal bearing toward an offset, in degrees.
///
/// Yaw convention matches the host: 0 faces +Z and angles grow clockwise,
/// so the bearing is `atan2(-dx, dz)`.
#[inline]
pub fn bearing(dx: f64, dz: f64) -> f32 {
    (-dx).atan2(dz).to_degrees() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_yaw_wraps() {
        assert_relative_eq!(normalize_yaw(190.0), -170.0);
        assert_relative_eq!(normalize_yaw(-190.0), 170.0);
        assert_relative_eq!(normalize_yaw(540.0), 180.0);
        assert_relative_eq!(normalize_yaw(45.0), 45.0);
    }

    #[test]
    fn test_bearing_cardinals() {
        // +Z is yaw 0, +X is yaw -90, -X is yaw 90.
        assert_relative_eq!(bearing(0.0, 1.0), 0.0);
        assert_relative_eq!(bearing(1.0, 0.0), -90.0);
        assert_relative_eq!(bearing(-1.0, 0.0), 90.0);
        assert_relative_eq!(bearing(0.0, -1.0).abs(), 180.0);
    }
}
