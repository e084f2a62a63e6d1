//! Angle utilities for line-symmetric orientations.

use std::f64::consts::{FRAC_PI_2, PI};

/// Normalizes an angle into the range [0, π).
#[inline]
pub fn normalize_half_pi(angle: f64) -> f64 {
    let norm = angle.rem_euclid(PI);
    if norm >= PI - 1e-12 || norm <= 0.0 {
        0.0
    } else {
        norm
    }
}

/// Smallest unsigned difference between two orientations, treating
/// antipodal directions as equivalent (π apart → 0). Returns [0, π/2].
#[inline]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs().rem_euclid(PI);
    if diff > FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}

/// Direction perpendicular to `theta`, folded back into [0, π).
#[inline]
pub fn perpendicular(theta: f64) -> f64 {
    normalize_half_pi(theta + FRAC_PI_2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn normalize_half_pi_basic() {
        assert!(approx_eq(normalize_half_pi(0.5), 0.5));
        assert!(approx_eq(normalize_half_pi(-FRAC_PI_4), 3.0 * FRAC_PI_4));
        assert!(approx_eq(normalize_half_pi(PI), 0.0));
        assert!(approx_eq(normalize_half_pi(3.0 * PI), 0.0));
        assert_eq!(normalize_half_pi(-0.0).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn angular_difference_handles_wrap() {
        assert!(approx_eq(angular_difference(0.0, PI), 0.0));
        assert!(approx_eq(angular_difference(0.0, FRAC_PI_2), FRAC_PI_2));
        assert!(approx_eq(
            angular_difference(FRAC_PI_4, -FRAC_PI_4),
            FRAC_PI_2
        ));
        assert!(approx_eq(angular_difference(0.1, PI - 0.1), 0.2));
        assert!(approx_eq(angular_difference(0.25, 1.7), angular_difference(1.7, 0.25)));
    }

    #[test]
    fn perpendicular_stays_in_half_circle() {
        assert!(approx_eq(perpendicular(0.0), FRAC_PI_2));
        assert!(approx_eq(perpendicular(3.0 * FRAC_PI_4), FRAC_PI_4));
    }
}
