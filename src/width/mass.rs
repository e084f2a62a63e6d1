use super::region::extract_sign_coherent_center;
use super::{WidthEstimate, WidthMethod, COARSE_SAMPLES};
use crate::cumulant::CumulantField;
use crate::numeric::{adaptive_simpson, linspace, sign};
use crate::sampling::{make_sampler, LineSampler};
use log::debug;

/// Relative tolerance of the mass and inertia integrals.
const QUAD_RTOL: f64 = 1e-9;

/// Width from the centroid distance of the profile on either side of the
/// zero lag.
///
/// On each half-line the weight is `max(0, s·C(mu))` with `s` the sign at the
/// origin, integrated out to `max_width/2` or the first sign change found by
/// a coarse scan, whichever comes first. Returns NaN when either side carries
/// no mass or every scanned sample is NaN.
pub fn mass_weighted_width(
    field: &CumulantField,
    theta: f64,
    max_width: f64,
    center_only: bool,
) -> WidthEstimate {
    let sampler = if center_only {
        make_sampler(&extract_sign_coherent_center(field), theta)
    } else {
        make_sampler(field, theta)
    };
    let origin = sampler.value(0.0);
    let s = sign(origin);
    let upper = mass_weighted_edge(&sampler, s, origin.abs(), 1.0, max_width);
    let lower = mass_weighted_edge(&sampler, s, origin.abs(), -1.0, max_width);
    let value = upper - lower;
    debug!(
        "mass_weighted_width: theta={:.2}deg edges=({upper:.1}, {lower:.1}) width={value:.1}",
        theta.to_degrees()
    );
    WidthEstimate {
        value,
        method: WidthMethod::MassWeighted,
    }
}

/// Signed centroid distance along `dir`, or NaN.
fn mass_weighted_edge(sampler: &LineSampler, s: f64, scale: f64, dir: f64, max_width: f64) -> f64 {
    let scan = linspace(0.0, dir * max_width / 2.0, COARSE_SAMPLES);
    let flipped: Vec<f64> = scan.iter().map(|&mu| s * sampler.value(mu)).collect();
    if flipped.iter().all(|v| v.is_nan()) {
        return f64::NAN;
    }
    // stop at the first sign change so a lobe further out cannot contribute
    let end = flipped
        .iter()
        .position(|&v| v < 0.0)
        .unwrap_or(scan.len() - 1);

    let weight = |mu: f64| (s * sampler.value(mu)).max(0.0);
    let mut mass = 0.0;
    let mut inertia = 0.0;
    for panel in scan[..=end].windows(2) {
        let (a, b) = (panel[0], panel[1]);
        let tol = QUAD_RTOL * scale * (b - a).abs();
        mass += adaptive_simpson(weight, a, b, tol);
        inertia += adaptive_simpson(|mu| weight(mu) * mu.abs(), a, b, tol * max_width);
    }
    if mass == 0.0 || !mass.is_finite() || !inertia.is_finite() {
        return f64::NAN;
    }
    dir * inertia / mass
}
