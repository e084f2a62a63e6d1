use super::{WidthEstimate, WidthMethod, COARSE_SAMPLES};
use crate::cumulant::CumulantField;
use crate::numeric::{bisect, linspace};
use crate::sampling::{make_sampler, LineSampler};
use log::{debug, warn};

/// Far-field baseline the profile is normalized against.
const REFERENCE: f64 = 0.0;
/// Bisection tolerance relative to the search distance.
const ROOT_XTOL: f64 = 1e-9;

/// Width between the two points where the normalized profile
/// `(C − reference) / (peak − reference)` falls to `fraction`.
///
/// `peak` is the largest sampled value over `[−max_width, max_width]`. A
/// non-positive peak yields NaN. A side with no crossing before the profile
/// turns negative or before `max_width` is reported as infinitely far, so the
/// width becomes `+∞`.
pub fn cutoff_width(
    field: &CumulantField,
    theta: f64,
    fraction: f64,
    max_width: f64,
) -> WidthEstimate {
    let sampler = make_sampler(field, theta);
    let peak = linspace(-max_width, max_width, 2 * COARSE_SAMPLES - 1)
        .into_iter()
        .map(|mu| sampler.value(mu))
        .fold(f64::NEG_INFINITY, f64::max);

    let value = if peak.is_finite() && peak > REFERENCE {
        let upper = cutoff_edge(&sampler, peak, fraction, 1.0, max_width);
        let lower = cutoff_edge(&sampler, peak, fraction, -1.0, max_width);
        upper - lower
    } else {
        f64::NAN
    };
    debug!(
        "cutoff_width: theta={:.2}deg peak={peak:.3e} width={value:.1}",
        theta.to_degrees()
    );
    WidthEstimate {
        value,
        method: WidthMethod::Cutoff,
    }
}

fn cutoff_edge(sampler: &LineSampler, peak: f64, fraction: f64, dir: f64, max_width: f64) -> f64 {
    let normalized = |mu: f64| (sampler.value(mu) - REFERENCE) / (peak - REFERENCE);
    let limit = linspace(0.0, dir * max_width, COARSE_SAMPLES)
        .into_iter()
        .find(|&mu| normalized(mu) < 0.0)
        .unwrap_or(dir * max_width);

    match bisect(|mu| normalized(mu) - fraction, 0.0, limit, ROOT_XTOL * max_width) {
        Some(edge) => edge,
        None => {
            warn!(
                "cutoff_width: no crossing of {fraction} within {max_width} m (theta={:.1}deg, dir={dir:+}), assuming the cumulant spreads to infinity",
                sampler.theta().to_degrees()
            );
            dir * f64::INFINITY
        }
    }
}
