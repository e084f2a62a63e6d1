use super::params::ScaleParams;
use super::report::{
    CharacteristicScales, ScaleReport, SearchOutcome, TimingBreakdown, WindowIteration,
};
use crate::angle::perpendicular;
use crate::cumulant::{compute_cumulant, CumulantField};
use crate::error::CumulantError;
use crate::field::{GridField, Mask};
use crate::principal::find_principal_axis;
use crate::width::{estimate_width, WidthOptions};
use log::{debug, warn};
use std::time::Instant;

/// Principal-axis orientation and widths of the cumulant of `field1` and
/// `field2` (autocorrelation when `None`).
pub fn characteristic_scales(
    field1: &GridField,
    field2: Option<&GridField>,
    mask: Option<&Mask>,
    params: &ScaleParams,
) -> Result<CharacteristicScales, CumulantError> {
    characteristic_scales_with_diagnostics(field1, field2, mask, params).map(|r| r.scales)
}

/// Like [`characteristic_scales`] but also returns the window-growth trace
/// and stage timings.
pub fn characteristic_scales_with_diagnostics(
    field1: &GridField,
    field2: Option<&GridField>,
    mask: Option<&Mask>,
    params: &ScaleParams,
) -> Result<ScaleReport, CumulantError> {
    let t0 = Instant::now();
    let cumulant = compute_cumulant(field1, field2, mask, params.backend)?;
    let cumulant_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let mut report = scales_from_cumulant(&cumulant, params)?;
    let mut timing = TimingBreakdown::default();
    timing.push("cumulant", cumulant_ms);
    timing.stages.append(&mut report.timing.stages);
    timing.total_ms = t0.elapsed().as_secs_f64() * 1000.0;
    report.timing = timing;
    debug!(
        "characteristic_scales: {} outcome={:?} iterations={} total={:.2}ms",
        report.scales.cumulant,
        report.outcome,
        report.iterations.len(),
        report.timing.total_ms
    );
    Ok(report)
}

/// Run the principal-axis search and width estimation on a precomputed
/// cumulant. The window is sized with the lag-x spacing.
pub fn scales_from_cumulant(
    cumulant: &CumulantField,
    params: &ScaleParams,
) -> Result<ScaleReport, CumulantError> {
    let t0 = Instant::now();
    let options = params.width_options();
    let mut iterations = Vec::new();

    let (theta, width_principal, width_perpendicular, outcome) = match params.sample_angle_deg {
        Some(angle_deg) => {
            let theta = angle_deg.to_radians();
            let (par, perp) = widths_along(cumulant, theta, params, &options);
            (theta, par, perp, SearchOutcome::FixedAngle)
        }
        None => grow_window(cumulant, params, &options, &mut iterations)?,
    };

    let mut timing = TimingBreakdown::default();
    let search_ms = t0.elapsed().as_secs_f64() * 1000.0;
    timing.push(
        if outcome == SearchOutcome::FixedAngle {
            "widths"
        } else {
            "axis_search"
        },
        search_ms,
    );
    timing.total_ms = search_ms;

    Ok(ScaleReport {
        scales: CharacteristicScales {
            cumulant: cumulant.name.clone(),
            z: cumulant.z,
            method: params.method,
            principal_axis_deg: theta.to_degrees(),
            width_principal,
            width_perpendicular,
            is_covariant: cumulant.center_value() > 0.0,
        },
        outcome,
        iterations,
        timing,
    })
}

fn widths_along(
    cumulant: &CumulantField,
    theta: f64,
    params: &ScaleParams,
    options: &WidthOptions,
) -> (f64, f64) {
    let par = estimate_width(cumulant, theta, params.method, options);
    let perp = estimate_width(cumulant, perpendicular(theta), params.method, options);
    (par.value, perp.value)
}

/// Grow the principal-axis window until the widths along and across the
/// axis are consistent.
fn grow_window(
    cumulant: &CumulantField,
    params: &ScaleParams,
    options: &WidthOptions,
    iterations: &mut Vec<WindowIteration>,
) -> Result<(f64, f64, f64, SearchOutcome), CumulantError> {
    let dx = lag_spacing(cumulant.lag_x());
    let mut window_m = params.window_seed_m;

    for _ in 0..params.max_iterations {
        let window_cells = window_cells(window_m, dx);
        let axis = find_principal_axis(cumulant, window_cells)?;
        let theta = axis.theta_rad;
        let (par, perp) = widths_along(cumulant, theta, params, options);
        iterations.push(WindowIteration {
            window_m,
            window_cells,
            theta_deg: theta.to_degrees(),
            width_principal: par,
            width_perpendicular: perp,
        });
        debug!(
            "grow_window: {} window={window_m:.0}m ({window_cells} cells) theta={:.2}deg widths=({par:.1}, {perp:.1})",
            cumulant.name,
            theta.to_degrees()
        );

        if par.is_nan() || perp.is_nan() {
            return Ok((theta, par, perp, SearchOutcome::NanWidth));
        }
        // NaN once a width is infinite; accepted like a match
        let ratio = (perp - par).abs() / (0.5 * (perp + par));
        if ratio > params.convergence_threshold && perp > par {
            window_m *= params.growth_factor;
            continue;
        }
        return Ok((theta, par, perp, SearchOutcome::Converged));
    }

    warn!(
        "couldn't find principal axis of {} within {} iterations",
        cumulant.name, params.max_iterations
    );
    Ok((f64::NAN, f64::NAN, f64::NAN, SearchOutcome::IterationCap))
}

/// `floor(window_m / dx)·2`, zero for a degenerate spacing.
fn window_cells(window_m: f64, dx: f64) -> usize {
    let cells = (window_m / dx).floor();
    if cells.is_finite() && cells > 0.0 {
        (cells as usize).saturating_mul(2)
    } else {
        0
    }
}

fn lag_spacing(lags: &[f64]) -> f64 {
    lags.windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold(0.0, f64::max)
}
