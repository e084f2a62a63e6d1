use super::params::ScaleParams;
use crate::angle::perpendicular;
use crate::cumulant::compute_cumulant;
use crate::error::CumulantError;
use crate::field::{GridField, Mask};
use crate::principal::find_principal_axis;
use crate::sampling::{line_sample, LineProfile};
use crate::width::{estimate_width, WidthEstimate};
use serde::Serialize;

/// Line profiles of a cumulant along its principal axis and across it, with
/// the width found along each.
#[derive(Clone, Debug, Serialize)]
pub struct DirectionalProfiles {
    pub cumulant: String,
    pub long_name: String,
    pub units: String,
    pub z: Option<f64>,
    pub theta_deg: f64,
    pub principal: LineProfile,
    pub perpendicular: LineProfile,
    pub width_principal: WidthEstimate,
    pub width_perpendicular: WidthEstimate,
}

/// Profiles through the zero lag along `sample_angle_deg`, or along the
/// principal axis found with `axis_window_cells`, out to
/// `profile_max_dist_m`.
pub fn directional_profiles(
    field1: &GridField,
    field2: Option<&GridField>,
    mask: Option<&Mask>,
    params: &ScaleParams,
) -> Result<DirectionalProfiles, CumulantError> {
    let cumulant = compute_cumulant(field1, field2, mask, params.backend)?;
    let theta = match params.sample_angle_deg {
        Some(angle_deg) => angle_deg.to_radians(),
        None => find_principal_axis(&cumulant, params.axis_window_cells)?.theta_rad,
    };
    let across = perpendicular(theta);
    let options = params.width_options();
    Ok(DirectionalProfiles {
        theta_deg: theta.to_degrees(),
        principal: line_sample(&cumulant, theta, params.profile_max_dist_m),
        perpendicular: line_sample(&cumulant, across, params.profile_max_dist_m),
        width_principal: estimate_width(&cumulant, theta, params.method, &options),
        width_perpendicular: estimate_width(&cumulant, across, params.method, &options),
        cumulant: cumulant.name,
        long_name: cumulant.long_name,
        units: cumulant.units,
        z: cumulant.z,
    })
}
