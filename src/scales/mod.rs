//! Characteristic scales of a cumulant: principal-axis orientation plus the
//! widths along and across it.
//!
//! The orientation comes from the moment tensor inside a window around the
//! zero lag. Starting from `window_seed_m`, the window grows by
//! `growth_factor` while the perpendicular width exceeds the principal one by
//! more than `convergence_threshold` (relative to their mean), for at most
//! `max_iterations` passes. Giving up logs a warning and reports NaN. A NaN
//! width ends the search early with that result. With `sample_angle_deg` set
//! the search is skipped.

mod params;
mod profiles;
mod report;
mod search;

pub use params::ScaleParams;
pub use profiles::{directional_profiles, DirectionalProfiles};
pub use report::{
    CharacteristicScales, ScaleReport, SearchOutcome, StageTiming, TimingBreakdown,
    WindowIteration,
};
pub use search::{characteristic_scales, characteristic_scales_with_diagnostics, scales_from_cumulant};

#[cfg(test)]
mod tests;
