use serde::{Deserialize, Serialize};
use std::fmt;

/// Algorithm turning a line profile into a width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthMethod {
    /// Centroid distance of the clipped, sign-flipped profile on each side.
    #[default]
    MassWeighted,
    /// Distance at which the normalized profile drops to a fraction of its peak.
    Cutoff,
}

impl fmt::Display for WidthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidthMethod::MassWeighted => f.write_str("MASS_WEIGHTED"),
            WidthMethod::Cutoff => f.write_str("CUTOFF"),
        }
    }
}

/// Options shared by the width estimators.
///
/// - `max_width_m`: search distance. The mass-weighted method integrates over
///   `±max_width_m/2`, the cutoff method searches `±max_width_m`.
/// - `center_only`: restrict the mass-weighted method to the sign-coherent
///   region around the zero lag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidthOptions {
    pub max_width_m: f64,
    /// Fraction of the peak defining the cutoff edge.
    pub width_peak_fraction: f64,
    pub center_only: bool,
}

impl Default for WidthOptions {
    fn default() -> Self {
        Self {
            max_width_m: 5000.0,
            width_peak_fraction: 0.5,
            center_only: true,
        }
    }
}
