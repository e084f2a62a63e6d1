//! Parameters of the characteristic-scale search.
//!
//! Lengths are in metres. Defaults suit LES fields on grids of a few tens of
//! metres; the window seed and growth factor control how quickly the
//! principal-axis window widens when the two widths disagree.

use crate::cumulant::FftBackend;
use crate::width::{WidthMethod, WidthOptions};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleParams {
    /// Initial half-width of the principal-axis window.
    pub window_seed_m: f64,
    /// Window (cells) for one-shot axis queries such as directional profiles.
    pub axis_window_cells: usize,
    /// Search distance of the width estimators.
    pub max_width_m: f64,
    pub method: WidthMethod,
    /// Cutoff method only.
    pub width_peak_fraction: f64,
    /// Mass-weighted method only: integrate the sign-coherent centre alone.
    pub center_only: bool,
    /// Fixed sampling angle in degrees; skips the principal-axis search.
    pub sample_angle_deg: Option<f64>,
    /// Half-length of the line profiles returned by directional queries.
    pub profile_max_dist_m: f64,
    /// Upper bound on window-growth iterations.
    pub max_iterations: usize,
    /// Relative width difference above which the window grows.
    pub convergence_threshold: f64,
    pub growth_factor: f64,
    pub backend: FftBackend,
}

impl Default for ScaleParams {
    fn default() -> Self {
        Self {
            window_seed_m: 1000.0,
            axis_window_cells: 100,
            max_width_m: 5000.0,
            method: WidthMethod::MassWeighted,
            width_peak_fraction: 0.5,
            center_only: true,
            sample_angle_deg: None,
            profile_max_dist_m: 2000.0,
            max_iterations: 10,
            convergence_threshold: 0.30,
            growth_factor: 1.2,
            backend: FftBackend::RustFft,
        }
    }
}

impl ScaleParams {
    pub fn width_options(&self) -> WidthOptions {
        WidthOptions {
            max_width_m: self.max_width_m,
            width_peak_fraction: self.width_peak_fraction,
            center_only: self.center_only,
        }
    }

    pub fn with_method(mut self, method: WidthMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_sample_angle(mut self, degrees: f64) -> Self {
        self.sample_angle_deg = Some(degrees);
        self
    }
}
