use crate::width::WidthMethod;
use serde::Serialize;

/// Principal-axis orientation and widths of one cumulant.
///
/// Widths are in metres; NaN or `+∞` are serialized as `null`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CharacteristicScales {
    /// Cumulant name, e.g. `C(q,t)`.
    pub cumulant: String,
    pub z: Option<f64>,
    pub method: WidthMethod,
    /// Orientation in degrees, `[0, 180)`, NaN when the search gave up.
    pub principal_axis_deg: f64,
    pub width_principal: f64,
    pub width_perpendicular: f64,
    /// `C(0,0) > 0`.
    pub is_covariant: bool,
}

/// One pass of the window-growing loop.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WindowIteration {
    pub window_m: f64,
    pub window_cells: usize,
    pub theta_deg: f64,
    pub width_principal: f64,
    pub width_perpendicular: f64,
}

/// How the principal-axis search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// A fixed sampling angle was given; no search ran.
    FixedAngle,
    /// The two widths agreed, or the perpendicular one was the smaller.
    Converged,
    /// A width came back NaN; the loop stopped with that result.
    NanWidth,
    /// The iteration budget ran out; orientation and widths are NaN.
    IterationCap,
}

#[derive(Clone, Debug, Serialize)]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Wall-clock time per stage of one scale computation.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming {
            label: label.into(),
            elapsed_ms,
        });
    }
}

/// Result of a scale computation together with its search trace.
#[derive(Clone, Debug, Serialize)]
pub struct ScaleReport {
    pub scales: CharacteristicScales,
    pub outcome: SearchOutcome,
    pub iterations: Vec<WindowIteration>,
    pub timing: TimingBreakdown,
}

impl ScaleReport {
    pub fn converged(&self) -> bool {
        self.outcome == SearchOutcome::Converged
    }
}
