//! Second-order cumulants (zero-mean cross-correlation as a function of lag).
//!
//! [`compute_cumulant`] removes each field's spatial mean, optionally zeroes
//! the cells excluded by a mask, and evaluates the periodic cross-covariance
//!
//! ```text
//! C(dx, dy) = 1/(Nx·Ny) · Σ v1(x + dx, y + dy) · v2(x, y)
//! ```
//!
//! at every discrete lag. The result is shifted so the zero lag sits at index
//! `(w/2, h/2)`; the lag axes are the input coordinates relative to the
//! coordinate of that cell.
//!
//! The transform backend is an explicit [`FftBackend`] value. Both backends
//! share normalization and centring and agree to rounding error.

mod direct;
mod fft;

use crate::error::CumulantError;
use crate::field::{Field2, GridField, Mask};
use log::debug;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// How the periodic correlation sum is evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FftBackend {
    /// Row/column FFTs planned with `rustfft`.
    #[default]
    RustFft,
    /// Direct O(N²) lag-domain sum; reference implementation.
    Direct,
}

/// Lag-indexed cumulant of two fields.
#[derive(Clone, Debug, Serialize)]
pub struct CumulantField {
    /// `C(name1,name2)`
    pub name: String,
    pub long_name: String,
    /// `units1·units2`
    pub units: String,
    /// Height level inherited from the first field.
    pub z: Option<f64>,
    lag_x: Vec<f64>,
    lag_y: Vec<f64>,
    values: Field2,
}

impl CumulantField {
    /// Assemble a cumulant from lag axes and values.
    ///
    /// The zero lag is assumed to sit at index `(w/2, h/2)`; the axes must
    /// satisfy the same invariants as a [`GridField`]'s.
    pub fn from_parts(
        name: impl Into<String>,
        units: impl Into<String>,
        lag_x: Vec<f64>,
        lag_y: Vec<f64>,
        values: Field2,
    ) -> Result<Self, CumulantError> {
        // reuse the grid invariants
        let (_, lag_x, lag_y, values) =
            GridField::new(Default::default(), lag_x, lag_y, values)?.into_parts();
        let name = name.into();
        Ok(Self {
            long_name: name.clone(),
            name,
            units: units.into(),
            z: None,
            lag_x,
            lag_y,
            values,
        })
    }

    #[inline]
    pub fn lag_x(&self) -> &[f64] {
        &self.lag_x
    }
    #[inline]
    pub fn lag_y(&self) -> &[f64] {
        &self.lag_y
    }
    #[inline]
    pub fn values(&self) -> &Field2 {
        &self.values
    }
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }

    /// Index of the zero-lag cell.
    #[inline]
    pub fn center_index(&self) -> (usize, usize) {
        (self.values.w / 2, self.values.h / 2)
    }

    /// C(0, 0).
    pub fn center_value(&self) -> f64 {
        let (cx, cy) = self.center_index();
        self.values.get(cx, cy)
    }

    /// Index ranges of the square window of `cells` cells centred on the zero
    /// lag, clamped to the grid.
    pub fn window(&self, cells: usize) -> (Range<usize>, Range<usize>) {
        let (cx, cy) = self.center_index();
        let half = cells / 2;
        (
            cx.saturating_sub(half)..(cx + half).min(self.values.w),
            cy.saturating_sub(half)..(cy + half).min(self.values.h),
        )
    }

    /// Same lags and labels, new values.
    pub(crate) fn with_values(&self, values: Field2) -> Self {
        debug_assert_eq!(values.shape(), self.values.shape());
        Self {
            name: self.name.clone(),
            long_name: self.long_name.clone(),
            units: self.units.clone(),
            z: self.z,
            lag_x: self.lag_x.clone(),
            lag_y: self.lag_y.clone(),
            values,
        }
    }
}

/// Compute the cumulant of `field1` and `field2` (autocorrelation when
/// `field2` is `None`), excluding the cells where `mask` is false.
pub fn compute_cumulant(
    field1: &GridField,
    field2: Option<&GridField>,
    mask: Option<&Mask>,
    backend: FftBackend,
) -> Result<CumulantField, CumulantError> {
    if let Some(f2) = field2 {
        field1.check_compatible(f2)?;
    }
    if let Some(m) = mask {
        m.check_matches(field1)?;
    }

    let v1 = prepare(field1, mask);
    let v2 = field2.map(|f2| prepare(f2, mask));

    let raw = match backend {
        FftBackend::RustFft => fft::cross_correlate(&v1, v2.as_ref()),
        FftBackend::Direct => direct::cross_correlate(&v1, v2.as_ref()),
    };
    let (w, h) = raw.shape();
    let values = raw.roll(w / 2, h / 2);

    let x0 = field1.x()[w / 2];
    let y0 = field1.y()[h / 2];
    let lag_x = field1.x().iter().map(|x| x - x0).collect();
    let lag_y = field1.y().iter().map(|y| y - y0).collect();

    let other = field2.unwrap_or(field1);
    let name = format!("C({},{})", field1.meta.label(), other.meta.label());
    let mut long_name = format!("C({},{})", long_label(field1), long_label(other));
    if let Some(m) = mask {
        long_name = format!("{long_name} masked by {}", m.name);
    }
    let units = format!("{}·{}", field1.meta.units, other.meta.units);

    debug!(
        "compute_cumulant: {name} {}x{} backend={:?} masked={}",
        w,
        h,
        backend,
        mask.is_some()
    );

    Ok(CumulantField {
        name,
        long_name,
        units,
        z: field1.meta.z,
        lag_x,
        lag_y,
        values,
    })
}

/// Mean-removed values with masked-out cells set to zero.
fn prepare(field: &GridField, mask: Option<&Mask>) -> Field2 {
    let values = field.values();
    let mean = values.mean();
    let mut out = Field2::from_fn(values.w, values.h, |ix, iy| values.get(ix, iy) - mean);
    if let Some(m) = mask {
        for (v, &keep) in out.data.iter_mut().zip(m.data.iter()) {
            if !keep {
                *v = 0.0;
            }
        }
    }
    out
}

fn long_label(field: &GridField) -> &str {
    field
        .meta
        .long_name
        .as_deref()
        .unwrap_or_else(|| field.meta.label())
}
