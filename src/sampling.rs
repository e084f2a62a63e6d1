//! Bilinear interpolation of a lag field and sampling along a straight line
//! through the zero lag.
//!
//! Values are stored normalized by their largest magnitude and rescaled on
//! output, so fields of very different units interpolate alike. Queries
//! outside the grid are clamped to the nearest edge.

use crate::cumulant::CumulantField;
use crate::field::Field2;
use serde::Serialize;

/// Bilinear interpolant over a rectilinear grid.
#[derive(Clone, Debug)]
pub struct Interpolant {
    x: Vec<f64>,
    y: Vec<f64>,
    normalized: Field2,
    scale: f64,
}

impl Interpolant {
    /// `x` and `y` must have `values.w` and `values.h` increasing entries.
    pub fn new(x: &[f64], y: &[f64], values: &Field2) -> Self {
        debug_assert_eq!(x.len(), values.w);
        debug_assert_eq!(y.len(), values.h);
        let max_abs = values.max_abs();
        let scale = if max_abs > 0.0 && max_abs.is_finite() {
            max_abs
        } else {
            1.0
        };
        let normalized = Field2 {
            w: values.w,
            h: values.h,
            data: values.data.iter().map(|v| v / scale).collect(),
        };
        Self {
            x: x.to_vec(),
            y: y.to_vec(),
            normalized,
            scale,
        }
    }

    pub fn from_cumulant(field: &CumulantField) -> Self {
        Self::new(field.lag_x(), field.lag_y(), field.values())
    }

    /// Interpolated value at `(x, y)`.
    pub fn at(&self, x: f64, y: f64) -> f64 {
        let (ix, tx) = locate(&self.x, x);
        let (iy, ty) = locate(&self.y, y);
        let f = &self.normalized;
        let ix1 = (ix + 1).min(f.w - 1);
        let iy1 = (iy + 1).min(f.h - 1);
        let lower = lerp(f.get(ix, iy), f.get(ix1, iy), tx);
        let upper = lerp(f.get(ix, iy1), f.get(ix1, iy1), tx);
        lerp(lower, upper, ty) * self.scale
    }

    /// Sampler along the line through the origin at angle `theta` (radians,
    /// counter-clockwise from +x).
    pub fn along(self, theta: f64) -> LineSampler {
        LineSampler {
            cos: theta.cos(),
            sin: theta.sin(),
            theta,
            interp: self,
        }
    }
}

/// Containing cell and fractional offset of `q` on `axis`, clamped to the
/// axis range.
fn locate(axis: &[f64], q: f64) -> (usize, f64) {
    let n = axis.len();
    if n < 2 || q.is_nan() {
        return (0, if q.is_nan() { f64::NAN } else { 0.0 });
    }
    if q <= axis[0] {
        return (0, 0.0);
    }
    if q >= axis[n - 1] {
        return (n - 2, 1.0);
    }
    let i = axis.partition_point(|&v| v <= q).saturating_sub(1).min(n - 2);
    let t = (q - axis[i]) / (axis[i + 1] - axis[i]);
    (i, t)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    // exact endpoints keep a NaN neighbour from leaking in
    if t == 0.0 {
        a
    } else if t == 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

/// A value sampled at signed distance `mu` along a line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Evaluates an [`Interpolant`] at `(cos θ·mu, sin θ·mu)`.
#[derive(Clone, Debug)]
pub struct LineSampler {
    theta: f64,
    cos: f64,
    sin: f64,
    interp: Interpolant,
}

impl LineSampler {
    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Interpolated value at signed distance `mu`.
    #[inline]
    pub fn value(&self, mu: f64) -> f64 {
        self.interp.at(self.cos * mu, self.sin * mu)
    }

    pub fn sample(&self, mu: f64) -> SamplePoint {
        let x = self.cos * mu;
        let y = self.sin * mu;
        SamplePoint {
            x,
            y,
            value: self.interp.at(x, y),
        }
    }

    pub fn sample_many(&self, mus: &[f64]) -> Vec<SamplePoint> {
        mus.iter().map(|&mu| self.sample(mu)).collect()
    }
}

/// Convenience: interpolant over `field` sampled along `theta`.
pub fn make_sampler(field: &CumulantField, theta: f64) -> LineSampler {
    Interpolant::from_cumulant(field).along(theta)
}

/// One sample of a [`LineProfile`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProfilePoint {
    pub distance: f64,
    pub value: f64,
}

/// Values along a line through the zero lag, ordered by signed distance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineProfile {
    pub theta_rad: f64,
    pub points: Vec<ProfilePoint>,
}

impl LineProfile {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Value at zero distance, if sampled.
    pub fn center(&self) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.distance == 0.0)
            .map(|p| p.value)
    }
}

/// Sample `field` along `theta` at the lag-x coordinates with
/// `|x| < max_dist`.
pub fn line_sample(field: &CumulantField, theta: f64, max_dist: f64) -> LineProfile {
    let sampler = make_sampler(field, theta);
    let points = field
        .lag_x()
        .iter()
        .copied()
        .filter(|mu| mu.abs() < max_dist)
        .map(|mu| ProfilePoint {
            distance: mu,
            value: sampler.value(mu),
        })
        .collect();
    LineProfile {
        theta_rad: theta,
        points,
    }
}
