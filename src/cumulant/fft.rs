//! Circular cross-correlation through 2D FFTs (row/column decomposition).

use crate::field::Field2;
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Forward/inverse plans for a `w × h` grid.
pub(crate) struct Fft2d {
    w: usize,
    h: usize,
    row_forward: Arc<dyn Fft<f64>>,
    col_forward: Arc<dyn Fft<f64>>,
    row_inverse: Arc<dyn Fft<f64>>,
    col_inverse: Arc<dyn Fft<f64>>,
}

impl Fft2d {
    pub(crate) fn new(w: usize, h: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            w,
            h,
            row_forward: planner.plan_fft_forward(w),
            col_forward: planner.plan_fft_forward(h),
            row_inverse: planner.plan_fft_inverse(w),
            col_inverse: planner.plan_fft_inverse(h),
        }
    }

    pub(crate) fn forward(&self, field: &Field2) -> Vec<Complex<f64>> {
        let mut data: Vec<Complex<f64>> = field.data.iter().map(|&v| Complex::new(v, 0.0)).collect();
        self.process(&mut data, &self.row_forward, &self.col_forward);
        data
    }

    /// Inverse transform normalized by `1/(w·h)`; returns the real part.
    pub(crate) fn inverse_real(&self, mut spectrum: Vec<Complex<f64>>) -> Field2 {
        self.process(&mut spectrum, &self.row_inverse, &self.col_inverse);
        let norm = 1.0 / (self.w * self.h) as f64;
        Field2 {
            w: self.w,
            h: self.h,
            data: spectrum.iter().map(|c| c.re * norm).collect(),
        }
    }

    fn process(&self, data: &mut [Complex<f64>], rows: &Arc<dyn Fft<f64>>, cols: &Arc<dyn Fft<f64>>) {
        // rustfft processes every consecutive chunk of the plan length
        rows.process(data);
        let mut transposed = transpose(data, self.w, self.h);
        cols.process(&mut transposed);
        let back = transpose(&transposed, self.h, self.w);
        data.copy_from_slice(&back);
    }
}

/// Transpose a row-major `w × h` buffer into a row-major `h × w` one.
fn transpose(data: &[Complex<f64>], w: usize, h: usize) -> Vec<Complex<f64>> {
    let mut out = vec![Complex::new(0.0, 0.0); w * h];
    for iy in 0..h {
        for ix in 0..w {
            out[ix * h + iy] = data[iy * w + ix];
        }
    }
    out
}

/// `C[k] = (1/N) Σ_n a[n + k] · b[n]` with periodic wrap-around, lag `k`
/// stored at index `k` (zero lag at the origin). `b = None` correlates `a`
/// with itself.
pub(crate) fn cross_correlate(a: &Field2, b: Option<&Field2>) -> Field2 {
    let plan = Fft2d::new(a.w, a.h);
    let spec_a = plan.forward(a);
    let cross: Vec<Complex<f64>> = match b {
        Some(b) => {
            let spec_b = plan.forward(b);
            spec_a
                .iter()
                .zip(spec_b.iter())
                .map(|(va, vb)| va * vb.conj())
                .collect()
        }
        None => spec_a
            .iter()
            .map(|va| Complex::new(va.norm_sqr(), 0.0))
            .collect(),
    };
    let mut out = plan.inverse_real(cross);
    let n = (a.w * a.h) as f64;
    out.data.iter_mut().for_each(|v| *v /= n);
    out
}
