//! Reference circular cross-correlation evaluated directly in the lag domain.
//!
//! O((w·h)²); intended for small grids and for validating the FFT path. Uses
//! the same lag layout and normalization as [`super::fft::cross_correlate`].

use crate::field::Field2;

pub(crate) fn cross_correlate(a: &Field2, b: Option<&Field2>) -> Field2 {
    let b = b.unwrap_or(a);
    let (w, h) = a.shape();
    let n = (w * h) as f64;
    Field2::from_fn(w, h, |kx, ky| {
        let mut acc = 0.0;
        for iy in 0..h {
            let sy = (iy + ky) % h;
            let row_a = a.row(sy);
            let row_b = b.row(iy);
            for ix in 0..w {
                acc += row_a[(ix + kx) % w] * row_b[ix];
            }
        }
        acc / n
    })
}
