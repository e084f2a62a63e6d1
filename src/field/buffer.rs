//! Owned single-channel f64 buffer in row-major layout.
//!
//! Rows run along `y`, columns along `x`, so `get(ix, iy)` addresses the
//! cell at `x[ix], y[iy]`. Used for input fields and for lag-indexed
//! cumulants alike.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field2 {
    /// Number of columns (cells along x)
    pub w: usize,
    /// Number of rows (cells along y)
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<f64>,
}

impl Field2 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Wrap existing row-major data. Returns `None` if the length is off.
    pub fn from_vec(w: usize, h: usize, data: Vec<f64>) -> Option<Self> {
        (data.len() == w * h).then_some(Self { w, h, data })
    }

    /// Evaluate `f(ix, iy)` for every cell.
    pub fn from_fn<F>(w: usize, h: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(w * h);
        for iy in 0..h {
            for ix in 0..w {
                data.push(f(ix, iy));
            }
        }
        Self { w, h, data }
    }

    #[inline]
    /// Convert (ix, iy) to a linear index into `data`.
    pub fn idx(&self, ix: usize, iy: usize) -> usize {
        iy * self.w + ix
    }
    #[inline]
    pub fn get(&self, ix: usize, iy: usize) -> f64 {
        self.data[self.idx(ix, iy)]
    }
    #[inline]
    pub fn set(&mut self, ix: usize, iy: usize, v: f64) {
        let i = self.idx(ix, iy);
        self.data[i] = v;
    }
    #[inline]
    pub fn row(&self, iy: usize) -> &[f64] {
        let start = iy * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    pub fn row_mut(&mut self, iy: usize) -> &mut [f64] {
        let start = iy * self.w;
        &mut self.data[start..start + self.w]
    }

    /// `(w, h)` pair, handy for shape comparisons.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Largest absolute value, ignoring NaNs.
    pub fn max_abs(&self) -> f64 {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// Copy the rectangle `[x0, x1) × [y0, y1)` into a new buffer. Bounds
    /// are clamped to the buffer; an inverted range gives an empty side.
    pub fn crop(&self, x0: usize, x1: usize, y0: usize, y1: usize) -> Field2 {
        let x1 = x1.min(self.w);
        let y1 = y1.min(self.h);
        let x0 = x0.min(x1);
        let y0 = y0.min(y1);
        let w = x1 - x0;
        let h = y1 - y0;
        let mut out = Field2::new(w, h);
        for (oy, iy) in (y0..y1).enumerate() {
            out.row_mut(oy).copy_from_slice(&self.row(iy)[x0..x1]);
        }
        out
    }

    /// Circularly shift by `(sx, sy)` cells: value at `(i, j)` moves to
    /// `((i + sx) mod w, (j + sy) mod h)`.
    pub fn roll(&self, sx: usize, sy: usize) -> Field2 {
        let mut out = Field2::new(self.w, self.h);
        if self.is_empty() {
            return out;
        }
        for iy in 0..self.h {
            let ty = (iy + sy) % self.h;
            let src = self.row(iy);
            let dst = out.row_mut(ty);
            for (ix, &v) in src.iter().enumerate() {
                dst[(ix + sx) % self.w] = v;
            }
        }
        out
    }
}
