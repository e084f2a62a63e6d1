//! Boolean masks selecting which cells contribute to a cumulant.

use super::GridField;
use crate::error::CumulantError;
use serde::{Deserialize, Serialize};

/// Row-major boolean mask; `true` keeps a cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mask {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub data: Vec<bool>,
}

impl Mask {
    /// Wrap existing row-major flags. Returns `None` if the length is off.
    pub fn new(name: impl Into<String>, w: usize, h: usize, data: Vec<bool>) -> Option<Self> {
        (data.len() == w * h).then(|| Self {
            name: name.into(),
            w,
            h,
            data,
        })
    }

    pub fn from_fn<F>(name: impl Into<String>, w: usize, h: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut data = Vec::with_capacity(w * h);
        for iy in 0..h {
            for ix in 0..w {
                data.push(f(ix, iy));
            }
        }
        Self {
            name: name.into(),
            w,
            h,
            data,
        }
    }

    /// Broadcast one flag per column (x) over `h` rows.
    pub fn broadcast_x(name: impl Into<String>, columns: &[bool], h: usize) -> Self {
        Self::from_fn(name, columns.len(), h, |ix, _| columns[ix])
    }

    /// Broadcast one flag per row (y) over `w` columns.
    pub fn broadcast_y(name: impl Into<String>, rows: &[bool], w: usize) -> Self {
        Self::from_fn(name, w, rows.len(), |_, iy| rows[iy])
    }

    #[inline]
    pub fn get(&self, ix: usize, iy: usize) -> bool {
        self.data[iy * self.w + ix]
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&keep| keep).count()
    }

    pub fn check_matches(&self, field: &GridField) -> Result<(), CumulantError> {
        if self.shape() != field.shape() {
            return Err(CumulantError::MaskShapeMismatch {
                field: field.shape(),
                mask: self.shape(),
            });
        }
        Ok(())
    }
}
