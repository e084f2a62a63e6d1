//! Principal axis of a cumulant from its moment-of-inertia tensor.
//!
//! Inside a square window around the zero lag the tensor
//!
//! ```text
//! I = | Σ s·C·y²   Σ s·C·x·y |
//!     | Σ s·C·x·y  Σ s·C·x²  |
//! ```
//!
//! is accumulated with `s = sign(C(0,0))`, so anti-correlated cumulants are
//! treated like correlated ones. The eigenvector of the smallest eigenvalue
//! points across the direction of elongation in the swapped frame, which
//! gives `θ = atan2(−v₁, v₀)` folded into `[0, π)`.

use crate::angle::normalize_half_pi;
use crate::cumulant::CumulantField;
use crate::error::CumulantError;
use crate::numeric::sign;
use log::debug;
use nalgebra::{Matrix2, SymmetricEigen};
use serde::Serialize;

/// Relative size of an eigenvalue's imaginary part treated as round-off.
const IMAG_TOLERANCE: f64 = 1e-10;

/// Direction of elongation of a cumulant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PrincipalAxis {
    /// Angle from +x, counter-clockwise, in `[0, π)`.
    pub theta_rad: f64,
    /// Height tag of the cumulant it was derived from.
    pub z: Option<f64>,
}

impl PrincipalAxis {
    pub fn degrees(&self) -> f64 {
        self.theta_rad.to_degrees()
    }
}

/// Principal axis of `field` within `window_cells` cells around the zero lag.
pub fn find_principal_axis(
    field: &CumulantField,
    window_cells: usize,
) -> Result<PrincipalAxis, CumulantError> {
    if window_cells < 2 {
        return Err(CumulantError::InvalidWindow { window_cells });
    }
    let tensor = moment_tensor(field, window_cells);
    if tensor.iter().any(|v| !v.is_finite()) {
        return Err(CumulantError::NonFiniteTensor);
    }

    let scale = tensor.norm();
    let imag = tensor
        .complex_eigenvalues()
        .iter()
        .map(|ev| ev.im.abs())
        .fold(0.0, f64::max);
    if imag > IMAG_TOLERANCE * scale {
        return Err(CumulantError::ImaginaryPrincipalAxis { imag });
    }

    let eig = SymmetricEigen::new(tensor);
    let v_min = if eig.eigenvalues[0] <= eig.eigenvalues[1] {
        eig.eigenvectors.column(0)
    } else {
        eig.eigenvectors.column(1)
    };
    let theta = normalize_half_pi((-v_min[1]).atan2(v_min[0]));
    debug!(
        "find_principal_axis: {} window={} eigenvalues=({:.3e}, {:.3e}) theta={:.2}deg",
        field.name,
        window_cells,
        eig.eigenvalues[0],
        eig.eigenvalues[1],
        theta.to_degrees()
    );
    Ok(PrincipalAxis {
        theta_rad: theta,
        z: field.z,
    })
}

fn moment_tensor(field: &CumulantField, window_cells: usize) -> Matrix2<f64> {
    let s = sign(field.center_value());
    let (xs, ys) = field.window(window_cells);
    let values = field.values();
    let (mut ixx, mut iyy, mut ixy) = (0.0, 0.0, 0.0);
    for iy in ys {
        let y = field.lag_y()[iy];
        let row = values.row(iy);
        for ix in xs.clone() {
            let x = field.lag_x()[ix];
            let m = s * row[ix];
            ixx += m * x * x;
            iyy += m * y * y;
            ixy += m * x * y;
        }
    }
    Matrix2::new(iyy, ixy, ixy, ixx)
}
