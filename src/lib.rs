#![doc = include_str!("../README.md")]

// Core pipeline, leaves first
pub mod error;
pub mod field;
pub mod cumulant;
pub mod sampling;
pub mod principal;
pub mod width;
pub mod scales;
pub mod profile;

// Helpers shared by the stages and the tools
pub mod angle;
pub mod config;
pub mod numeric;

// --- High-level re-exports -------------------------------------------------

pub use crate::cumulant::{compute_cumulant, CumulantField, FftBackend};
pub use crate::error::CumulantError;
pub use crate::field::{Field2, FieldMeta, FieldStack, GridField, Mask};
pub use crate::principal::{find_principal_axis, PrincipalAxis};
pub use crate::scales::{
    characteristic_scales, characteristic_scales_with_diagnostics, CharacteristicScales,
    ScaleParams, ScaleReport,
};
pub use crate::width::{WidthEstimate, WidthMethod};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use cumulant_scales::prelude::*;
///
/// # fn main() -> Result<(), CumulantError> {
/// let values = Field2::from_fn(128, 128, |ix, iy| ((ix * 31 + iy * 17) % 13) as f64);
/// let q = GridField::uniform(FieldMeta::new("q", "g/kg"), 25.0, 25.0, values)?;
///
/// let scales = characteristic_scales(&q, None, None, &ScaleParams::default())?;
/// println!(
///     "{}: theta={:.1}deg widths=({:.0} m, {:.0} m)",
///     scales.cumulant,
///     scales.principal_axis_deg,
///     scales.width_principal,
///     scales.width_perpendicular
/// );
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        characteristic_scales, compute_cumulant, CharacteristicScales, CumulantError, Field2,
        FieldMeta, GridField, Mask, ScaleParams, WidthMethod,
    };
}
