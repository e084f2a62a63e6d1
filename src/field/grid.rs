//! Named 2D scalar field on a horizontal grid with physical coordinates.

use super::Field2;
use crate::error::CumulantError;
use serde::{Deserialize, Serialize};

/// Descriptive metadata carried alongside a field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMeta {
    /// Short variable name (e.g. `q`, `t`, `w_zt`).
    pub name: String,
    /// Optional longer human-readable description.
    pub long_name: Option<String>,
    /// Physical units of the values.
    pub units: String,
    /// Height level in metres.
    pub z: Option<f64>,
    /// Time tag in seconds.
    pub time: Option<f64>,
}

impl FieldMeta {
    pub fn new(name: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
            ..Default::default()
        }
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = Some(long_name.into());
        self
    }

    /// Name used when labelling derived quantities: `name`, or the long name
    /// when the short one is empty.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            self.long_name.as_deref().unwrap_or("")
        } else {
            &self.name
        }
    }
}

/// Scalar field sampled on a rectilinear grid.
///
/// Invariants (enforced by [`GridField::new`]): `x.len() == values.w`,
/// `y.len() == values.h`, the buffer is non-empty and both axes are finite
/// and strictly increasing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridField {
    pub meta: FieldMeta,
    x: Vec<f64>,
    y: Vec<f64>,
    values: Field2,
}

impl GridField {
    pub fn new(
        meta: FieldMeta,
        x: Vec<f64>,
        y: Vec<f64>,
        values: Field2,
    ) -> Result<Self, CumulantError> {
        if values.is_empty() {
            return Err(CumulantError::EmptyField);
        }
        check_axis("x", &x, values.w)?;
        check_axis("y", &y, values.h)?;
        Ok(Self { meta, x, y, values })
    }

    /// Field on a uniform grid with spacing `dx`, `dy` and the first cell at
    /// the origin.
    pub fn uniform(
        meta: FieldMeta,
        dx: f64,
        dy: f64,
        values: Field2,
    ) -> Result<Self, CumulantError> {
        let x = (0..values.w).map(|i| i as f64 * dx).collect();
        let y = (0..values.h).map(|j| j as f64 * dy).collect();
        Self::new(meta, x, y, values)
    }

    #[inline]
    pub fn x(&self) -> &[f64] {
        &self.x
    }
    #[inline]
    pub fn y(&self) -> &[f64] {
        &self.y
    }
    #[inline]
    pub fn values(&self) -> &Field2 {
        &self.values
    }
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }

    /// Largest spacing between neighbouring x coordinates.
    pub fn spacing_x(&self) -> f64 {
        max_spacing(&self.x)
    }

    /// Largest spacing between neighbouring y coordinates.
    pub fn spacing_y(&self) -> f64 {
        max_spacing(&self.y)
    }

    pub(crate) fn into_parts(self) -> (FieldMeta, Vec<f64>, Vec<f64>, Field2) {
        (self.meta, self.x, self.y, self.values)
    }

    /// Same shape and identical coordinates.
    pub fn check_compatible(&self, other: &GridField) -> Result<(), CumulantError> {
        if self.shape() != other.shape() {
            return Err(CumulantError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        if self.x != other.x {
            return Err(CumulantError::AxisMismatch { axis: "x" });
        }
        if self.y != other.y {
            return Err(CumulantError::AxisMismatch { axis: "y" });
        }
        Ok(())
    }
}

fn check_axis(axis: &'static str, coords: &[f64], expected: usize) -> Result<(), CumulantError> {
    if coords.len() != expected {
        return Err(CumulantError::AxisLength {
            axis,
            expected,
            found: coords.len(),
        });
    }
    let increasing = coords.iter().all(|v| v.is_finite())
        && coords.windows(2).all(|pair| pair[1] > pair[0]);
    if !increasing {
        return Err(CumulantError::AxisNotIncreasing { axis });
    }
    Ok(())
}

fn max_spacing(coords: &[f64]) -> f64 {
    coords
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_axis_length() {
        let err = GridField::new(
            FieldMeta::new("q", "g/kg"),
            vec![0.0, 1.0],
            vec![0.0, 1.0, 2.0],
            Field2::new(3, 3),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CumulantError::AxisLength {
                axis: "x",
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn rejects_non_monotonic_axis() {
        let err = GridField::new(
            FieldMeta::new("q", "g/kg"),
            vec![0.0, 1.0, 2.0],
            vec![0.0, 2.0, 1.0],
            Field2::new(3, 3),
        )
        .unwrap_err();
        assert_eq!(err, CumulantError::AxisNotIncreasing { axis: "y" });
    }

    #[test]
    fn uniform_grid_reports_spacing() {
        let f = GridField::uniform(FieldMeta::default(), 50.0, 25.0, Field2::new(4, 3)).unwrap();
        assert_eq!(f.spacing_x(), 50.0);
        assert_eq!(f.spacing_y(), 25.0);
        assert_eq!(f.y(), &[0.0, 25.0, 50.0]);
    }

    #[test]
    fn compatibility_checks_coordinates() {
        let a = GridField::uniform(FieldMeta::default(), 50.0, 50.0, Field2::new(4, 4)).unwrap();
        let b = GridField::uniform(FieldMeta::default(), 25.0, 50.0, Field2::new(4, 4)).unwrap();
        assert_eq!(
            a.check_compatible(&b),
            Err(CumulantError::AxisMismatch { axis: "x" })
        );
        let c = GridField::uniform(FieldMeta::default(), 50.0, 50.0, Field2::new(4, 5)).unwrap();
        assert!(matches!(
            a.check_compatible(&c),
            Err(CumulantError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn label_falls_back_to_long_name() {
        let meta = FieldMeta::new("", "K").with_long_name("liquid potential temperature");
        assert_eq!(meta.label(), "liquid potential temperature");
    }
}
