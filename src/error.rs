//! Error type shared by the cumulant pipeline.
//!
//! Only contract violations and numerically unsound eigen-decompositions are
//! errors. Degenerate widths are reported through NaN/∞ sentinels instead.

/// Reasons why a cumulant computation cannot proceed.
#[derive(Clone, Debug, PartialEq)]
pub enum CumulantError {
    /// A field with zero rows or columns.
    EmptyField,
    /// Coordinate axis length does not match the buffer dimension.
    AxisLength {
        axis: &'static str,
        expected: usize,
        found: usize,
    },
    /// Coordinate axis is not finite and strictly increasing.
    AxisNotIncreasing { axis: &'static str },
    /// The two input fields have different shapes.
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// The two input fields share a shape but not their coordinates.
    AxisMismatch { axis: &'static str },
    /// Mask shape does not match the field it is applied to.
    MaskShapeMismatch {
        field: (usize, usize),
        mask: (usize, usize),
    },
    /// Principal-axis window too small to carry any moment.
    InvalidWindow { window_cells: usize },
    /// Moment tensor contains NaN or infinite entries.
    NonFiniteTensor,
    /// Moment tensor produced complex eigenvalues.
    ImaginaryPrincipalAxis { imag: f64 },
    /// Level stacks used for a height profile do not line up.
    LevelMismatch { left: usize, right: usize },
    /// Level stacks list the same number of levels at different heights.
    HeightMismatch {
        level: usize,
        left: Option<f64>,
        right: Option<f64>,
    },
}

impl std::fmt::Display for CumulantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CumulantError::EmptyField => write!(f, "field has no cells"),
            CumulantError::AxisLength {
                axis,
                expected,
                found,
            } => write!(
                f,
                "axis `{axis}` has {found} coordinates, expected {expected}"
            ),
            CumulantError::AxisNotIncreasing { axis } => {
                write!(f, "axis `{axis}` must be finite and strictly increasing")
            }
            CumulantError::ShapeMismatch { left, right } => write!(
                f,
                "field shapes differ ({}x{} vs {}x{})",
                left.0, left.1, right.0, right.1
            ),
            CumulantError::AxisMismatch { axis } => {
                write!(f, "fields have different `{axis}` coordinates")
            }
            CumulantError::MaskShapeMismatch { field, mask } => write!(
                f,
                "mask shape {}x{} does not match field shape {}x{}",
                mask.0, mask.1, field.0, field.1
            ),
            CumulantError::InvalidWindow { window_cells } => {
                write!(f, "principal-axis window of {window_cells} cells is too small")
            }
            CumulantError::NonFiniteTensor => {
                write!(f, "moment-of-inertia tensor has non-finite entries")
            }
            CumulantError::ImaginaryPrincipalAxis { imag } => write!(
                f,
                "encountered imaginary eigenvector (imaginary part {imag:.3e})"
            ),
            CumulantError::LevelMismatch { left, right } => {
                write!(f, "level stacks differ ({left} vs {right} levels)")
            }
            CumulantError::HeightMismatch { level, left, right } => write!(
                f,
                "level {level} is at different heights ({left:?} vs {right:?})"
            ),
        }
    }
}

impl std::error::Error for CumulantError {}

impl From<CumulantError> for String {
    fn from(err: CumulantError) -> Self {
        err.to_string()
    }
}
