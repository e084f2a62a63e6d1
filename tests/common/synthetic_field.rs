use cumulant_scales::{CumulantField, Field2, FieldMeta, GridField};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Elliptical Gaussian blob centred on cell `(n/2, n/2)` of an `n × n` grid,
/// with its long axis (`sigma_along`) at `theta` radians from +x.
pub fn gaussian_blob(
    n: usize,
    spacing: f64,
    sigma_along: f64,
    sigma_across: f64,
    theta: f64,
) -> GridField {
    let (c, s) = (theta.cos(), theta.sin());
    let center = (n / 2) as f64 * spacing;
    let values = Field2::from_fn(n, n, |ix, iy| {
        let x = ix as f64 * spacing - center;
        let y = iy as f64 * spacing - center;
        let along = c * x + s * y;
        let across = -s * x + c * y;
        (-(along / sigma_along).powi(2) / 2.0 - (across / sigma_across).powi(2) / 2.0).exp()
    });
    GridField::uniform(FieldMeta::new("w", "m/s"), spacing, spacing, values)
        .expect("valid synthetic grid")
}

/// Uniform white noise in `[-1, 1)` from a seeded generator.
pub fn random_field(name: &str, n: usize, spacing: f64, seed: u64) -> GridField {
    let mut rng = StdRng::seed_from_u64(seed);
    let values = Field2::from_fn(n, n, |_, _| rng.gen_range(-1.0..1.0));
    GridField::uniform(FieldMeta::new(name, "1"), spacing, spacing, values)
        .expect("valid synthetic grid")
}

/// Cumulant `exp(-r / decay_length)` centred on the zero lag of an `n × n`
/// lag grid.
pub fn exponential_cumulant(n: usize, spacing: f64, decay_length: f64) -> CumulantField {
    let half = (n / 2) as f64;
    let lag: Vec<f64> = (0..n).map(|i| (i as f64 - half) * spacing).collect();
    let values = Field2::from_fn(n, n, |ix, iy| {
        let r = (lag[ix].powi(2) + lag[iy].powi(2)).sqrt();
        (-r / decay_length).exp()
    });
    CumulantField::from_parts("C(q,q)", "g²/kg²", lag.clone(), lag, values)
        .expect("valid synthetic lags")
}

/// Population variance of a field's values.
pub fn variance(field: &GridField) -> f64 {
    let data = &field.values().data;
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}
