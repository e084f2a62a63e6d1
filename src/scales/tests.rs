use super::*;
use crate::angle::angular_difference;
use crate::cumulant::CumulantField;
use crate::field::{Field2, FieldMeta, GridField};
use crate::width::WidthMethod;

fn blob(sigma_x: f64, sigma_y: f64, amplitude: f64) -> CumulantField {
    let lag: Vec<f64> = (-64..64).map(|i| i as f64 * 50.0).collect();
    let values = Field2::from_fn(128, 128, |ix, iy| {
        let (x, y) = (lag[ix], lag[iy]);
        amplitude * (-(x / sigma_x).powi(2) / 2.0 - (y / sigma_y).powi(2) / 2.0).exp()
    });
    CumulantField::from_parts("C(w,w)", "m²/s²", lag.clone(), lag, values).unwrap()
}

#[test]
fn defaults_match_documented_values() {
    let p = ScaleParams::default();
    assert_eq!(p.window_seed_m, 1000.0);
    assert_eq!(p.axis_window_cells, 100);
    assert_eq!(p.max_width_m, 5000.0);
    assert_eq!(p.method, WidthMethod::MassWeighted);
    assert_eq!(p.width_peak_fraction, 0.5);
    assert!(p.center_only);
    assert_eq!(p.sample_angle_deg, None);
    assert_eq!(p.max_iterations, 10);
    assert_eq!(p.convergence_threshold, 0.30);
    assert_eq!(p.growth_factor, 1.2);
}

#[test]
fn partial_json_fills_defaults() {
    let p: ScaleParams =
        serde_json::from_str(r#"{"method": "cutoff", "backend": "direct", "max_iterations": 3}"#)
            .unwrap();
    assert_eq!(p.method, WidthMethod::Cutoff);
    assert_eq!(p.backend, crate::cumulant::FftBackend::Direct);
    assert_eq!(p.max_iterations, 3);
    assert_eq!(p.window_seed_m, 1000.0);
}

#[test]
fn elongated_blob_converges_on_first_window() {
    let report = scales_from_cumulant(&blob(300.0, 100.0, 1.0), &ScaleParams::default()).unwrap();
    assert!(report.converged());
    assert_eq!(report.iterations.len(), 1);
    assert_eq!(report.iterations[0].window_cells, 40);
    let scales = &report.scales;
    assert!(scales.principal_axis_deg.abs() < 1e-6);
    assert!(scales.width_principal > 2.0 * scales.width_perpendicular);
    assert!(scales.is_covariant);
    assert_eq!(scales.cumulant, "C(w,w)");
}

#[test]
fn fixed_angle_skips_the_search() {
    let params = ScaleParams::default().with_sample_angle(90.0);
    let report = scales_from_cumulant(&blob(300.0, 100.0, 1.0), &params).unwrap();
    assert_eq!(report.outcome, SearchOutcome::FixedAngle);
    assert!(report.iterations.is_empty());
    assert!((report.scales.principal_axis_deg - 90.0).abs() < 1e-12);
    // along y the blob is narrow
    assert!(report.scales.width_principal < report.scales.width_perpendicular);
}

#[test]
fn exhausted_budget_reports_nan() {
    let params = ScaleParams {
        max_iterations: 0,
        ..ScaleParams::default()
    };
    let report = scales_from_cumulant(&blob(300.0, 100.0, 1.0), &params).unwrap();
    assert_eq!(report.outcome, SearchOutcome::IterationCap);
    assert!(report.scales.principal_axis_deg.is_nan());
    assert!(report.scales.width_principal.is_nan());
    assert!(report.scales.width_perpendicular.is_nan());
}

/// Narrow core elongated along y inside a weak halo elongated along x. Small
/// windows only see the core.
fn core_with_halo() -> CumulantField {
    let lag: Vec<f64> = (-64..64).map(|i| i as f64 * 50.0).collect();
    let values = Field2::from_fn(128, 128, |ix, iy| {
        let (x, y) = (lag[ix], lag[iy]);
        let core = (-(x / 60.0).powi(2) / 2.0 - (y / 150.0).powi(2) / 2.0).exp();
        let halo = 0.3 * (-(x / 1200.0).powi(2) / 2.0 - (y / 150.0).powi(2) / 2.0).exp();
        core + halo
    });
    CumulantField::from_parts("C(q,q)", "g²/kg²", lag.clone(), lag, values).unwrap()
}

#[test]
fn window_grows_until_the_widths_agree() {
    let params = ScaleParams {
        window_seed_m: 100.0,
        ..ScaleParams::default()
    };
    let report = scales_from_cumulant(&core_with_halo(), &params).unwrap();
    assert_eq!(report.outcome, SearchOutcome::Converged);

    let cells: Vec<usize> = report.iterations.iter().map(|it| it.window_cells).collect();
    assert_eq!(cells, vec![4, 4, 4, 6, 8, 8, 10, 14]);
    assert!(cells.windows(2).all(|pair| pair[1] >= pair[0]));
    let last = &report.iterations[cells.len() - 1];
    assert!((last.window_m - 100.0 * 1.2f64.powi(7)).abs() < 1e-9);

    // the seed window sees the core only and picks a wrong axis
    let first = &report.iterations[0];
    assert!(first.theta_deg > 45.0, "seed theta {:.2}", first.theta_deg);
    assert!(first.width_perpendicular > first.width_principal);

    let scales = &report.scales;
    let off_axis = angular_difference(scales.principal_axis_deg.to_radians(), 0.0);
    assert!(off_axis < 2f64.to_radians(), "final theta {:.2}", scales.principal_axis_deg);
    assert!(scales.width_principal > scales.width_perpendicular);
    assert_eq!(scales.principal_axis_deg, last.theta_deg);
}

#[test]
fn growth_gives_up_at_the_iteration_budget() {
    let params = ScaleParams {
        window_seed_m: 100.0,
        max_iterations: 3,
        ..ScaleParams::default()
    };
    let report = scales_from_cumulant(&core_with_halo(), &params).unwrap();
    assert_eq!(report.outcome, SearchOutcome::IterationCap);
    assert_eq!(report.iterations.len(), 3);
    let windows: Vec<f64> = report.iterations.iter().map(|it| it.window_m).collect();
    assert!((windows[1] - 120.0).abs() < 1e-9 && (windows[2] - 144.0).abs() < 1e-9);
    assert!(report
        .iterations
        .iter()
        .all(|it| it.width_perpendicular > it.width_principal));
    assert!(report.scales.principal_axis_deg.is_nan());
    assert!(report.scales.width_principal.is_nan());
    assert!(report.scales.width_perpendicular.is_nan());
}

#[test]
fn nan_width_stops_the_search() {
    let report = scales_from_cumulant(&blob(300.0, 100.0, 0.0), &ScaleParams::default()).unwrap();
    assert_eq!(report.outcome, SearchOutcome::NanWidth);
    assert_eq!(report.iterations.len(), 1);
    assert!(report.scales.width_principal.is_nan());
    assert!(!report.scales.is_covariant);
}

#[test]
fn anti_correlated_cumulant_is_not_covariant() {
    let report = scales_from_cumulant(&blob(100.0, 300.0, -0.5), &ScaleParams::default()).unwrap();
    assert!(!report.scales.is_covariant);
    assert!((report.scales.principal_axis_deg - 90.0).abs() < 1e-6);
    assert!(report.scales.width_principal > report.scales.width_perpendicular);
}

#[test]
fn too_small_seed_window_is_an_error() {
    let params = ScaleParams {
        window_seed_m: 10.0,
        ..ScaleParams::default()
    };
    assert!(matches!(
        scales_from_cumulant(&blob(300.0, 100.0, 1.0), &params),
        Err(crate::error::CumulantError::InvalidWindow { window_cells: 0 })
    ));
}

#[test]
fn diagnostics_time_every_stage() {
    let values = Field2::from_fn(32, 32, |ix, iy| ((ix * 7 + iy * 3) % 5) as f64);
    let field = GridField::uniform(FieldMeta::new("q", "g/kg"), 50.0, 50.0, values).unwrap();
    let report = characteristic_scales_with_diagnostics(&field, None, None, &ScaleParams::default())
        .unwrap();
    let labels: Vec<&str> = report.timing.stages.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["cumulant", "axis_search"]);
    assert!(report.timing.total_ms >= 0.0);
}

#[test]
fn directional_profiles_sample_both_directions() {
    let values = Field2::from_fn(64, 64, |ix, iy| {
        let x = ix as f64 - 32.0;
        let y = iy as f64 - 32.0;
        (-(x / 6.0).powi(2) - (y / 2.0).powi(2)).exp()
    });
    let field = GridField::uniform(FieldMeta::new("q", "g/kg").with_z(200.0), 50.0, 50.0, values)
        .unwrap();
    let params = ScaleParams {
        sample_angle_deg: Some(0.0),
        profile_max_dist_m: 500.0,
        ..ScaleParams::default()
    };
    let profiles = directional_profiles(&field, None, None, &params).unwrap();
    assert_eq!(profiles.cumulant, "C(q,q)");
    assert_eq!(profiles.z, Some(200.0));
    assert_eq!(profiles.principal.len(), 19);
    assert_eq!(profiles.perpendicular.len(), 19);
    assert!(profiles.width_principal.value > profiles.width_perpendicular.value);
}
