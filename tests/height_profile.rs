mod common;

use common::synthetic_field::{gaussian_blob, random_field};
use cumulant_scales::field::io::{load_field_set, stack_by_name, write_json_file};
use cumulant_scales::profile::{height_profile, parse_cumulant_pairs, MaskSource};
use cumulant_scales::{FieldStack, GridField, Mask, ScaleParams};
use serde_json::json;
use std::path::PathBuf;

fn at_height(mut field: GridField, name: &str, z: f64) -> GridField {
    field.meta.name = name.to_string();
    field.meta.z = Some(z);
    field
}

fn to_record(field: &GridField) -> serde_json::Value {
    let values: Vec<Vec<f64>> = (0..field.values().h)
        .map(|iy| field.values().row(iy).to_vec())
        .collect();
    json!({
        "name": field.meta.name,
        "units": field.meta.units,
        "z": field.meta.z,
        "x": field.x(),
        "y": field.y(),
        "values": values,
    })
}

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("cumulant-scales-{}", std::process::id()))
        .join(name)
}

#[test]
fn profile_from_json_field_set() {
    let _ = env_logger::builder().is_test(true).try_init();
    let heights = [300.0, 100.0, 900.0, 500.0];
    let mut fields = Vec::new();
    for (i, &z) in heights.iter().enumerate() {
        let stretch = 200.0 + 50.0 * i as f64;
        fields.push(at_height(gaussian_blob(64, 50.0, stretch, 80.0, 0.0), "w", z));
        fields.push(at_height(random_field("q", 64, 50.0, i as u64), "q", z));
    }
    let path = scratch_file("fields.json");
    let records: Vec<serde_json::Value> = fields.iter().map(to_record).collect();
    write_json_file(&path, &json!({ "fields": records })).unwrap();

    let loaded = load_field_set(&path).unwrap();
    assert_eq!(loaded.len(), fields.len());

    let pairs = parse_cumulant_pairs("w:w,w:q,w:w").unwrap();
    assert_eq!(pairs.len(), 2);

    let w = stack_by_name(&loaded, "w").unwrap();
    let q = stack_by_name(&loaded, "q").unwrap();
    let params = ScaleParams::default();

    let auto = height_profile(&w, None, None, &params, 700.0).unwrap();
    let z: Vec<Option<f64>> = auto.iter().map(|s| s.z).collect();
    assert_eq!(z, vec![Some(100.0), Some(300.0), Some(500.0)]);
    for scales in &auto {
        assert_eq!(scales.cumulant, "C(w,w)");
        assert!(scales.principal_axis_deg.abs() < 5.0 || scales.principal_axis_deg > 175.0);
        assert!(scales.width_principal > scales.width_perpendicular);
    }

    let cross = height_profile(&w, Some(&q), None, &params, 700.0).unwrap();
    assert_eq!(cross.len(), 3);
    assert!(cross.iter().all(|s| s.cumulant == "C(w,q)"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn per_level_masks_follow_level_order() {
    let levels: Vec<GridField> = [200.0, 100.0]
        .iter()
        .map(|&z| at_height(gaussian_blob(48, 50.0, 250.0, 100.0, 0.0), "w", z))
        .collect();
    let stack = FieldStack::new(levels);
    let keep_all = Mask::from_fn("all", 48, 48, |_, _| true);
    let keep_none = Mask::from_fn("none", 48, 48, |_, _| false);

    // lowest level first
    let masks = MaskSource::PerLevel(vec![keep_none, keep_all]);
    let profile = height_profile(&stack, None, Some(&masks), &ScaleParams::default(), 1000.0)
        .unwrap();
    assert_eq!(profile[0].z, Some(100.0));
    assert!(profile[0].width_principal.is_nan());
    assert!(profile[1].width_principal.is_finite());
}
