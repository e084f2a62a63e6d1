//! I/O helpers for fields, masks and JSON reports.
//!
//! - `load_field_set`: read a JSON document of named fields into `GridField`s.
//! - `load_mask`: read a JSON boolean mask.
//! - `save_field_png`: write a `Field2` to a grayscale PNG for inspection.
//! - `write_json_file`: pretty-print a serializable value to disk.
//! - `select_field` / `stack_by_name`: pick fields out of a loaded set.
use super::{Field2, FieldMeta, FieldStack, GridField, Mask};
use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk form of one field. `values[j][i]` is the value at `(x[i], y[j])`.
#[derive(Debug, Deserialize)]
struct FieldRecord {
    name: String,
    #[serde(default)]
    long_name: Option<String>,
    #[serde(default)]
    units: String,
    x: Vec<f64>,
    y: Vec<f64>,
    #[serde(default)]
    z: Option<f64>,
    #[serde(default)]
    time: Option<f64>,
    values: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct FieldSetRecord {
    fields: Vec<FieldRecord>,
}

#[derive(Debug, Deserialize)]
struct MaskRecord {
    name: String,
    values: Vec<Vec<bool>>,
}

/// Load every field of a JSON field set.
pub fn load_field_set(path: &Path) -> Result<Vec<GridField>, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let set: FieldSetRecord = serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
    set.fields
        .into_iter()
        .map(|record| {
            let name = record.name.clone();
            field_from_record(record).map_err(|e| format!("Field `{name}` in {}: {e}", path.display()))
        })
        .collect()
}

fn field_from_record(record: FieldRecord) -> Result<GridField, String> {
    let h = record.values.len();
    let w = record.values.first().map_or(0, Vec::len);
    if record.values.iter().any(|row| row.len() != w) {
        return Err("ragged `values` rows".to_string());
    }
    let data = record.values.into_iter().flatten().collect();
    let values = Field2::from_vec(w, h, data).ok_or("inconsistent `values` shape")?;
    let meta = FieldMeta {
        name: record.name,
        long_name: record.long_name,
        units: record.units,
        z: record.z,
        time: record.time,
    };
    GridField::new(meta, record.x, record.y, values).map_err(|e| e.to_string())
}

/// Load a boolean mask stored as `{"name": ..., "values": [[true, ...], ...]}`.
pub fn load_mask(path: &Path) -> Result<Mask, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let record: MaskRecord = serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
    let h = record.values.len();
    let w = record.values.first().map_or(0, Vec::len);
    if record.values.iter().any(|row| row.len() != w) {
        return Err(format!("Mask {} has ragged rows", path.display()));
    }
    let flags = record.values.into_iter().flatten().collect();
    Mask::new(record.name, w, h, flags)
        .ok_or_else(|| format!("Mask {} has an inconsistent shape", path.display()))
}

/// Save a field to a grayscale PNG. Values are scaled symmetrically so that
/// zero maps to mid-gray and the largest magnitude to black/white.
pub fn save_field_png(field: &Field2, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let scale = field.max_abs();
    let scale = if scale > 0.0 { scale } else { 1.0 };
    let mut out = GrayImage::new(field.w as u32, field.h as u32);
    for iy in 0..field.h {
        // image rows run top-down, y runs bottom-up
        let py = (field.h - 1 - iy) as u32;
        for (ix, &v) in field.row(iy).iter().enumerate() {
            let g = if v.is_finite() {
                ((0.5 + 0.5 * v / scale) * 255.0).clamp(0.0, 255.0)
            } else {
                0.0
            };
            out.put_pixel(ix as u32, py, Luma([g as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

/// The field called `name`, at height `z` when given. Without `z` the name
/// must be unique in the set.
pub fn select_field<'a>(
    fields: &'a [GridField],
    name: &str,
    z: Option<f64>,
) -> Result<&'a GridField, String> {
    let mut matches = fields
        .iter()
        .filter(|f| f.meta.name == name && z.map_or(true, |z| f.meta.z == Some(z)));
    let first = matches.next().ok_or_else(|| match z {
        Some(z) => format!("No field `{name}` at z={z}"),
        None => format!("No field `{name}`"),
    })?;
    if matches.next().is_some() {
        return Err(format!("Field `{name}` is present at several levels, set `z`"));
    }
    Ok(first)
}

/// Every level of the field called `name`, ordered by height.
pub fn stack_by_name(fields: &[GridField], name: &str) -> Result<FieldStack, String> {
    let levels: Vec<GridField> = fields
        .iter()
        .filter(|f| f.meta.name == name)
        .cloned()
        .collect();
    if levels.is_empty() {
        return Err(format!("No field `{name}`"));
    }
    Ok(FieldStack::new(levels))
}
