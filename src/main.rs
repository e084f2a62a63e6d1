use cumulant_scales::config::scales::load_config;
use cumulant_scales::cumulant::compute_cumulant;
use cumulant_scales::field::io::{
    load_field_set, load_mask, save_field_png, select_field, write_json_file,
};
use cumulant_scales::scales::{
    characteristic_scales_with_diagnostics, directional_profiles, ScaleReport,
};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let fields = load_field_set(&config.input)?;
    let field1 = select_field(&fields, &config.field1, config.z)?;
    let field2 = config
        .field2
        .as_deref()
        .map(|name| select_field(&fields, name, config.z))
        .transpose()?;
    let mask = config.mask.as_deref().map(load_mask).transpose()?;

    let report =
        characteristic_scales_with_diagnostics(field1, field2, mask.as_ref(), &config.params)?;
    print_summary(&report);

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report)?;
        println!("Saved report to {}", path.display());
    }

    if let Some(dir) = &config.output.debug_dir {
        let cumulant = compute_cumulant(field1, field2, mask.as_ref(), config.params.backend)?;
        let cells = config
            .output
            .debug_window_cells
            .unwrap_or(config.params.axis_window_cells);
        let (xs, ys) = cumulant.window(cells);
        let window = cumulant.values().crop(xs.start, xs.end, ys.start, ys.end);
        let png_path = dir.join("cumulant.png");
        save_field_png(&window, &png_path)?;

        let profiles = directional_profiles(field1, field2, mask.as_ref(), &config.params)?;
        let profiles_path = dir.join("profiles.json");
        write_json_file(&profiles_path, &profiles)?;
        println!(
            "Saved {}x{} cumulant window to {} and line profiles to {}",
            window.w,
            window.h,
            png_path.display(),
            profiles_path.display()
        );
    }

    Ok(())
}

fn print_summary(report: &ScaleReport) {
    let scales = &report.scales;
    match scales.z {
        Some(z) => println!("{} at z={z} m [{}]", scales.cumulant, scales.method),
        None => println!("{} [{}]", scales.cumulant, scales.method),
    }
    println!("  principal axis:    {:.1} deg", scales.principal_axis_deg);
    println!("  width along axis:  {:.1} m", scales.width_principal);
    println!("  width across axis: {:.1} m", scales.width_perpendicular);
    println!("  covariant:         {}", scales.is_covariant);
    println!(
        "  search:            {:?} after {} iteration(s), {:.2} ms",
        report.outcome,
        report.iterations.len(),
        report.timing.total_ms
    );
}

fn usage() -> String {
    "Usage: cumulant_scales <config.json>".to_string()
}
