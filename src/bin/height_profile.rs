use cumulant_scales::config::profile::load_config;
use cumulant_scales::field::io::{load_field_set, load_mask, stack_by_name, write_json_file};
use cumulant_scales::profile::{height_profile, parse_cumulant_pairs, MaskSource};
use cumulant_scales::scales::CharacteristicScales;
use serde::Serialize;
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

    let pairs = parse_cumulant_pairs(&config.cumulants)?;
    let fields = load_field_set(&config.input)?;
    let mask = config
        .mask
        .as_deref()
        .map(load_mask)
        .transpose()?
        .map(MaskSource::Shared);

    let mut profiles = Vec::with_capacity(pairs.len());
    for pair in &pairs {
        let stack1 = stack_by_name(&fields, &pair.first)?;
        let stack2 = if pair.is_auto() {
            None
        } else {
            Some(stack_by_name(&fields, &pair.second)?)
        };
        let levels = height_profile(
            &stack1,
            stack2.as_ref(),
            mask.as_ref(),
            &config.params,
            config.z_max,
        )
        .map_err(|e| format!("{pair}: {e}"))?;
        println!("{pair}: {} level(s) up to z={} m", levels.len(), config.z_max);
        for scales in &levels {
            println!(
                "  z={:>8}  theta={:>6.1} deg  widths=({:.1} m, {:.1} m)",
                scales.z.map_or_else(|| "-".to_string(), |z| format!("{z:.1}")),
                scales.principal_axis_deg,
                scales.width_principal,
                scales.width_perpendicular
            );
        }
        profiles.push(CumulantProfile {
            cumulant: pair.to_string(),
            levels,
        });
    }

    write_json_file(&config.output_json, &profiles)?;
    println!(
        "Saved {} profile(s) to {}",
        profiles.len(),
        config.output_json.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: height_profile <config.json>".to_string()
}

#[derive(Debug, Serialize)]
struct CumulantProfile {
    cumulant: String,
    levels: Vec<CharacteristicScales>,
}
