use crate::scales::ScaleParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration of `cumulant_scales`.
#[derive(Debug, Deserialize)]
pub struct ScalesToolConfig {
    /// JSON field set to read.
    pub input: PathBuf,
    pub field1: String,
    /// Second variable; autocorrelation of `field1` when absent.
    #[serde(default)]
    pub field2: Option<String>,
    /// Level to analyse when the set holds several heights.
    #[serde(default)]
    pub z: Option<f64>,
    #[serde(default)]
    pub mask: Option<PathBuf>,
    #[serde(default)]
    pub params: ScaleParams,
    #[serde(default)]
    pub output: ScalesOutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScalesOutputConfig {
    /// Report with the scales, the window-growth trace and timings.
    pub json_out: Option<PathBuf>,
    /// Directory receiving `cumulant.png` (central window) and
    /// `profiles.json` (line profiles along and across the axis).
    pub debug_dir: Option<PathBuf>,
    /// Side length in cells of the cumulant window written to the PNG.
    pub debug_window_cells: Option<usize>,
}

pub fn load_config(path: &Path) -> Result<ScalesToolConfig, String> {
    super::read_config(path)
}
