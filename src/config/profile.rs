use crate::profile::DEFAULT_Z_MAX;
use crate::scales::ScaleParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration of `height_profile`.
#[derive(Debug, Deserialize)]
pub struct ProfileToolConfig {
    pub input: PathBuf,
    /// Pairs `v1:v2` separated by commas.
    pub cumulants: String,
    #[serde(default = "default_z_max")]
    pub z_max: f64,
    /// Mask shared by every level.
    #[serde(default)]
    pub mask: Option<PathBuf>,
    #[serde(default)]
    pub params: ScaleParams,
    pub output_json: PathBuf,
}

fn default_z_max() -> f64 {
    DEFAULT_Z_MAX
}

pub fn load_config(path: &Path) -> Result<ProfileToolConfig, String> {
    super::read_config(path)
}
