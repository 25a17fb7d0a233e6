//! Runtime configuration for the `gel_analyze` binary (JSON file).

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Where to write the JSON report; stdout summary only when absent.
    pub json_out: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct RuntimeConfig {
    /// Gel image to analyze.
    pub input_path: PathBuf,
    /// Expected lane count; detected from gap peaks when absent.
    #[serde(default)]
    pub num_lanes: Option<usize>,
    /// Lane id of the reference ladder, if one was loaded.
    #[serde(default)]
    pub ladder_lane: Option<u32>,
    /// Pair of lane ids to compare.
    #[serde(default)]
    pub compare_lanes: Option<(u32, u32)>,
    /// Maximum row distance for two bands to count as the same fragment.
    #[serde(default = "default_tolerance")]
    pub tolerance_pixels: usize,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_tolerance() -> usize {
    10
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
