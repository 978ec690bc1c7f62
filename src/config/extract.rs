use super::load_json;
use crate::LgbphsParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ExtractToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub params: LgbphsParams,
    pub output: ExtractOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct ExtractOutputConfig {
    /// Features and a run summary are written here as JSON.
    pub features_json: PathBuf,
    /// If set, magnitude (and phase) planes are saved as PNGs for inspection.
    #[serde(default)]
    pub debug_dir: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ExtractToolConfig, String> {
    let config: ExtractToolConfig = load_json(path)?;
    config
        .params
        .validate()
        .map_err(|e| format!("Invalid parameters in {}: {e}", path.display()))?;
    Ok(config)
}
