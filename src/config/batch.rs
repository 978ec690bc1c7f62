use super::load_json;
use crate::LgbphsParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct BatchToolConfig {
    pub inputs: Vec<PathBuf>,
    #[serde(default)]
    pub params: LgbphsParams,
    /// One `<image stem>.json` per input is written here.
    pub output_dir: PathBuf,
    /// Worker threads; `None` uses the rayon default.
    #[serde(default)]
    pub threads: Option<usize>,
}

pub fn load_config(path: &Path) -> Result<BatchToolConfig, String> {
    let config: BatchToolConfig = load_json(path)?;
    config
        .params
        .validate()
        .map_err(|e| format!("Invalid parameters in {}: {e}", path.display()))?;
    if config.threads == Some(0) {
        return Err(format!("threads must be positive in {}", path.display()));
    }
    Ok(config)
}
