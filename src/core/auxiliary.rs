//! Manually curated records merged into the map verbatim.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::error::{OmmError, Result, ResultExt};

/// One pre-shaped feature: `{"tags": {...}, "lat": 1.0, "lon": 2.0}`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AuxiliaryRecord {
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    pub lat: f64,
    pub lon: f64,
}

/// Parse a JSON array of auxiliary records
pub fn parse_auxiliary(content: &str) -> Result<Vec<AuxiliaryRecord>> {
    Ok(serde_json::from_str(content)?)
}

/// Load an auxiliary file; unreadable or malformed input is fatal
pub fn load_auxiliary(path: &Path) -> Result<Vec<AuxiliaryRecord>> {
    if !path.exists() {
        return Err(OmmError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_auxiliary(&content).context(format!("reading {}", path.display()))
}
