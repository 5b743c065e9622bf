//! Core data models for Open Moon Map
//!
//! This module contains the fundamental data structures used throughout the
//! pipeline: entity references, coordinates, nodes and the final document,
//! plus the run configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::error::{OmmError, Result};

/// Wikidata item identifier (the numeric part of `Q<n>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityRef(pub u64);

impl EntityRef {
    /// Numeric id without the `Q` prefix
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// A point on the body surface in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Bring longitude into [-180, 180] and reject anything outside the
    /// profile. Longitudes above 180 are shifted by one turn; nothing is
    /// clamped.
    pub fn normalized(self, profile: &CoordinateProfile) -> Option<Coordinate> {
        if !(-profile.max_latitude..=profile.max_latitude).contains(&self.latitude) {
            return None;
        }
        let longitude = normalize_longitude(self.longitude);
        if !(-profile.max_longitude..=profile.max_longitude).contains(&longitude) {
            return None;
        }
        Some(Coordinate::new(self.latitude, longitude))
    }
}

/// Shift longitudes in (180, 360) into (-180, 0).
///
/// Values at or below -180 are left alone and fail the later range check.
pub fn normalize_longitude(longitude: f64) -> f64 {
    if longitude > 180.0 {
        longitude - 360.0
    } else {
        longitude
    }
}

/// Accepted coordinate envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateProfile {
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl Default for CoordinateProfile {
    fn default() -> Self {
        Self {
            max_latitude: DEFAULT_MAX_LATITUDE,
            max_longitude: 180.0,
        }
    }
}

impl CoordinateProfile {
    /// The `<bounds>` envelope matching this profile
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            min_lat: -self.max_latitude,
            min_lon: -self.max_longitude,
            max_lat: self.max_latitude,
            max_lon: self.max_longitude,
        }
    }
}

/// Document envelope written as `<bounds>`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

/// A single OSM node
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// 1-based id in emission order
    pub id: u64,
    pub coordinate: Coordinate,
    pub tags: BTreeMap<String, String>,
}

/// The complete OSM document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub bounds: BoundingBox,
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            nodes: Vec::new(),
        }
    }
}

/// Render a float with its shortest round-trip digits and at least one
/// fractional digit (`7.0`, `176.5`, `93000.0`).
pub fn format_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Latitude limit of the default profile
pub const DEFAULT_MAX_LATITUDE: f64 = 80.0;

/// Kilometre to metre factor applied to diameter values
pub const DEFAULT_DIAMETER_SCALE: f64 = 1000.0;

/// Run configuration, loadable from a JSON file
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// Label language used for `name:<lang>` and the label service
    pub language: String,
    /// Latitude limit in degrees
    pub max_latitude: f64,
    /// Factor applied to enrichment values
    pub diameter_scale: f64,
    /// Directory holding cached responses
    pub cache_dir: PathBuf,
    /// SPARQL endpoint URL
    pub sparql_endpoint: String,
    /// Entity data URL prefix (`Q<n>.json` is appended)
    pub entity_endpoint: String,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            max_latitude: DEFAULT_MAX_LATITUDE,
            diameter_scale: DEFAULT_DIAMETER_SCALE,
            cache_dir: PathBuf::from("cache"),
            sparql_endpoint: "https://query.wikidata.org/sparql".to_string(),
            entity_endpoint: "https://www.wikidata.org/wiki/Special:EntityData/".to_string(),
            user_agent: format!("OpenMoonMap/{}", crate::VERSION),
            timeout_secs: 60,
        }
    }
}

impl MapConfig {
    /// Load configuration from a JSON file; missing keys take defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OmmError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: MapConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.max_latitude > 0.0 && self.max_latitude <= 90.0) {
            return Err(OmmError::invalid_config(format!(
                "max_latitude must be in (0, 90], got {}",
                self.max_latitude
            )));
        }
        if self.language.is_empty() {
            return Err(OmmError::invalid_config("language must not be empty"));
        }
        Ok(())
    }

    pub fn profile(&self) -> CoordinateProfile {
        CoordinateProfile {
            max_latitude: self.max_latitude,
            ..CoordinateProfile::default()
        }
    }
}
