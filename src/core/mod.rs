//! Core module for Open Moon Map
//!
//! # Architecture
//!
//! - `models`: Entity references, coordinates, nodes, documents, configuration
//! - `error`: Error types using thiserror
//! - `extract`: Typed SPARQL rows and pattern-based field extraction
//! - `wikidata`: Item/property registries, tag mapper, query builders
//! - `property_index`: Numeric enrichment lookup (crater diameters)
//! - `assembler`: Deduplicating node assembly and auxiliary merging
//! - `auxiliary`: Manually curated input files
//! - `body`: Celestial body entity data
//! - `cache`: Response cache
//! - `client`: Wikidata HTTP client behind the `QueryService` trait
//! - `pipeline`: `build_map` orchestration

pub mod models;
pub mod error;
pub mod extract;
pub mod wikidata;
pub mod property_index;
pub mod assembler;
pub mod auxiliary;
pub mod body;
pub mod cache;
pub mod client;
pub mod pipeline;

// Re-export commonly used types
pub use models::{
    format_float, normalize_longitude, BoundingBox, Coordinate, CoordinateProfile, Document,
    EntityRef, MapConfig, Node,
};
pub use error::{ExtractError, OmmError, Result, ResultExt};
pub use extract::{parse_entity_ref, parse_point, FeatureRecord, RawRecord, SparqlResults};
pub use wikidata::{Item, Property, TagMapper};
pub use property_index::PropertyIndex;
pub use assembler::{Admission, Assembler, AssemblyStats};
pub use auxiliary::{load_auxiliary, parse_auxiliary, AuxiliaryRecord};
pub use body::CelestialBody;
pub use cache::{ByteCache, CacheKey, FileCache};
pub use client::{QueryService, WikidataClient};
pub use pipeline::{assemble, build_map};
