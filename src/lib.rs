//! Open Moon Map - OpenStreetMap data for astronomical bodies
//!
//! This library turns Wikidata knowledge about features on an astronomical
//! body (craters, volcanoes, mountains, landing sites) into an OSM XML file
//! that ordinary OpenStreetMap renderers can draw.
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file): Pure logic, no CLI concerns
//! - **bin/omm.rs**: Thin wrapper that parses arguments, sets up logging
//!   and calls [`build_map`]
//!
//! The pipeline flows one way: cached response bytes, typed rows,
//! tagged nodes, merged node list, OSM document.

pub mod core;
pub mod formats;

pub use crate::core::{
    assemble, build_map, AssemblyStats, AuxiliaryRecord, ByteCache, Coordinate, Document,
    EntityRef, FileCache, MapConfig, Node, OmmError, QueryService, Result, WikidataClient,
};
pub use crate::formats::{document_to_string, write_document_file, OsmWriter};

/// Crate version, also sent in the User-Agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
