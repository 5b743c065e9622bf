//! Output format modules for Open Moon Map
//!
//! Formatters write through the `std::io::Write` trait; only the file
//! helper touches the filesystem.

pub mod osm_writer;

pub use osm_writer::{
    document_to_string, write_document_file, OsmWriteError, OsmWriter, OSM_VERSION,
};
