//! OSM XML writer
//!
//! Writes an OpenStreetMap 0.6 document to any `std::io::Write`. The
//! element and attribute names are fixed by the format; tag keys and
//! values are escaped so that an XML parser reads back the exact text.
//! Characters XML 1.0 cannot carry at all are dropped.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::core::error::OmmError;
use crate::core::models::{format_float, BoundingBox, Document, Node};

/// OSM API version written on the root element
pub const OSM_VERSION: &str = "0.6";

/// Error type for OSM writing operations
#[derive(Debug)]
pub enum OsmWriteError {
    Io(io::Error),
    InvalidState(String),
}

impl From<io::Error> for OsmWriteError {
    fn from(e: io::Error) -> Self {
        OsmWriteError::Io(e)
    }
}

impl std::fmt::Display for OsmWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsmWriteError::Io(e) => write!(f, "IO error: {}", e),
            OsmWriteError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for OsmWriteError {}

impl From<OsmWriteError> for OmmError {
    fn from(e: OsmWriteError) -> Self {
        match e {
            OsmWriteError::Io(io) => OmmError::Io(io),
            OsmWriteError::InvalidState(msg) => {
                OmmError::Io(io::Error::new(io::ErrorKind::Other, msg))
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, OsmWriteError>;

/// OSM document writer
pub struct OsmWriter<W: Write> {
    writer: W,
    in_document: bool,
}

impl<W: Write> OsmWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            in_document: false,
        }
    }

    /// Write the XML declaration, `<osm>` and `<bounds>`
    pub fn write_start(&mut self, bounds: &BoundingBox) -> Result<()> {
        writeln!(self.writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(self.writer, "<osm version=\"{}\">", OSM_VERSION)?;
        writeln!(
            self.writer,
            " <bounds minlat=\"{}\" minlon=\"{}\" maxlat=\"{}\" maxlon=\"{}\"/>",
            format_float(bounds.min_lat),
            format_float(bounds.min_lon),
            format_float(bounds.max_lat),
            format_float(bounds.max_lon),
        )?;
        self.in_document = true;
        Ok(())
    }

    /// Write one `<node>` with its `<tag>` children
    pub fn write_node(&mut self, node: &Node) -> Result<()> {
        if !self.in_document {
            return Err(OsmWriteError::InvalidState(
                "Must call write_start before write_node".to_string(),
            ));
        }

        writeln!(
            self.writer,
            " <node id=\"{}\" lat=\"{}\" lon=\"{}\">",
            node.id,
            format_float(node.coordinate.latitude),
            format_float(node.coordinate.longitude),
        )?;
        for (key, value) in &node.tags {
            writeln!(
                self.writer,
                "  <tag k=\"{}\" v=\"{}\"/>",
                escape_xml_attr(key),
                escape_xml_attr(value)
            )?;
        }
        writeln!(self.writer, " </node>")?;
        Ok(())
    }

    /// Write the closing `</osm>`
    pub fn write_end(&mut self) -> Result<()> {
        if !self.in_document {
            return Err(OsmWriteError::InvalidState(
                "write_end called without write_start".to_string(),
            ));
        }
        writeln!(self.writer, "</osm>")?;
        self.in_document = false;
        Ok(())
    }

    /// Write a complete document
    pub fn write_document(&mut self, document: &Document) -> Result<()> {
        self.write_start(&document.bounds)?;
        for node in &document.nodes {
            self.write_node(node)?;
        }
        self.write_end()?;
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Create `path` and write `document` to it
pub fn write_document_file(path: &Path, document: &Document) -> Result<()> {
    let file = File::create(path)?;
    OsmWriter::new(BufWriter::new(file)).write_document(document)
}

/// Render `document` to a string
pub fn document_to_string(document: &Document) -> Result<String> {
    let mut writer = OsmWriter::new(Vec::new());
    writer.write_document(document)?;
    String::from_utf8(writer.into_inner())
        .map_err(|e| OsmWriteError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Escape XML attribute values
///
/// Tab, newline and carriage return become character references, since a
/// parser normalizes them to spaces when they appear literally in an
/// attribute. Other C0 controls and U+FFFE/U+FFFF are not legal XML 1.0
/// characters and are dropped.
pub fn escape_xml_attr(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            c => escaped.push(c),
        }
    }
    escaped
}
