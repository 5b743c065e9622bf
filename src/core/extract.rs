//! Record extraction
//!
//! Turns SPARQL JSON result rows into typed records. The input shape is
//! fixed by the query service, so extraction is a handful of anchored
//! patterns rather than a general parser.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

use crate::core::error::ExtractError;
use crate::core::models::{Coordinate, EntityRef};

lazy_static! {
    static ref ITEM_PATTERN: Regex =
        Regex::new(r"^https?://www\.wikidata\.org/entity/Q(?P<id>[0-9]+)$").unwrap();

    // Literals on bodies other than Earth carry the globe IRI in front.
    static ref POINT_PATTERN: Regex = Regex::new(
        r"^(?:<https?://www\.wikidata\.org/entity/Q[0-9]+> )?Point\((?P<longitude>[^ ()]+) (?P<latitude>[^ ()]+)\)$"
    )
    .unwrap();
}

/// Top-level SPARQL JSON results document
#[derive(Debug, Clone, Deserialize)]
pub struct SparqlResults {
    pub results: ResultSet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultSet {
    pub bindings: Vec<RawRecord>,
}

impl SparqlResults {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn rows(&self) -> &[RawRecord] {
        &self.results.bindings
    }
}

/// One bound value in a result row
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BindingValue {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub value: String,
}

/// One result row: variable name to bound value
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct RawRecord(pub HashMap<String, BindingValue>);

impl RawRecord {
    /// Build a row from `(variable, value)` pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        RawRecord(
            pairs
                .into_iter()
                .map(|(k, v)| {
                    (
                        k.to_string(),
                        BindingValue {
                            kind: None,
                            value: v.to_string(),
                        },
                    )
                })
                .collect(),
        )
    }

    /// Raw string value of a variable
    pub fn value(&self, field: &'static str) -> Result<&str, ExtractError> {
        self.0
            .get(field)
            .map(|binding| binding.value.as_str())
            .ok_or(ExtractError::MissingField(field))
    }

    pub fn entity(&self, field: &'static str) -> Result<EntityRef, ExtractError> {
        parse_entity_ref(self.value(field)?)
    }

    pub fn number(&self, field: &'static str) -> Result<f64, ExtractError> {
        let text = self.value(field)?;
        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ExtractError::MalformedNumber(text.to_string())),
        }
    }
}

/// Typed primary row: a feature located on the body
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub item: EntityRef,
    /// As found in the literal, before normalization
    pub coordinate: Coordinate,
    pub classification: EntityRef,
    pub label: String,
}

impl FeatureRecord {
    /// Extract from a row of the object query
    pub fn from_raw(record: &RawRecord) -> Result<Self, ExtractError> {
        Ok(Self {
            item: record.entity("item")?,
            coordinate: parse_point(record.value("geo")?)?,
            classification: record.entity("type")?,
            label: record.value("itemLabel")?.to_string(),
        })
    }
}

/// Parse `http://www.wikidata.org/entity/Q<n>` into `EntityRef(n)`.
///
/// The id must be a positive integer.
pub fn parse_entity_ref(iri: &str) -> Result<EntityRef, ExtractError> {
    let malformed = || ExtractError::MalformedEntity(iri.to_string());
    let caps = ITEM_PATTERN.captures(iri).ok_or_else(malformed)?;
    let id: u64 = caps["id"].parse().map_err(|_| malformed())?;
    if id == 0 {
        return Err(malformed());
    }
    Ok(EntityRef(id))
}

/// Parse a WKT `Point(lon lat)` literal, optionally prefixed with a globe IRI.
pub fn parse_point(literal: &str) -> Result<Coordinate, ExtractError> {
    let malformed = || ExtractError::MalformedPoint(literal.to_string());
    let caps = POINT_PATTERN.captures(literal).ok_or_else(malformed)?;
    let longitude: f64 = caps["longitude"].parse().map_err(|_| malformed())?;
    let latitude: f64 = caps["latitude"].parse().map_err(|_| malformed())?;
    if !longitude.is_finite() || !latitude.is_finite() {
        return Err(malformed());
    }
    Ok(Coordinate::new(latitude, longitude))
}
