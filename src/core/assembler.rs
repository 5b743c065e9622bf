//! Deduplicating assembly of OSM nodes
//!
//! The assembler walks primary SPARQL rows in response order, drops
//! malformed, duplicate and out-of-range rows, tags the rest and numbers
//! them. Auxiliary records are appended afterwards and continue the same
//! id sequence.

use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::core::auxiliary::AuxiliaryRecord;
use crate::core::extract::{FeatureRecord, RawRecord};
use crate::core::models::{format_float, Coordinate, CoordinateProfile, Document, EntityRef, Node};
use crate::core::property_index::PropertyIndex;
use crate::core::wikidata::TagMapper;

/// Counters for one assembly run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    pub accepted: usize,
    pub malformed: usize,
    pub duplicates: usize,
    pub out_of_range: usize,
    pub auxiliary: usize,
}

impl AssemblyStats {
    pub fn total_nodes(&self) -> usize {
        self.accepted + self.auxiliary
    }
}

/// Outcome of offering one primary row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted(u64),
    Malformed,
    Duplicate,
    OutOfRange,
}

/// Builds the node list for a single run
pub struct Assembler<'a> {
    mapper: TagMapper,
    index: &'a PropertyIndex,
    profile: CoordinateProfile,
    language: String,
    seen: HashSet<EntityRef>,
    nodes: Vec<Node>,
    next_id: u64,
    stats: AssemblyStats,
}

impl<'a> Assembler<'a> {
    pub fn new(
        mapper: TagMapper,
        index: &'a PropertyIndex,
        profile: CoordinateProfile,
        language: impl Into<String>,
    ) -> Self {
        Self {
            mapper,
            index,
            profile,
            language: language.into(),
            seen: HashSet::new(),
            nodes: Vec::new(),
            next_id: 1,
            stats: AssemblyStats::default(),
        }
    }

    /// Offer every primary row in order
    pub fn add_primary<'r>(&mut self, records: impl IntoIterator<Item = &'r RawRecord>) {
        for record in records {
            self.add_record(record);
        }
    }

    /// Offer one primary row
    pub fn add_record(&mut self, record: &RawRecord) -> Admission {
        let feature = match FeatureRecord::from_raw(record) {
            Ok(feature) => feature,
            Err(e) => {
                debug!(error = %e, "Skipping malformed record");
                self.stats.malformed += 1;
                return Admission::Malformed;
            }
        };
        self.add_feature(feature)
    }

    /// Offer one already extracted feature
    pub fn add_feature(&mut self, feature: FeatureRecord) -> Admission {
        if self.seen.contains(&feature.item) {
            self.stats.duplicates += 1;
            return Admission::Duplicate;
        }

        let Some(coordinate) = feature.coordinate.normalized(&self.profile) else {
            debug!(item = %feature.item, latitude = feature.coordinate.latitude,
                longitude = feature.coordinate.longitude, "Skipping out-of-range record");
            self.stats.out_of_range += 1;
            return Admission::OutOfRange;
        };

        let tags = self.feature_tags(&feature);
        let id = self.push(coordinate, tags);
        self.seen.insert(feature.item);
        self.stats.accepted += 1;
        Admission::Accepted(id)
    }

    fn feature_tags(&self, feature: &FeatureRecord) -> BTreeMap<String, String> {
        let mut tags = BTreeMap::new();
        tags.insert("wikidata".to_string(), feature.item.to_string());
        tags.insert("name".to_string(), feature.label.clone());
        tags.insert(format!("name:{}", self.language), feature.label.clone());
        tags.extend(self.mapper.tags(feature.classification));
        if let Some(diameter) = self.index.get(feature.item) {
            tags.insert("diameter".to_string(), format_float(diameter));
        }
        tags
    }

    /// Append auxiliary records as-is, continuing the id sequence
    pub fn merge_auxiliary<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = AuxiliaryRecord>,
    {
        for record in records {
            self.push(Coordinate::new(record.lat, record.lon), record.tags);
            self.stats.auxiliary += 1;
        }
    }

    fn push(&mut self, coordinate: Coordinate, tags: BTreeMap<String, String>) -> u64 {
        let id = self.next_id;
        self.nodes.push(Node {
            id,
            coordinate,
            tags,
        });
        self.next_id += 1;
        id
    }

    pub fn stats(&self) -> AssemblyStats {
        self.stats
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Finish the run, producing the document and counters
    pub fn finish(self) -> (Document, AssemblyStats) {
        let document = Document {
            bounds: self.profile.bounding_box(),
            nodes: self.nodes,
        };
        (document, self.stats)
    }
}
