//! Wikidata vocabulary: item and property registries, the classification
//! to OSM tag table, and SPARQL query builders.

use std::collections::BTreeMap;
use std::fmt;

use crate::core::models::EntityRef;

/// Wikidata items the pipeline refers to by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item {
    Mars,
    Moon,
    Volcano,
    Mountain,
    Equator,
    ImpactCrater,
    Mons,
    Sculpture,
    LunarCrater,
    Crater,
    Monument,
    SatelliteCrater,
}

impl Item {
    /// Numeric Wikidata id
    pub const fn id(self) -> u64 {
        match self {
            Item::Mars => 111,
            Item::Moon => 405,
            Item::Volcano => 8072,
            Item::Mountain => 8502,
            Item::Equator => 23538,
            Item::ImpactCrater => 55818,
            Item::Mons => 429088,
            Item::Sculpture => 860861,
            Item::LunarCrater => 1348589,
            Item::Crater => 3240715,
            Item::Monument => 4989906,
            Item::SatelliteCrater => 101142982,
        }
    }

    pub const fn entity(self) -> EntityRef {
        EntityRef(self.id())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.id())
    }
}

/// Wikidata properties used in queries and entity documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    InstanceOf,
    SubclassOf,
    LocatedOnAstronomicalBody,
    AppliesToPart,
    CoordinateLocation,
    Radius,
    Diameter,
}

impl Property {
    pub const fn id(self) -> u64 {
        match self {
            Property::InstanceOf => 31,
            Property::SubclassOf => 279,
            Property::LocatedOnAstronomicalBody => 376,
            Property::AppliesToPart => 518,
            Property::CoordinateLocation => 625,
            Property::Radius => 2120,
            Property::Diameter => 2386,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.id())
    }
}

// =============================================================================
// Tag Mapper
// =============================================================================

/// One row of the classification table
#[derive(Debug, Clone, Copy)]
pub struct TagRule {
    pub classes: &'static [Item],
    pub tags: &'static [(&'static str, &'static str)],
}

/// Default classification table, checked top to bottom
pub const DEFAULT_TAG_RULES: &[TagRule] = &[
    TagRule {
        classes: &[Item::Volcano],
        tags: &[("natural", "volcano")],
    },
    TagRule {
        classes: &[
            Item::Crater,
            Item::SatelliteCrater,
            Item::LunarCrater,
            Item::ImpactCrater,
        ],
        tags: &[("natural", "crater")],
    },
    TagRule {
        classes: &[Item::Mountain, Item::Mons],
        tags: &[("natural", "peak")],
    },
    TagRule {
        classes: &[Item::Monument],
        tags: &[("historic", "monument")],
    },
    TagRule {
        classes: &[Item::Sculpture],
        tags: &[("tourism", "artwork"), ("artwork_type", "sculpture")],
    },
];

/// Maps a classification item to OSM tags
///
/// Total: unknown classifications yield an empty map.
#[derive(Debug, Clone, Copy)]
pub struct TagMapper {
    rules: &'static [TagRule],
}

impl Default for TagMapper {
    fn default() -> Self {
        Self::new(DEFAULT_TAG_RULES)
    }
}

impl TagMapper {
    pub fn new(rules: &'static [TagRule]) -> Self {
        Self { rules }
    }

    /// Tags for the first rule listing `classification`
    pub fn tags(&self, classification: EntityRef) -> BTreeMap<String, String> {
        self.rules
            .iter()
            .find(|rule| rule.classes.iter().any(|item| item.entity() == classification))
            .map(|rule| {
                rule.tags
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

// =============================================================================
// Query builders
// =============================================================================

/// Every item on `body` with coordinates, its type and its label.
///
/// Response fields: `item`, `itemLabel`, `geo`, `type`.
pub fn object_query(body: EntityRef, language: &str) -> String {
    format!(
        "SELECT ?item ?geo ?type ?itemLabel\n\
         WHERE {{\n    \
             ?item wdt:{located} wd:{body};\n          \
                   wdt:{coordinates} ?geo;\n          \
                   wdt:{instance} ?type.\n    \
             SERVICE wikibase:label {{ bd:serviceParam wikibase:language \"{language}\". }}\n\
         }}",
        located = Property::LocatedOnAstronomicalBody,
        body = body,
        coordinates = Property::CoordinateLocation,
        instance = Property::InstanceOf,
        language = language,
    )
}

/// `property` of every item on `body` that is (transitively) an instance
/// of `instance_of`, bound to `?{field}`.
pub fn object_property_query(
    body: EntityRef,
    instance_of: Item,
    property: Property,
    field: &str,
) -> String {
    format!(
        "SELECT ?item ?{field}\n\
         WHERE {{\n    \
             ?item wdt:{located} wd:{body};\n          \
                   wdt:{instance}/wdt:{subclass}* wd:{class};\n          \
                   wdt:{property} ?{field};\n          \
                   wdt:{coordinates} ?geo.\n\
         }}",
        field = field,
        located = Property::LocatedOnAstronomicalBody,
        body = body,
        instance = Property::InstanceOf,
        subclass = Property::SubclassOf,
        class = instance_of,
        property = property,
        coordinates = Property::CoordinateLocation,
    )
}
