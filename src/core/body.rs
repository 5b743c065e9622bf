//! The astronomical body a map is built for, read from its Wikidata
//! entity data document.

use serde::Deserialize;
use std::collections::HashMap;

use crate::core::error::{OmmError, Result};
use crate::core::models::EntityRef;
use crate::core::wikidata::{Item, Property};

#[derive(Debug, Deserialize)]
struct EntityDocument {
    entities: HashMap<String, Entity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Entity {
    #[serde(default)]
    labels: HashMap<String, Label>,
    #[serde(default)]
    claims: HashMap<String, Vec<Claim>>,
}

#[derive(Debug, Clone, Deserialize)]
struct Label {
    value: String,
}

#[derive(Debug, Clone, Deserialize)]
struct Claim {
    mainsnak: Snak,
    #[serde(default)]
    qualifiers: HashMap<String, Vec<Snak>>,
}

#[derive(Debug, Clone, Deserialize)]
struct Snak {
    #[serde(default)]
    datavalue: Option<DataValue>,
}

#[derive(Debug, Clone, Deserialize)]
struct DataValue {
    value: serde_json::Value,
}

impl Snak {
    /// `amount` of a quantity value (`"+1737.4"`)
    fn amount(&self) -> Option<f64> {
        self.datavalue
            .as_ref()?
            .value
            .get("amount")?
            .as_str()?
            .parse()
            .ok()
    }

    /// `numeric-id` of an item value
    fn numeric_id(&self) -> Option<u64> {
        self.datavalue.as_ref()?.value.get("numeric-id")?.as_u64()
    }
}

/// Labels and claims of a celestial body
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub entity: EntityRef,
    entity_data: Entity,
}

impl CelestialBody {
    /// Decode `Special:EntityData/Q<n>.json`
    pub fn from_slice(entity: EntityRef, bytes: &[u8]) -> Result<Self> {
        let mut document: EntityDocument = serde_json::from_slice(bytes)?;
        let entity_data = document
            .entities
            .remove(&entity.to_string())
            .ok_or_else(|| OmmError::EntityNotFound {
                entity: entity.to_string(),
            })?;
        Ok(Self {
            entity,
            entity_data,
        })
    }

    /// Label in `language`, if the entity has one
    pub fn label(&self, language: &str) -> Option<&str> {
        self.entity_data
            .labels
            .get(language)
            .map(|label| label.value.as_str())
    }

    /// Equatorial radius in metres.
    ///
    /// Prefers the radius claim qualified as applying to the equator, falls
    /// back to the last radius claim, and is 0 when the body has none.
    pub fn equator_radius(&self) -> f64 {
        let Some(claims) = self.entity_data.claims.get(&Property::Radius.to_string()) else {
            return 0.0;
        };

        let mut radius = 0.0;
        for claim in claims {
            radius = claim.mainsnak.amount().unwrap_or(0.0) * 1000.0;
            let applies_to_equator = claim
                .qualifiers
                .get(&Property::AppliesToPart.to_string())
                .and_then(|parts| parts.first())
                .and_then(Snak::numeric_id)
                == Some(Item::Equator.id());
            if applies_to_equator {
                return radius;
            }
        }
        radius
    }
}
