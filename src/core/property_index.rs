//! Numeric property lookup used to enrich features (crater diameters).

use std::collections::HashMap;
use tracing::warn;

use crate::core::error::ExtractError;
use crate::core::extract::RawRecord;
use crate::core::models::EntityRef;

/// Item to scaled property value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyIndex {
    values: HashMap<EntityRef, f64>,
    /// Rows dropped because `item` or the value did not parse, or the
    /// scaled value is not finite
    skipped: usize,
}

impl PropertyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from rows carrying `item` and `field`, multiplying each value
    /// by `scale`. A repeated item keeps its last value.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a RawRecord>,
        field: &'static str,
        scale: f64,
    ) -> Self {
        let mut index = Self::new();
        for record in records {
            let scaled = record.number(field).and_then(|value| {
                let scaled = value * scale;
                if scaled.is_finite() {
                    Ok(scaled)
                } else {
                    Err(ExtractError::MalformedNumber(format!("{} x {}", value, scale)))
                }
            });
            match (record.entity("item"), scaled) {
                (Ok(item), Ok(value)) => index.insert(item, value),
                (Err(e), _) | (_, Err(e)) => {
                    warn!(error = %e, field, "Skipping property row");
                    index.skipped += 1;
                }
            }
        }
        index
    }

    pub fn insert(&mut self, item: EntityRef, value: f64) {
        self.values.insert(item, value);
    }

    pub fn get(&self, item: EntityRef) -> Option<f64> {
        self.values.get(&item).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
