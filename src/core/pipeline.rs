//! Map building pipeline
//!
//! `build_map` fetches (or reuses) the three Wikidata responses for a body,
//! assembles the node list, merges auxiliary files and writes the OSM
//! document in one go.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::assembler::{Assembler, AssemblyStats};
use crate::core::auxiliary::{load_auxiliary, AuxiliaryRecord};
use crate::core::body::CelestialBody;
use crate::core::cache::{ByteCache, CacheKey};
use crate::core::client::QueryService;
use crate::core::error::{OmmError, Result, ResultExt};
use crate::core::extract::SparqlResults;
use crate::core::models::{Document, EntityRef, MapConfig};
use crate::core::property_index::PropertyIndex;
use crate::core::wikidata::{object_property_query, object_query, Item, Property, TagMapper};
use crate::formats::write_document_file;

/// SPARQL variable carrying crater diameters
pub const DIAMETER_FIELD: &str = "diameter";

/// Assemble a document from already decoded inputs
pub fn assemble(
    objects: &SparqlResults,
    index: &PropertyIndex,
    auxiliary: Vec<Vec<AuxiliaryRecord>>,
    config: &MapConfig,
) -> (Document, AssemblyStats) {
    let mut assembler = Assembler::new(
        TagMapper::default(),
        index,
        config.profile(),
        config.language.clone(),
    );
    assembler.add_primary(objects.rows());
    for source in auxiliary {
        assembler.merge_auxiliary(source);
    }
    assembler.finish()
}

fn decode_results(data: &[u8], context: &str) -> Result<SparqlResults> {
    SparqlResults::from_slice(data)
        .map_err(OmmError::from)
        .context(context)
}

/// Build the OSM map of `body` and write it to `output`
pub fn build_map<C, Q>(
    cache: &C,
    service: &Q,
    body: EntityRef,
    output: &Path,
    extras: &[PathBuf],
    config: &MapConfig,
) -> Result<AssemblyStats>
where
    C: ByteCache,
    Q: QueryService,
{
    let celestial = cache.get_or_fetch(
        &CacheKey::body(body),
        || service.entity_data(body),
        |data| CelestialBody::from_slice(body, data).context(format!("decoding {}", body)),
    )?;
    info!(
        body = %body,
        label = celestial.label(&config.language).unwrap_or("?"),
        radius_m = celestial.equator_radius(),
        "Building map"
    );

    let objects = cache.get_or_fetch(
        &CacheKey::objects(body),
        || service.sparql(&object_query(body, &config.language)),
        |data| decode_results(data, "decoding object query results"),
    )?;

    let craters = cache.get_or_fetch(
        &CacheKey::craters(body),
        || {
            service.sparql(&object_property_query(
                body,
                Item::Crater,
                Property::Diameter,
                DIAMETER_FIELD,
            ))
        },
        |data| decode_results(data, "decoding crater query results"),
    )?;
    let index = PropertyIndex::from_records(craters.rows(), DIAMETER_FIELD, config.diameter_scale);

    let auxiliary = extras
        .iter()
        .map(|path| load_auxiliary(path))
        .collect::<Result<Vec<_>>>()?;

    let (document, stats) = assemble(&objects, &index, auxiliary, config);
    info!(
        nodes = stats.total_nodes(),
        accepted = stats.accepted,
        auxiliary = stats.auxiliary,
        malformed = stats.malformed,
        duplicates = stats.duplicates,
        out_of_range = stats.out_of_range,
        diameters = index.len(),
        "Assembled map"
    );

    write_document_file(output, &document)
        .map_err(OmmError::from)
        .context(format!("writing {}", output.display()))?;
    info!(output = %output.display(), "Map written");
    Ok(stats)
}
