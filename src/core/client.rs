//! Wikidata network access
//!
//! `QueryService` is the seam between the pipeline and the network; tests
//! substitute a mock, production uses `WikidataClient`.

use std::time::Duration;
use tracing::debug;

use crate::core::error::{OmmError, Result};
use crate::core::models::{EntityRef, MapConfig};

#[cfg(test)]
use mockall::automock;

/// Source of raw Wikidata responses
#[cfg_attr(test, automock)]
pub trait QueryService {
    /// Run a SPARQL query, returning the JSON result bytes
    fn sparql(&self, query: &str) -> Result<Vec<u8>>;

    /// Fetch the entity data document of one item
    fn entity_data(&self, entity: EntityRef) -> Result<Vec<u8>>;
}

/// Blocking HTTP client for the public Wikidata endpoints
pub struct WikidataClient {
    client: reqwest::blocking::Client,
    sparql_endpoint: String,
    entity_endpoint: String,
}

impl WikidataClient {
    pub fn new(config: &MapConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            sparql_endpoint: config.sparql_endpoint.clone(),
            entity_endpoint: config.entity_endpoint.clone(),
        })
    }

    /// URL of an entity data document
    pub fn entity_url(&self, entity: EntityRef) -> String {
        format!("{}{}.json", self.entity_endpoint, entity)
    }

    fn get(&self, request: reqwest::blocking::RequestBuilder) -> Result<Vec<u8>> {
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(OmmError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

impl QueryService for WikidataClient {
    fn sparql(&self, query: &str) -> Result<Vec<u8>> {
        debug!(endpoint = %self.sparql_endpoint, "SPARQL query");
        self.get(
            self.client
                .get(&self.sparql_endpoint)
                .query(&[("format", "json"), ("query", query)]),
        )
    }

    fn entity_data(&self, entity: EntityRef) -> Result<Vec<u8>> {
        let url = self.entity_url(entity);
        debug!(%url, "Entity data request");
        self.get(self.client.get(&url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_url() {
        let client = WikidataClient::new(&MapConfig::default()).unwrap();
        assert_eq!(
            client.entity_url(EntityRef(405)),
            "https://www.wikidata.org/wiki/Special:EntityData/Q405.json"
        );
    }

    #[test]
    fn test_mock_service() {
        let mut service = MockQueryService::new();
        service
            .expect_sparql()
            .withf(|query: &str| query.contains("wd:Q405"))
            .times(1)
            .returning(|_| Ok(b"{}".to_vec()));
        assert_eq!(service.sparql("?item wdt:P376 wd:Q405").unwrap(), b"{}");
    }
}
