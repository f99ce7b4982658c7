//! Blocking client for the data.gov.il CKAN datastore search endpoint

use log::{debug, warn};
use rechev_domain::model::{DatasetQuery, QueryMode};
use rechev_domain::repository::Datastore;
use rechev_types::{Error, Result};
use reqwest::blocking::{Client, ClientBuilder, Request};
use serde_json::Value;
use std::time::Duration;

/// Public datastore search endpoint
pub const DEFAULT_BASE_URL: &str = "https://data.gov.il/api/3/action/datastore_search";

/// Settings for the datastore client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CkanClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for CkanClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("rechev-lookup/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// CKAN `datastore_search` client
#[derive(Debug, Clone)]
pub struct CkanClient {
    config: CkanClientConfig,
    client: Client,
}

fn http_error(e: reqwest::Error) -> Error {
    Error::Http(e.to_string())
}

impl CkanClient {
    pub fn new(config: CkanClientConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(http_error)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &CkanClientConfig {
        &self.config
    }

    /// Query-string parameters for a search
    pub fn query_params(query: &DatasetQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![("resource_id", query.dataset.resource_id().to_string())];
        match &query.mode {
            QueryMode::Search(term) => params.push(("q", term.clone())),
            QueryMode::Filters(_) => {
                if let Some(filters) = query.filters_json() {
                    params.push(("filters", filters));
                }
            }
        }
        params.push(("limit", query.limit.to_string()));
        params
    }

    /// Build the GET request for a search without sending it
    pub fn request(&self, query: &DatasetQuery) -> Result<Request> {
        self.client
            .get(&self.config.base_url)
            .query(&Self::query_params(query))
            .build()
            .map_err(http_error)
    }
}

impl Datastore for CkanClient {
    fn search(&self, query: &DatasetQuery) -> Result<Value> {
        let request = self.request(query)?;
        debug!("GET {} ({})", request.url(), query.dataset);

        let response = self
            .client
            .execute(request)
            .and_then(|r| r.error_for_status())
            .map_err(http_error)?;
        let body = response.text().map_err(http_error)?;
        let value: Value = serde_json::from_str(&body)?;

        if value.get("success").and_then(Value::as_bool) == Some(false) {
            warn!("datastore reported failure for {} query: {}", query.dataset, value["error"]);
        }
        Ok(value)
    }
}
