// # Notion Record Store
//
// This crate provides a Notion-backed RecordStore implementation for the
// hunt resolver.
//
// ## Scope
//
// - Makes one HTTP request per store-contract call (the resolver owns all
//   fallback and retry policy)
// - Full error propagation to the resolver
// - HTTP timeout configured (30 seconds)
// - Specific error handling for HTTP status codes (400, 401/403, 404, 429, 5xx)
// - NO caching (every resolution re-queries the store)
// - NO mutation of the backing databases (read-only queries)
//
// ## Security Requirements
//
// - API token NEVER appears in logs
// - Store MUST fail fast if the token is empty
//
// ## API Reference
//
// - Notion API v1: https://developers.notion.com/reference/intro
// - Query a database: POST `/v1/databases/:database_id/query`
// - Retrieve a page: GET `/v1/pages/:page_id`

use async_trait::async_trait;
use hunt_core::config::StoreConfig;
use hunt_core::traits::{PropertyFilter, PropertyValue, Record, RecordStore, RecordStoreFactory};
use hunt_core::{Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Notion API base URL
const NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// Notion API version header value
const NOTION_VERSION: &str = "2022-06-28";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Notion record store
///
/// Queries team and challenge databases through the Notion API. Collections
/// in the store contract map to Notion database ids; records map to pages.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
// Custom Debug implementation that hides the API token
impl std::fmt::Debug for NotionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionStore")
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

pub struct NotionStore {
    /// Notion integration token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl NotionStore {
    /// Create a new Notion store
    ///
    /// # Parameters
    ///
    /// - `api_token`: Notion integration token with read access to the team
    ///   and challenge databases
    ///
    /// # Security
    ///
    /// The API token will NEVER be logged or displayed in error messages.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("Notion API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::store(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { api_token, client })
    }

    /// Issue a database query and parse the result page list
    async fn query_database(&self, database_id: &str, body: Value) -> Result<Vec<Record>> {
        let url = format!("{}/databases/{}/query", NOTION_API_BASE, database_id);

        tracing::debug!("Querying database {}", database_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::store(format!("HTTP request failed: {}", e)))?;

        let json = read_json_response(response).await?;

        let results = json["results"]
            .as_array()
            .ok_or_else(|| Error::store("Invalid response format: results is not an array"))?;

        results.iter().map(parse_page).collect()
    }
}

#[async_trait]
impl RecordStore for NotionStore {
    /// Query a database with an equality filter on one property
    ///
    /// Notion rejects filters on properties that do not exist on the
    /// database; that surfaces as a store error, which the resolver treats
    /// as "try the next strategy" on its tiered paths.
    async fn query_by_filter(
        &self,
        collection: &str,
        filter: &PropertyFilter,
    ) -> Result<Vec<Record>> {
        self.query_database(collection, filter_body(filter)).await
    }

    async fn query_all(&self, collection: &str, page_limit: u32) -> Result<Vec<Record>> {
        let body = serde_json::json!({ "page_size": page_limit });
        self.query_database(collection, body).await
    }

    async fn get_record(&self, _collection: &str, record_id: &str) -> Result<Record> {
        // Pages are fetched by id alone; Notion does not scope the lookup
        // to a database.
        let url = format!("{}/pages/{}", NOTION_API_BASE, record_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await
            .map_err(|e| Error::store(format!("HTTP request failed: {}", e)))?;

        let json = read_json_response(response).await?;
        parse_page(&json)
    }

    fn store_name(&self) -> &'static str {
        "notion"
    }
}

/// Check the HTTP status and parse the response body as JSON
async fn read_json_response(response: reqwest::Response) -> Result<Value> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        // Map HTTP status codes to specific errors
        return match status.as_u16() {
            400 => Err(Error::store(format!(
                "Query rejected (likely an unknown property): {} - {}",
                status, error_text
            ))),
            401 | 403 => Err(Error::store(format!(
                "Authentication failed: Invalid API token or missing database access. Status: {}",
                status
            ))),
            404 => Err(Error::store(format!(
                "Database or page not found: {} - {}",
                status, error_text
            ))),
            429 => Err(Error::store(format!(
                "Rate limit exceeded. Please retry later. Status: {}",
                status
            ))),
            500..=599 => Err(Error::store(format!(
                "Notion server error (transient): {} - {}",
                status, error_text
            ))),
            _ => Err(Error::store(format!(
                "Request failed: {} - {}",
                status, error_text
            ))),
        };
    }

    response
        .json()
        .await
        .map_err(|e| Error::store(format!("Failed to parse response: {}", e)))
}

/// Build the query body for an equality filter
fn filter_body(filter: &PropertyFilter) -> Value {
    match filter {
        PropertyFilter::TextEquals { property, value } => serde_json::json!({
            "filter": {
                "property": property,
                "rich_text": { "equals": value }
            }
        }),
        PropertyFilter::NumberEquals { property, value } => serde_json::json!({
            "filter": {
                "property": property,
                "number": { "equals": value }
            }
        }),
    }
}

/// Parse a Notion page object into a Record
fn parse_page(page: &Value) -> Result<Record> {
    let id = page["id"]
        .as_str()
        .ok_or_else(|| Error::store("Invalid response format: page id is not a string"))?;

    let mut properties = BTreeMap::new();
    if let Some(map) = page["properties"].as_object() {
        for (name, property) in map {
            properties.insert(name.clone(), parse_property(property));
        }
    }

    Ok(Record {
        id: id.to_string(),
        properties,
    })
}

/// Parse one property payload into the kinds the resolver consumes
fn parse_property(property: &Value) -> PropertyValue {
    match property["type"].as_str() {
        Some("title") => PropertyValue::Title(first_plain_text(&property["title"])),
        Some("rich_text") => PropertyValue::RichText(first_plain_text(&property["rich_text"])),
        Some("number") => match property["number"].as_f64() {
            Some(value) => PropertyValue::Number(value),
            // A number property with a null value carries no identifier.
            None => PropertyValue::Unsupported,
        },
        Some("relation") => {
            let targets = property["relation"]
                .as_array()
                .map(|relations| {
                    relations
                        .iter()
                        .filter_map(|relation| relation["id"].as_str())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            PropertyValue::Relation(targets)
        }
        _ => PropertyValue::Unsupported,
    }
}

/// Plain text of the first fragment of a title/rich-text payload
fn first_plain_text(fragments: &Value) -> String {
    fragments
        .as_array()
        .and_then(|fragments| fragments.first())
        .and_then(|fragment| fragment["plain_text"].as_str())
        .unwrap_or_default()
        .to_string()
}

/// Factory for creating Notion stores
pub struct NotionStoreFactory;

impl RecordStoreFactory for NotionStoreFactory {
    fn create(&self, config: &StoreConfig) -> Result<Box<dyn RecordStore>> {
        match config {
            StoreConfig::Notion { api_token } => {
                if api_token.is_empty() {
                    return Err(Error::config("Notion API token is required"));
                }
                Ok(Box::new(NotionStore::new(api_token.clone())?))
            }
            _ => Err(Error::config("Invalid config for Notion store")),
        }
    }
}

/// Register the Notion store with a registry
///
/// This function should be called during initialization to make the
/// Notion backend available.
///
/// # Example
///
/// ```rust
/// use hunt_core::StoreRegistry;
///
/// let registry = StoreRegistry::new();
/// hunt_store_notion::register(&registry);
/// ```
pub fn register(registry: &hunt_core::StoreRegistry) {
    registry.register_store("notion", Box::new(NotionStoreFactory));
}
