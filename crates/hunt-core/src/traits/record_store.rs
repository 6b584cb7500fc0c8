// # Record Store Trait
//
// Defines the query interface against the external document store.
//
// ## Purpose
//
// The resolver never talks to a concrete backend directly. It consumes this
// contract against two logical collections (teams, challenges), each record
// exposing a mapping from named, typed properties to values.
//
// ## Implementations
//
// - Notion: `hunt-store-notion` crate
// - Test doubles: `tests/common/mod.rs`
//
// ## Usage
//
// ```rust,ignore
// use hunt_core::traits::{PropertyFilter, RecordStore};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let store = /* RecordStore implementation */;
//
//     let filter = PropertyFilter::TextEquals {
//         property: "Name".to_string(),
//         value: "Rockets".to_string(),
//     };
//     let teams = store.query_by_filter("teams-db-id", &filter).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::collections::BTreeMap;

/// A typed property value on a store record
///
/// Only the kinds the resolver cares about are modeled; everything else the
/// backend may return collapses to [`PropertyValue::Unsupported`].
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Title-kind property (plain text of the first fragment)
    Title(String),
    /// Rich-text-kind property (plain text of the first fragment)
    RichText(String),
    /// Numeric property
    Number(f64),
    /// Relation to other records, by their store identifiers
    Relation(Vec<String>),
    /// Any property kind the resolver does not consume
    Unsupported,
}

impl PropertyValue {
    /// Plain text of a title or rich-text property
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Title(text) | PropertyValue::RichText(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric value, if this is a number property
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Relation targets, if this is a relation property
    pub fn relation_targets(&self) -> Option<&[String]> {
        match self {
            PropertyValue::Relation(targets) => Some(targets),
            _ => None,
        }
    }
}

/// A record in the external store
///
/// Records are read-only inputs for the duration of a single resolution;
/// the core never mutates the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Opaque store identifier
    pub id: String,
    /// Named, typed properties
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Record {
    /// Create a record with no properties
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Attach a property (builder-style, used heavily by tests)
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Look up a property by name
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Text of the first title-kind property, wherever it lives
    ///
    /// The store does not guarantee a fixed name for the title field, so
    /// callers that only care about "the record's display name" identify it
    /// by kind.
    pub fn title_text(&self) -> Option<&str> {
        self.properties.values().find_map(|value| match value {
            PropertyValue::Title(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Equality filter on a single named property
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyFilter {
    /// Text equality against a title or rich-text property
    TextEquals {
        /// Property name to filter on
        property: String,
        /// Exact value to match
        value: String,
    },
    /// Numeric equality against a number property
    NumberEquals {
        /// Property name to filter on
        property: String,
        /// Exact value to match
        value: f64,
    },
}

impl PropertyFilter {
    /// The property name this filter is restricted to
    pub fn property(&self) -> &str {
        match self {
            PropertyFilter::TextEquals { property, .. }
            | PropertyFilter::NumberEquals { property, .. } => property,
        }
    }
}

/// Trait for record store implementations
///
/// This trait defines the query contract the resolver consumes. It is used
/// identically against the team collection and the challenge collection.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Constraints
///
/// Store implementations are single-shot query executors:
///
/// - One backend request per method call; no retry or backoff (the resolver
///   owns its tiered-fallback policy)
/// - No caching between calls (every resolution re-queries the store)
/// - No mutation of the backing collections
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Query a collection with an equality filter on one property
    ///
    /// # Parameters
    ///
    /// - `collection`: Store identifier of the collection to query
    /// - `filter`: Equality filter restricted to a named property
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Record>)`: Matching records (possibly empty)
    /// - `Err(Error)`: Transport failure, or the backend rejected the query
    ///   (e.g. the named property does not exist on the collection)
    async fn query_by_filter(
        &self,
        collection: &str,
        filter: &PropertyFilter,
    ) -> Result<Vec<Record>, crate::Error>;

    /// Unfiltered scan of a collection, capped at a fixed page size
    ///
    /// Results beyond the first page are not fetched; callers that use this
    /// accept the page limit as a scale bound.
    ///
    /// # Parameters
    ///
    /// - `collection`: Store identifier of the collection to scan
    /// - `page_limit`: Maximum number of records to return
    async fn query_all(
        &self,
        collection: &str,
        page_limit: u32,
    ) -> Result<Vec<Record>, crate::Error>;

    /// Fetch one record by its store identifier
    ///
    /// # Parameters
    ///
    /// - `collection`: Store identifier of the collection the record lives in
    /// - `record_id`: Opaque store identifier of the record
    async fn get_record(
        &self,
        collection: &str,
        record_id: &str,
    ) -> Result<Record, crate::Error>;

    /// Get the backend name (for logging/debugging)
    fn store_name(&self) -> &'static str;
}

/// Helper trait for constructing record stores from configuration
pub trait RecordStoreFactory: Send + Sync {
    /// Create a RecordStore instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this backend
    ///
    /// # Returns
    ///
    /// A boxed RecordStore trait object
    fn create(
        &self,
        config: &crate::config::StoreConfig,
    ) -> Result<Box<dyn RecordStore>, crate::Error>;
}
