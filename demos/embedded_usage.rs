//! Minimal embedding example for hunt-core
//!
//! This example demonstrates using hunt-core as a library in a custom
//! application, with a custom in-memory record store instead of the Notion
//! backend. The resolver lifecycle is fully managed by the application.

#![allow(dead_code)]

use hunt_core::traits::{PropertyFilter, PropertyValue, Record, RecordStore};
use hunt_core::{ChallengeResolver, Resolution, ResolverConfig, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Custom record store for embedded usage
struct EmbeddedStore {
    collections: Mutex<HashMap<String, Vec<Record>>>,
}

impl EmbeddedStore {
    fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
        }
    }

    fn insert(&self, collection: &str, record: Record) {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(record);
    }

    fn records(&self, collection: &str) -> Vec<Record> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl RecordStore for EmbeddedStore {
    async fn query_by_filter(
        &self,
        collection: &str,
        filter: &PropertyFilter,
    ) -> Result<Vec<Record>> {
        let records = self.records(collection);
        Ok(records
            .into_iter()
            .filter(|record| match filter {
                PropertyFilter::TextEquals { property, value } => record
                    .property(property)
                    .and_then(PropertyValue::as_text)
                    .is_some_and(|text| text == value),
                PropertyFilter::NumberEquals { property, value } => record
                    .property(property)
                    .and_then(PropertyValue::as_number)
                    .is_some_and(|number| number == *value),
            })
            .collect())
    }

    async fn query_all(&self, collection: &str, page_limit: u32) -> Result<Vec<Record>> {
        let mut records = self.records(collection);
        records.truncate(page_limit as usize);
        Ok(records)
    }

    async fn get_record(&self, collection: &str, record_id: &str) -> Result<Record> {
        self.records(collection)
            .into_iter()
            .find(|record| record.id == record_id)
            .ok_or_else(|| hunt_core::Error::store(format!("record '{}' not found", record_id)))
    }

    fn store_name(&self) -> &'static str {
        "embedded"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Embedded hunt-core Example ===\n");

    // Populate a store: one team, two challenges
    let store = Arc::new(EmbeddedStore::new());

    store.insert(
        "challenges",
        Record::new("ch-aaaa-1111").with_property("id", PropertyValue::Number(1.0)),
    );
    store.insert(
        "challenges",
        Record::new("ch-bbbb-2222").with_property("id", PropertyValue::Number(2.0)),
    );

    store.insert(
        "teams",
        Record::new("team-rockets")
            .with_property("Name", PropertyValue::Title("Rockets".to_string()))
            .with_property(
                "Challenge1",
                PropertyValue::Relation(vec!["ch-aaaa-1111".to_string()]),
            )
            .with_property(
                "Challenge2",
                PropertyValue::Relation(vec!["ch-bbbb-2222".to_string()]),
            ),
    );

    // Create the resolver
    println!("1. Creating resolver...");
    let config = ResolverConfig::new("teams", "challenges", "https://example-hunt.site/");
    let resolver = ChallengeResolver::new(store, config)?;

    // Resolve the step after challenge 1
    println!("2. Resolving the next challenge for team Rockets after id 1...");
    match resolver.resolve_next("Rockets", "1").await? {
        Resolution::Redirect { next_id, url } => {
            println!("   Next challenge id: {}", next_id);
            println!("   Next challenge URL: {}", url);
        }
        Resolution::Finished => println!("   Sequence exhausted"),
    }

    // Resolve past the last challenge
    println!("3. Resolving after the final challenge...");
    match resolver.resolve_next("Rockets", "2").await? {
        Resolution::Redirect { url, .. } => println!("   Unexpected redirect: {}", url),
        Resolution::Finished => println!("   Finished - the team completed the hunt"),
    }

    println!("\n=== Embedding Successful ===");
    println!("Key Points:");
    println!("- Resolver lifecycle is fully controlled by the application");
    println!("- Any RecordStore implementation can back the resolver");
    println!("- No global state, no caching, no process-lifecycle coupling");

    Ok(())
}
