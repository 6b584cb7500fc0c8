//! Test doubles and common utilities for resolver contract tests
//!
//! This module provides an in-memory record store with programmable
//! failures, used to verify the resolver's fallback and swallowing
//! policies without a real backend.

#![allow(dead_code)]

use hunt_core::error::{Error, Result};
use hunt_core::traits::{PropertyFilter, PropertyValue, Record, RecordStore};
use hunt_core::{ChallengeResolver, ResolverConfig};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Collection id used for teams in tests
pub const TEAMS: &str = "teams-db";

/// Collection id used for challenges in tests
pub const CHALLENGES: &str = "challenges-db";

/// Base URL used for locators in tests
pub const BASE_URL: &str = "https://hunt.example.site/";

/// An in-memory RecordStore with programmable failures and call counters
#[derive(Default)]
pub struct MockRecordStore {
    /// Records per collection, in insertion order
    collections: Mutex<HashMap<String, Vec<Record>>>,
    /// (collection, property) pairs whose filtered query errors
    failing_filter_properties: Mutex<HashSet<(String, String)>>,
    /// Collections whose unfiltered scan errors
    failing_scans: Mutex<HashSet<String>>,
    /// Record ids whose direct fetch errors
    failing_records: Mutex<HashSet<String>>,
    /// Property names seen by filtered queries, in call order
    filtered_properties_seen: Mutex<Vec<String>>,
    /// Call counter for query_by_filter()
    filter_call_count: AtomicUsize,
    /// Call counter for query_all()
    scan_call_count: AtomicUsize,
    /// Call counter for get_record()
    get_call_count: AtomicUsize,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record into a collection
    pub fn insert(&self, collection: &str, record: Record) {
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(record);
    }

    /// Make filtered queries against (collection, property) fail
    ///
    /// Simulates the backend rejecting a filter on a property that does not
    /// exist on the collection.
    pub fn fail_filter_on(&self, collection: &str, property: &str) {
        self.failing_filter_properties
            .lock()
            .unwrap()
            .insert((collection.to_string(), property.to_string()));
    }

    /// Make unfiltered scans of a collection fail
    pub fn fail_scan_of(&self, collection: &str) {
        self.failing_scans
            .lock()
            .unwrap()
            .insert(collection.to_string());
    }

    /// Make direct fetches of a record fail
    pub fn fail_fetch_of(&self, record_id: &str) {
        self.failing_records
            .lock()
            .unwrap()
            .insert(record_id.to_string());
    }

    /// Property names filtered queries were issued against, in order
    pub fn filtered_properties_seen(&self) -> Vec<String> {
        self.filtered_properties_seen.lock().unwrap().clone()
    }

    /// Number of filtered queries issued
    pub fn filter_call_count(&self) -> usize {
        self.filter_call_count.load(Ordering::SeqCst)
    }

    /// Number of unfiltered scans issued
    pub fn scan_call_count(&self) -> usize {
        self.scan_call_count.load(Ordering::SeqCst)
    }

    /// Number of direct fetches issued
    pub fn get_call_count(&self) -> usize {
        self.get_call_count.load(Ordering::SeqCst)
    }

    fn matches(record: &Record, filter: &PropertyFilter) -> bool {
        match filter {
            PropertyFilter::TextEquals { property, value } => record
                .property(property)
                .and_then(PropertyValue::as_text)
                .is_some_and(|text| text == value),
            PropertyFilter::NumberEquals { property, value } => record
                .property(property)
                .and_then(PropertyValue::as_number)
                .is_some_and(|number| number == *value),
        }
    }
}

#[async_trait::async_trait]
impl RecordStore for MockRecordStore {
    async fn query_by_filter(
        &self,
        collection: &str,
        filter: &PropertyFilter,
    ) -> Result<Vec<Record>> {
        self.filter_call_count.fetch_add(1, Ordering::SeqCst);
        self.filtered_properties_seen
            .lock()
            .unwrap()
            .push(filter.property().to_string());

        let failing = self.failing_filter_properties.lock().unwrap();
        if failing.contains(&(collection.to_string(), filter.property().to_string())) {
            return Err(Error::store(format!(
                "no property '{}' on collection '{}'",
                filter.property(),
                collection
            )));
        }
        drop(failing);

        let collections = self.collections.lock().unwrap();
        let records = collections.get(collection).cloned().unwrap_or_default();
        Ok(records
            .into_iter()
            .filter(|record| Self::matches(record, filter))
            .collect())
    }

    async fn query_all(&self, collection: &str, page_limit: u32) -> Result<Vec<Record>> {
        self.scan_call_count.fetch_add(1, Ordering::SeqCst);

        if self.failing_scans.lock().unwrap().contains(collection) {
            return Err(Error::store(format!(
                "scan of collection '{}' failed",
                collection
            )));
        }

        let collections = self.collections.lock().unwrap();
        let mut records = collections.get(collection).cloned().unwrap_or_default();
        records.truncate(page_limit as usize);
        Ok(records)
    }

    async fn get_record(&self, collection: &str, record_id: &str) -> Result<Record> {
        self.get_call_count.fetch_add(1, Ordering::SeqCst);

        if self.failing_records.lock().unwrap().contains(record_id) {
            return Err(Error::store(format!("fetch of record '{}' failed", record_id)));
        }

        let collections = self.collections.lock().unwrap();
        collections
            .get(collection)
            .and_then(|records| records.iter().find(|record| record.id == record_id))
            .cloned()
            .ok_or_else(|| Error::store(format!("record '{}' not found", record_id)))
    }

    fn store_name(&self) -> &'static str {
        "mock"
    }
}

/// Build a resolver over the given mock with the test collection ids
pub fn resolver_over(store: Arc<MockRecordStore>) -> ChallengeResolver {
    ChallengeResolver::new(
        store,
        ResolverConfig::new(TEAMS, CHALLENGES, BASE_URL),
    )
    .expect("test resolver config is valid")
}

/// A team record whose display name sits in a title property
pub fn team_record(id: &str, title_property: &str, name: &str) -> Record {
    Record::new(id).with_property(title_property, PropertyValue::Title(name.to_string()))
}

/// A challenge record carrying a numeric id under the given property name
pub fn challenge_record(id: &str, id_property: &str, numeric_id: f64) -> Record {
    Record::new(id).with_property(id_property, PropertyValue::Number(numeric_id))
}

/// Link a `Challenge<N>` relation on a team record
pub fn with_challenge_relation(record: Record, position: u32, target: &str) -> Record {
    record.with_property(
        format!("Challenge{position}"),
        PropertyValue::Relation(vec![target.to_string()]),
    )
}
