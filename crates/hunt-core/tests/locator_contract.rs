//! Contract Test: Locator Resolution
//!
//! Verifies the public-URL lookup for a challenge's canonical id:
//! - Numeric equality query on `id` first, one retry with `ID`
//! - Locator is the base URL plus the hyphen-stripped store identifier
//! - No record after both attempts is a normal empty outcome

mod common;

use common::*;
use std::sync::Arc;

#[tokio::test]
async fn locates_via_lowercase_id_property() {
    let store = Arc::new(MockRecordStore::new());
    store.insert(CHALLENGES, challenge_record("abc-def-123", "id", 20.0));

    let resolver = resolver_over(store.clone());
    let url = resolver.locate_challenge("20").await.unwrap();

    assert_eq!(url.as_deref(), Some("https://hunt.example.site/abcdef123"));
    assert_eq!(store.filtered_properties_seen(), vec!["id".to_string()]);
}

#[tokio::test]
async fn retries_with_uppercase_property_when_empty() {
    let store = Arc::new(MockRecordStore::new());
    store.insert(CHALLENGES, challenge_record("ch-20", "ID", 20.0));

    let resolver = resolver_over(store.clone());
    let url = resolver.locate_challenge("20").await.unwrap();

    assert_eq!(url.as_deref(), Some("https://hunt.example.site/ch20"));
    assert_eq!(
        store.filtered_properties_seen(),
        vec!["id".to_string(), "ID".to_string()]
    );
}

#[tokio::test]
async fn retries_with_uppercase_property_when_query_errors() {
    let store = Arc::new(MockRecordStore::new());
    store.fail_filter_on(CHALLENGES, "id");
    store.insert(CHALLENGES, challenge_record("ch-20", "ID", 20.0));

    let resolver = resolver_over(store);
    let url = resolver.locate_challenge("20").await.unwrap();

    assert_eq!(url.as_deref(), Some("https://hunt.example.site/ch20"));
}

#[tokio::test]
async fn missing_challenge_is_empty_not_an_error() {
    let store = Arc::new(MockRecordStore::new());

    let resolver = resolver_over(store.clone());
    let url = resolver.locate_challenge("20").await.unwrap();

    assert_eq!(url, None);
    // Both attempts ran before giving up.
    assert_eq!(store.filter_call_count(), 2);
}

#[tokio::test]
async fn non_numeric_id_is_empty_without_querying() {
    let store = Arc::new(MockRecordStore::new());

    let resolver = resolver_over(store.clone());
    let url = resolver.locate_challenge("not-a-number").await.unwrap();

    assert_eq!(url, None);
    assert_eq!(store.filter_call_count(), 0);
}

#[tokio::test]
async fn hyphens_are_stripped_from_store_identifiers() {
    let store = Arc::new(MockRecordStore::new());
    store.insert(
        CHALLENGES,
        challenge_record("0a1b-2c3d-4e5f-6071", "id", 7.0),
    );

    let resolver = resolver_over(store);
    let url = resolver.locate_challenge("7").await.unwrap();

    assert_eq!(url.as_deref(), Some("https://hunt.example.site/0a1b2c3d4e5f6071"));
}
