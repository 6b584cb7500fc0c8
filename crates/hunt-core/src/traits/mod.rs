//! Core traits for the hunt resolver
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`RecordStore`]: Query records in the external document store

pub mod record_store;

pub use record_store::{
    PropertyFilter, PropertyValue, Record, RecordStore, RecordStoreFactory,
};
