// # hunt-core
//
// Core library for the scavenger-hunt next-challenge resolver.
//
// ## Architecture Overview
//
// This library provides the core resolution logic:
// - **RecordStore**: Trait for querying the external document store
// - **ChallengeResolver**: Four-stage pipeline from team name to next-challenge URL
// - **ChallengeSequence**: A team's reconstructed challenge ordering
// - **StoreRegistry**: Plugin-based registry for store backends
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from store backends
// 2. **Stateless Resolution**: Every request re-queries the store; no caches,
//    no cross-request state, no mutation of the backing collections
// 3. **Library-First**: All core functionality can be used as a library
// 4. **Partial Data over Aborts**: Per-position and per-strategy failures are
//    recorded and skipped, never escalated past the last-resort path

pub mod config;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod sequence;
pub mod traits;

// Re-export core types for convenience
pub use config::{HuntConfig, ResolverConfig, StoreConfig};
pub use error::{Error, Result};
pub use registry::StoreRegistry;
pub use resolver::{ChallengeResolver, Resolution};
pub use sequence::{ChallengeSequence, PositionStatus, SkipReason};
pub use traits::{PropertyFilter, PropertyValue, Record, RecordStore};
