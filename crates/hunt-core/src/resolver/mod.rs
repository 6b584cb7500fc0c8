//! Challenge resolution pipeline
//!
//! The ChallengeResolver is responsible for:
//! - Resolving a team record from a free-text name
//! - Reconstructing the team's ordered challenge sequence
//! - Computing the successor of the just-completed challenge
//! - Resolving the successor's public locator URL
//!
//! ## Architecture
//!
//! ```text
//! team name ──▶ resolve_team ──▶ extract_sequence ──▶ next_after ──▶ locate_challenge
//!                   │                  │                  │                │
//!                   ▼                  ▼                  ▼                ▼
//!              TeamNotFound      ChallengeSequence     Finished     Redirect | Finished
//! ```
//!
//! ## Flow
//!
//! Each stage is synchronous within the request and stateless; every
//! resolution re-queries the store. No retries across stages, no caches,
//! and the store is never mutated.

use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::sequence::{ChallengeSequence, SkipReason, canonical_id, challenge_position};
use crate::traits::{PropertyFilter, PropertyValue, Record, RecordStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Candidate names for the team title property, probed in order
///
/// The backing store does not guarantee a fixed name for the title-semantic
/// field across databases; the tiered probing is a compatibility shim.
const TITLE_PROPERTY_CANDIDATES: [&str; 4] = ["Name", "Team", "Title", "title"];

/// Property names a challenge's numeric identifier may live under
const NUMERIC_ID_PROPERTIES: [&str; 2] = ["id", "ID"];

/// Terminal outcome of a full resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A next challenge exists and has a public locator
    Redirect {
        /// Canonical id of the next challenge
        next_id: String,
        /// Public URL of the next challenge
        url: String,
    },
    /// The sequence is exhausted, or the successor has no locator
    ///
    /// This is a legitimate end state, not an error.
    Finished,
}

/// Resolves the next challenge for a team
///
/// The resolver orchestrates the four-stage pipeline over the record store.
/// It holds no per-request state and can be shared across concurrent
/// requests.
///
/// ## Threading
///
/// All operations run sequentially within one request's task; the resolver
/// itself is `Send + Sync` and takes no locks.
pub struct ChallengeResolver {
    /// Store backend queried for team and challenge records
    store: Arc<dyn RecordStore>,

    /// Collection ids, public base URL, scan cap
    config: ResolverConfig,
}

impl ChallengeResolver {
    /// Create a new resolver
    ///
    /// # Parameters
    ///
    /// - `store`: Record store implementation
    /// - `config`: Resolver settings (validated here)
    pub fn new(store: Arc<dyn RecordStore>, config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Run the full pipeline: team name + completed challenge id → outcome
    ///
    /// # Parameters
    ///
    /// - `team_name`: Free-text team name as entered by the participant
    /// - `current_id`: Canonical id of the just-completed challenge
    ///
    /// # Returns
    ///
    /// - `Ok(Resolution::Redirect)`: Next challenge located
    /// - `Ok(Resolution::Finished)`: Sequence exhausted or no locator
    /// - `Err(Error)`: Team not found, or the store failed
    pub async fn resolve_next(&self, team_name: &str, current_id: &str) -> Result<Resolution> {
        info!("Resolving next challenge for team '{}' after id '{}'", team_name, current_id);

        let team_id = self.resolve_team(team_name).await?;
        debug!("Team record resolved: {}", team_id);

        let sequence = self.extract_sequence(&team_id).await?;
        debug!("Reconstructed sequence with {} position(s)", sequence.len());

        let Some(next_id) = sequence.next_after(current_id) else {
            info!("No challenge after id '{}' for team '{}'", current_id, team_name);
            return Ok(Resolution::Finished);
        };
        let next_id = next_id.to_string();

        match self.locate_challenge(&next_id).await? {
            Some(url) => {
                info!("Next challenge for team '{}': id '{}' -> {}", team_name, next_id, url);
                Ok(Resolution::Redirect { next_id, url })
            }
            None => {
                warn!("Challenge id '{}' has no record in the challenge collection", next_id);
                Ok(Resolution::Finished)
            }
        }
    }

    /// Resolve a team record id from a free-text name
    ///
    /// Matching policy, first success wins:
    ///
    /// 1. Tiered equality queries over the candidate title properties.
    ///    A failed tiered query is expected (the property may not exist on
    ///    this database) and means "try the next strategy".
    /// 2. Unfiltered scan capped at the configured page limit, comparing
    ///    every title or rich-text property value exactly (case-sensitive).
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: Store id of the first matching team record
    /// - `Err(Error::TeamNotFound)`: Both strategies exhausted
    /// - `Err(Error::Store)`: The full-scan query itself failed
    pub async fn resolve_team(&self, name: &str) -> Result<String> {
        for property in TITLE_PROPERTY_CANDIDATES {
            let filter = PropertyFilter::TextEquals {
                property: property.to_string(),
                value: name.to_string(),
            };

            match self
                .store
                .query_by_filter(&self.config.teams_collection, &filter)
                .await
            {
                Ok(records) => {
                    if let Some(record) = records.first() {
                        debug!("Team '{}' matched via property '{}'", name, property);
                        return Ok(record.id.clone());
                    }
                }
                Err(e) => {
                    debug!("Tiered query on '{}' failed, trying next: {}", property, e);
                }
            }
        }

        // Last resort: fetch one page of teams and search manually.
        let records = self
            .store
            .query_all(&self.config.teams_collection, self.config.scan_page_limit)
            .await?;

        for record in &records {
            for value in record.properties.values() {
                if value.as_text() == Some(name) {
                    debug!("Team '{}' matched via full scan", name);
                    return Ok(record.id.clone());
                }
            }
        }

        Err(Error::team_not_found(name))
    }

    /// Reconstruct a team's challenge sequence from its relation properties
    ///
    /// Fetches the team record and follows every `Challenge<N>` relation to
    /// the linked challenge record, reading its numeric identifier (`id`,
    /// falling back to `ID`). Per-position failures are recorded as
    /// unresolved positions and never escalated.
    ///
    /// # Parameters
    ///
    /// - `team_id`: Store id of the team record
    pub async fn extract_sequence(&self, team_id: &str) -> Result<ChallengeSequence> {
        let team = self
            .store
            .get_record(&self.config.teams_collection, team_id)
            .await?;

        let mut sequence = ChallengeSequence::new();

        for (name, value) in &team.properties {
            let Some(position) = challenge_position(name) else {
                continue;
            };
            let Some(targets) = value.relation_targets() else {
                continue;
            };

            // Multiple targets under one position are not an expected shape;
            // only the first is honored.
            let Some(target) = targets.first() else {
                sequence.insert_unresolved(position, SkipReason::EmptyRelation);
                continue;
            };

            match self
                .store
                .get_record(&self.config.challenges_collection, target)
                .await
            {
                Ok(challenge) => match challenge_numeric_id(&challenge) {
                    Some(challenge_id) => {
                        debug!("Position {} -> challenge id '{}'", position, challenge_id);
                        sequence.insert_resolved(position, challenge_id);
                    }
                    None => {
                        warn!(
                            "Challenge record {} has no numeric id property, skipping position {}",
                            challenge.id, position
                        );
                        sequence.insert_unresolved(position, SkipReason::MissingIdProperty);
                    }
                },
                Err(e) => {
                    warn!("Failed to fetch challenge at position {}: {}", position, e);
                    sequence.insert_unresolved(position, SkipReason::FetchFailed);
                }
            }
        }

        Ok(sequence)
    }

    /// Resolve a challenge's public locator from its canonical id
    ///
    /// Queries the challenge collection with a numeric equality filter on
    /// `id`; if that errors or matches nothing, retries once with `ID`. The
    /// locator is the public base URL plus the hyphen-stripped store id of
    /// the matched record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(String))`: The public URL
    /// - `Ok(None)`: No record found after both attempts (caller renders
    ///   "finished")
    pub async fn locate_challenge(&self, challenge_id: &str) -> Result<Option<String>> {
        let Ok(value) = challenge_id.parse::<f64>() else {
            warn!("Challenge id '{}' is not numeric", challenge_id);
            return Ok(None);
        };

        for property in NUMERIC_ID_PROPERTIES {
            let filter = PropertyFilter::NumberEquals {
                property: property.to_string(),
                value,
            };

            match self
                .store
                .query_by_filter(&self.config.challenges_collection, &filter)
                .await
            {
                Ok(records) => {
                    if let Some(record) = records.first() {
                        return Ok(Some(self.public_url(&record.id)));
                    }
                }
                Err(e) => {
                    debug!("Locator query on '{}' failed, trying next: {}", property, e);
                }
            }
        }

        Ok(None)
    }

    /// List all team names, sorted alphabetically
    ///
    /// Scans one page of the team collection and collects each record's
    /// title-kind property value. Feeds the team-selection dropdown.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<String>)`: Sorted team names (at least one)
    /// - `Err(Error)`: Scan failed, or the collection holds no named teams
    pub async fn list_team_names(&self) -> Result<Vec<String>> {
        let records = self
            .store
            .query_all(&self.config.teams_collection, self.config.scan_page_limit)
            .await?;

        let mut names: Vec<String> = records
            .iter()
            .filter_map(|record| record.title_text())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect();

        if names.is_empty() {
            return Err(Error::other("no teams found in the team collection"));
        }

        names.sort();
        Ok(names)
    }

    fn public_url(&self, record_id: &str) -> String {
        let clean: String = record_id.chars().filter(|c| *c != '-').collect();
        format!("{}{}", self.config.public_base_url, clean)
    }
}

/// Read a challenge record's numeric identifier as a canonical string
///
/// Prefers the `id` property, falling back to `ID`.
fn challenge_numeric_id(record: &Record) -> Option<String> {
    for name in NUMERIC_ID_PROPERTIES {
        if let Some(PropertyValue::Number(value)) = record.property(name) {
            return Some(canonical_id(*value));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_id_prefers_lowercase_property() {
        let record = Record::new("rec-1")
            .with_property("ID", PropertyValue::Number(99.0))
            .with_property("id", PropertyValue::Number(7.0));

        assert_eq!(challenge_numeric_id(&record), Some("7".to_string()));
    }

    #[test]
    fn numeric_id_falls_back_to_uppercase() {
        let record = Record::new("rec-1").with_property("ID", PropertyValue::Number(7.0));

        assert_eq!(challenge_numeric_id(&record), Some("7".to_string()));
    }

    #[test]
    fn numeric_id_absent_when_not_a_number() {
        let record =
            Record::new("rec-1").with_property("id", PropertyValue::RichText("7".to_string()));

        assert_eq!(challenge_numeric_id(&record), None);
    }
}
