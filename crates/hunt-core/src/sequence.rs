// # Challenge Sequences
//
// A team's challenge ordering is not stored as a list; it is reconstructed
// per request from `Challenge<N>` relation properties on the team record.
// This module holds the reconstructed shape and the successor lookup.
//
// ## Determinism
//
// Positions live in a `BTreeMap`, so iteration is always by ascending
// position and "first match" is well defined even if the same challenge id
// ever appeared at two positions.
//
// ## Lifetime
//
// A sequence is scoped to one request. There is no persistence and no
// cross-request sharing.

use std::collections::BTreeMap;

/// Parse a `Challenge<N>` property name into its sequence position
///
/// The name must be the literal prefix `Challenge` followed by nothing but a
/// base-10 integer; anything else is not a sequence property.
pub fn challenge_position(property_name: &str) -> Option<u32> {
    let suffix = property_name.strip_prefix("Challenge")?;
    if suffix.is_empty() {
        return None;
    }
    suffix.parse().ok()
}

/// Canonical integer-string form of a numeric challenge identifier
///
/// The store exposes challenge ids as floats; `3.0` becomes `"3"`. This is
/// the one format used for comparison throughout the resolver.
pub fn canonical_id(value: f64) -> String {
    format!("{value:.0}")
}

/// Why a sequence position carries no challenge id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The `Challenge<N>` relation property had no targets
    EmptyRelation,
    /// Fetching the linked challenge record failed
    FetchFailed,
    /// The linked challenge record has neither an `id` nor an `ID` number property
    MissingIdProperty,
}

/// Resolution outcome for one sequence position
///
/// Per-position failures during extraction are never escalated; they are
/// recorded here so partial sequences stay inspectable instead of silently
/// losing keys.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionStatus {
    /// The position maps to a challenge, identified by its canonical id string
    Resolved {
        /// Canonical integer-string challenge identifier
        challenge_id: String,
    },
    /// The position exists on the team record but yielded no challenge id
    Unresolved {
        /// Why resolution was skipped
        reason: SkipReason,
    },
}

/// A team's reconstructed challenge sequence
///
/// Sparse mapping from sequence position to the challenge occupying it.
/// Gaps are permitted and simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChallengeSequence {
    positions: BTreeMap<u32, PositionStatus>,
}

impl ChallengeSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved challenge id at a position
    pub fn insert_resolved(&mut self, position: u32, challenge_id: impl Into<String>) {
        self.positions.insert(
            position,
            PositionStatus::Resolved {
                challenge_id: challenge_id.into(),
            },
        );
    }

    /// Record a position that yielded no challenge id
    pub fn insert_unresolved(&mut self, position: u32, reason: SkipReason) {
        self.positions
            .insert(position, PositionStatus::Unresolved { reason });
    }

    /// Number of positions present (resolved or not)
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the sequence has no positions at all
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Status at a position, if the position exists
    pub fn status(&self, position: u32) -> Option<&PositionStatus> {
        self.positions.get(&position)
    }

    /// Challenge id at a position, if that position resolved
    pub fn resolved_id(&self, position: u32) -> Option<&str> {
        match self.positions.get(&position) {
            Some(PositionStatus::Resolved { challenge_id }) => Some(challenge_id),
            _ => None,
        }
    }

    /// Position holding the given challenge id, first match by ascending position
    ///
    /// Unresolved positions are invisible to this lookup.
    pub fn position_of(&self, challenge_id: &str) -> Option<u32> {
        self.positions.iter().find_map(|(position, status)| match status {
            PositionStatus::Resolved { challenge_id: id } if id == challenge_id => Some(*position),
            _ => None,
        })
    }

    /// The challenge id following `current_id`, or `None` when the sequence
    /// is exhausted
    ///
    /// An unknown `current_id` falls back to position 0 — the lookup restarts
    /// from the top of the sequence rather than erroring. Callers render
    /// `None` as a terminal "finished" outcome, not a failure.
    pub fn next_after(&self, current_id: &str) -> Option<&str> {
        let current = self.position_of(current_id).unwrap_or(0);
        self.resolved_id(current + 1)
    }

    /// Iterate positions in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &PositionStatus)> {
        self.positions.iter().map(|(position, status)| (*position, status))
    }
}
